#![cfg(target_arch = "wasm32")]

use seatfare_core::ViewConfig;
use seatfare_web::bind::mount_document;
use seatfare_web::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const SEAT_MARKUP: &str = r#"
    <input type="hidden" id="baseFare" value="75.5" />
    <input type="checkbox" class="seat-check" id="seat-1" data-seat-number="1A" />
    <label for="seat-1">1A</label>
    <input type="checkbox" class="seat-check" id="seat-2" data-seat-number="2B" />
    <label for="seat-2">2B</label>
    <input type="checkbox" class="seat-check" id="seat-3" data-seat-number="3C" />
    <label for="seat-3">3C</label>
    <span id="selectedSeatsText"></span>
    <span id="totalFare"></span>
"#;

fn install(markup: &str) {
    let doc = dom::document().expect("document");
    doc.body().expect("body").set_inner_html(markup);
}

fn text(id: &str) -> String {
    dom::document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

fn click(id: &str) {
    let doc = dom::document().expect("document");
    let input: HtmlInputElement = doc
        .get_element_by_id(id)
        .expect("seat exists")
        .dyn_into()
        .expect("seat is an input");
    input.set_checked(!input.checked());
    let event = Event::new("change").expect("change event");
    input.dispatch_event(&event).expect("dispatch change");
}

fn label_selected(id: &str) -> bool {
    dom::document()
        .and_then(|doc| doc.query_selector(&format!("label[for=\"{id}\"]")).ok().flatten())
        .is_some_and(|label| label.class_list().contains("selected"))
}

#[wasm_bindgen_test]
fn initial_render_shows_none() {
    install(SEAT_MARKUP);
    assert!(mount_document(&ViewConfig::default()).is_some());
    assert_eq!(text("selectedSeatsText"), "None");
    assert_eq!(text("totalFare"), "0.00");
}

#[wasm_bindgen_test]
fn change_events_recompute_outputs_and_labels() {
    install(SEAT_MARKUP);
    let _view = mount_document(&ViewConfig::default()).expect("bound");
    click("seat-1");
    click("seat-2");
    assert_eq!(text("selectedSeatsText"), "1A, 2B");
    assert_eq!(text("totalFare"), "151.00");
    assert!(label_selected("seat-1"));
    assert!(!label_selected("seat-3"));

    click("seat-1");
    assert_eq!(text("selectedSeatsText"), "2B");
    assert!(!label_selected("seat-1"));
}

#[wasm_bindgen_test]
fn missing_target_leaves_page_alone() {
    install(
        r#"<input type="checkbox" class="seat-check" id="seat-1" data-seat-number="1A" />
           <span id="selectedSeatsText">untouched</span>"#,
    );
    assert!(mount_document(&ViewConfig::default()).is_none());
    click("seat-1");
    assert_eq!(text("selectedSeatsText"), "untouched");
}

#[wasm_bindgen_test]
fn rejected_marker_class_does_not_stop_rendering() {
    install(SEAT_MARKUP);
    let config = ViewConfig {
        marker_class: String::new(),
        ..ViewConfig::default()
    };
    assert!(mount_document(&config).is_some());
    click("seat-1");
    assert_eq!(text("selectedSeatsText"), "1A");
    assert_eq!(text("totalFare"), "75.50");
    assert!(!label_selected("seat-1"));
}

#[wasm_bindgen_test]
fn exponent_fare_renders_scaled_total() {
    install(&SEAT_MARKUP.replace("value=\"75.5\"", "value=\"1e2\""));
    assert!(mount_document(&ViewConfig::default()).is_some());
    click("seat-2");
    assert_eq!(text("totalFare"), "100.00");
}
