//! Change-listener wiring between the live document and the seat view.
use crate::dom::js_error_message;
use crate::page::DomPage;
use seatfare_core::{SeatPage, SeatSelectionView, ViewConfig};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Event;

/// View shared by every seat's change listener.
pub type BoundView = Rc<SeatSelectionView<DomPage>>;

/// Mount the seat view on `page` and recompute on every seat's `change` event.
///
/// Returns `None`, without attaching anything, when a display target is
/// missing. Listeners stay registered for the lifetime of the page.
#[must_use]
pub fn bind_page(page: DomPage, config: &ViewConfig) -> Option<BoundView> {
    let view = Rc::new(SeatSelectionView::mount(page, config).ok()?);

    let raw_fare = view.page().input_value(&config.base_fare_id);
    if view.base_fare().degraded_from(raw_fare.as_deref()) {
        log::debug!(
            "base fare {:?} in #{} is not a positive number; using 0",
            raw_fare.unwrap_or_default(),
            config.base_fare_id
        );
    }

    for seat in view.seats() {
        let listener = {
            let view = Rc::clone(&view);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                view.recompute();
            })
        };
        if let Err(err) = seat
            .control
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        {
            log::debug!(
                "change listener not attached to seat {}: {}",
                seat.seat_number,
                js_error_message(&err)
            );
        }
        listener.forget();
    }

    let rendered = view.recompute();
    log::debug!(
        "seat selection bound to {} seats (base fare {}, selected: {})",
        view.seats().len(),
        view.base_fare().amount(),
        rendered.summary_text
    );
    Some(view)
}

/// Bind the seat view to the current window's document.
#[must_use]
pub fn mount_document(config: &ViewConfig) -> Option<BoundView> {
    bind_page(DomPage::current()?, config)
}
