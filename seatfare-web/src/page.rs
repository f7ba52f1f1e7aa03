//! `SeatPage` over the live browser document.
use crate::dom::{css_string, js_error_message};
use seatfare_core::SeatPage;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// The browser document hosting the seat controls.
#[derive(Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// The page for the current window's document, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        crate::dom::document().map(Self::new)
    }
}

impl SeatPage for DomPage {
    type Control = HtmlInputElement;
    type Label = Element;
    type Text = Element;

    fn controls(&self, selector: &str) -> Vec<HtmlInputElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    fn control_id(&self, control: &HtmlInputElement) -> String {
        control.id()
    }

    fn attribute(&self, control: &HtmlInputElement, name: &str) -> Option<String> {
        control.get_attribute(name)
    }

    fn is_checked(&self, control: &HtmlInputElement) -> bool {
        control.checked()
    }

    fn label_for(&self, control_id: &str) -> Option<Element> {
        if control_id.is_empty() {
            return None;
        }
        let selector = format!("label[for=\"{}\"]", css_string(control_id));
        self.document.query_selector(&selector).ok().flatten()
    }

    fn set_marker(&self, label: &Element, class: &str, on: bool) {
        let classes = label.class_list();
        let toggled = if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(err) = toggled {
            log::debug!("marker {class} not toggled: {}", js_error_message(&err));
        }
    }

    fn input_value(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        match element.dyn_ref::<HtmlInputElement>() {
            Some(input) => Some(input.value()),
            None => element.get_attribute("value"),
        }
    }

    fn text_target(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn write_text(&self, target: &Element, text: &str) {
        target.set_text_content(Some(text));
    }
}
