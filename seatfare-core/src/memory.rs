//! In-memory seat page for tests and headless runs.
use crate::page::SeatPage;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

pub const SEAT_CLASS: &str = "seat-check";
pub const SEAT_NUMBER_ATTR: &str = "data-seat-number";

/// One checkbox-like control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryControl {
    pub id: String,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub checked: bool,
}

impl MemoryControl {
    /// A seat checkbox carrying the default class and seat-number attribute.
    #[must_use]
    pub fn seat(id: &str, seat_number: &str) -> Self {
        let mut control = Self {
            id: id.to_string(),
            ..Self::default()
        };
        control.classes.insert(SEAT_CLASS.to_string());
        control
            .attributes
            .insert(SEAT_NUMBER_ATTR.to_string(), seat_number.to_string());
        control
    }
}

#[derive(Debug, Default)]
struct PageState {
    controls: Vec<MemoryControl>,
    /// Label classes keyed by the label's `for` reference.
    labels: BTreeMap<String, BTreeSet<String>>,
    inputs: BTreeMap<String, String>,
    texts: BTreeMap<String, String>,
}

/// Page markup held in memory.
///
/// Selectors support `.class`, `#id` and `*`.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: RefCell<PageState>,
}

/// Handle to a control by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRef(usize);

impl MemoryPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with the standard base-fare field, both outputs and one labelled
    /// seat per entry of `seat_numbers` (ids `seat-1`, `seat-2`, ...).
    #[must_use]
    pub fn standard(base_fare: Option<&str>, seat_numbers: &[&str]) -> Self {
        let mut page = Self::new()
            .with_text_target("selectedSeatsText")
            .with_text_target("totalFare");
        if let Some(fare) = base_fare {
            page = page.with_input("baseFare", fare);
        }
        for (idx, number) in seat_numbers.iter().enumerate() {
            page = page.with_seat(&format!("seat-{}", idx + 1), number);
        }
        page
    }

    #[must_use]
    pub fn with_input(self, id: &str, value: &str) -> Self {
        self.state
            .borrow_mut()
            .inputs
            .insert(id.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_text_target(self, id: &str) -> Self {
        self.state
            .borrow_mut()
            .texts
            .insert(id.to_string(), String::new());
        self
    }

    /// Add a seat control with a label pointing at it.
    #[must_use]
    pub fn with_seat(self, id: &str, seat_number: &str) -> Self {
        self.with_label(id)
            .with_control(MemoryControl::seat(id, seat_number))
    }

    #[must_use]
    pub fn with_label(self, for_id: &str) -> Self {
        self.state
            .borrow_mut()
            .labels
            .insert(for_id.to_string(), BTreeSet::new());
        self
    }

    #[must_use]
    pub fn with_control(self, control: MemoryControl) -> Self {
        self.state.borrow_mut().controls.push(control);
        self
    }

    /// Set a control's checked state; returns false if no control has that id.
    pub fn set_checked(&self, id: &str, checked: bool) -> bool {
        let mut state = self.state.borrow_mut();
        match state.controls.iter_mut().find(|c| c.id == id) {
            Some(control) => {
                control.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn remove_text_target(&self, id: &str) {
        self.state.borrow_mut().texts.remove(id);
    }

    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.state.borrow().texts.get(id).cloned()
    }

    #[must_use]
    pub fn label_has_class(&self, for_id: &str, class: &str) -> bool {
        self.state
            .borrow()
            .labels
            .get(for_id)
            .is_some_and(|classes| classes.contains(class))
    }

    #[must_use]
    pub fn control_ids(&self) -> Vec<String> {
        self.state
            .borrow()
            .controls
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }
}

fn matches_selector(control: &MemoryControl, selector: &str) -> bool {
    let selector = selector.trim();
    if selector == "*" {
        return true;
    }
    if let Some(class) = selector.strip_prefix('.') {
        return control.classes.contains(class);
    }
    if let Some(id) = selector.strip_prefix('#') {
        return control.id == id;
    }
    false
}

impl SeatPage for MemoryPage {
    type Control = ControlRef;
    type Label = String;
    type Text = String;

    fn controls(&self, selector: &str) -> Vec<ControlRef> {
        self.state
            .borrow()
            .controls
            .iter()
            .enumerate()
            .filter(|(_, control)| matches_selector(control, selector))
            .map(|(idx, _)| ControlRef(idx))
            .collect()
    }

    fn control_id(&self, control: &ControlRef) -> String {
        self.state
            .borrow()
            .controls
            .get(control.0)
            .map(|c| c.id.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, control: &ControlRef, name: &str) -> Option<String> {
        self.state
            .borrow()
            .controls
            .get(control.0)
            .and_then(|c| c.attributes.get(name).cloned())
    }

    fn is_checked(&self, control: &ControlRef) -> bool {
        self.state
            .borrow()
            .controls
            .get(control.0)
            .is_some_and(|c| c.checked)
    }

    fn label_for(&self, control_id: &str) -> Option<String> {
        self.state
            .borrow()
            .labels
            .contains_key(control_id)
            .then(|| control_id.to_string())
    }

    fn set_marker(&self, label: &String, class: &str, on: bool) {
        if let Some(classes) = self.state.borrow_mut().labels.get_mut(label) {
            if on {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.state.borrow().inputs.get(id).cloned()
    }

    fn text_target(&self, id: &str) -> Option<String> {
        self.state
            .borrow()
            .texts
            .contains_key(id)
            .then(|| id.to_string())
    }

    fn write_text(&self, target: &String, text: &str) {
        if let Some(slot) = self.state.borrow_mut().texts.get_mut(target) {
            *slot = text.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_class_id_and_wildcard() {
        let page = MemoryPage::standard(None, &["1A", "1B"]).with_control(MemoryControl {
            id: "other".to_string(),
            ..MemoryControl::default()
        });
        assert_eq!(page.controls(".seat-check").len(), 2);
        assert_eq!(page.controls("#other").len(), 1);
        assert_eq!(page.controls("*").len(), 3);
        assert!(page.controls("input[type=checkbox]").is_empty());
    }

    #[test]
    fn markers_toggle_on_labels() {
        let page = MemoryPage::standard(None, &["1A"]);
        let label = page.label_for("seat-1").unwrap();
        page.set_marker(&label, "selected", true);
        assert!(page.label_has_class("seat-1", "selected"));
        page.set_marker(&label, "selected", false);
        assert!(!page.label_has_class("seat-1", "selected"));
    }

    #[test]
    fn unknown_ids_are_absent() {
        let page = MemoryPage::standard(Some("10"), &["1A"]);
        assert!(!page.set_checked("seat-9", true));
        assert!(page.text_target("nope").is_none());
        assert!(page.label_for("seat-9").is_none());
        assert_eq!(page.input_value("baseFare").as_deref(), Some("10"));
    }
}
