#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bind;
pub mod components;
pub mod dom;
pub mod page;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Pages without the seat markup are left untouched.
    let _ = bind::mount_document(&seatfare_core::ViewConfig::default());
}

/// Render the seat picker into the element with id `root_id`.
///
/// # Errors
///
/// Returns an error if the root element is missing or the layout JSON is invalid.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount_seat_picker(root_id: &str, layout_json: &str, base_fare: &str) -> Result<(), JsValue> {
    use components::seat_picker::{PickerError, Props, SeatPicker};

    let root = dom::document()
        .and_then(|doc| doc.get_element_by_id(root_id))
        .ok_or_else(|| PickerError::MissingRoot(root_id.to_string()))
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let props =
        Props::from_json(layout_json, base_fare).map_err(|err| JsValue::from_str(&err.to_string()))?;
    log::debug!("rendering seat picker with {} seats", props.layout.len());
    yew::Renderer::<SeatPicker>::with_root_and_props(root, props).render();
    Ok(())
}
