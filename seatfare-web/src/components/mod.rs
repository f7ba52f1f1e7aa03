pub mod seat_picker;
