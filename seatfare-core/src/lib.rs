//! Seatfare core
//!
//! Platform-agnostic seat selection logic: base-fare parsing, selection
//! summaries, fare totals, and the view that keeps a host page's outputs in
//! step with its seat checkboxes. Contains no browser dependencies.

pub mod config;
pub mod fare;
pub mod layout;
pub mod memory;
pub mod page;
pub mod selection;

// Re-export commonly used types
pub use config::{ConfigError, ViewConfig};
pub use fare::{BaseFare, Money, total_fare};
pub use layout::{Deck, LayoutError, SeatLayout, SeatSpec, SeatType, generate_seater_seats};
pub use memory::{MemoryControl, MemoryPage};
pub use page::{BoundSeat, MountError, SeatPage, SeatSelectionView};
pub use selection::{Rendered, SelectionSummary};
