//! Derived selection state: which seats are picked and what they cost.
use crate::fare::{BaseFare, Money, total_fare};
use serde::{Deserialize, Serialize};

/// Seat numbers currently selected, in control order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub seats: Vec<String>,
}

impl SelectionSummary {
    /// Collect the checked entries of a `(seat_number, checked)` snapshot.
    pub fn from_snapshot<'a, I>(snapshot: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let seats = snapshot
            .into_iter()
            .filter(|(_, checked)| *checked)
            .map(|(seat, _)| seat.to_string())
            .collect();
        Self { seats }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// `empty_text` when nothing is selected, otherwise the seats joined by `separator`.
    #[must_use]
    pub fn text(&self, empty_text: &str, separator: &str) -> String {
        if self.seats.is_empty() {
            empty_text.to_string()
        } else {
            self.seats.join(separator)
        }
    }

    #[must_use]
    pub fn total(&self, base: BaseFare) -> Money {
        total_fare(self.count(), base)
    }
}

/// Everything one recompute writes to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub summary_text: String,
    pub total_text: String,
    pub total: Money,
    /// Marker state per control, in control order.
    pub markers: Vec<bool>,
}

impl Rendered {
    /// Derive the rendered output for a `(seat_number, checked)` snapshot.
    pub fn from_snapshot<'a, I>(snapshot: I, base: BaseFare, empty_text: &str, separator: &str) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
        I::IntoIter: Clone,
    {
        let snapshot = snapshot.into_iter();
        let markers = snapshot.clone().map(|(_, checked)| checked).collect();
        let summary = SelectionSummary::from_snapshot(snapshot);
        let total = summary.total(base);
        Self {
            summary_text: summary.text(empty_text, separator),
            total_text: total.format_fixed2(),
            total,
            markers,
        }
    }
}
