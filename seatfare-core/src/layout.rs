//! Bus seat layouts and seater-grid generation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Row letters run `A`..`Z`.
pub const MAX_ROWS: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout needs at least one row")]
    NoRows,
    #[error("layout needs at least one column")]
    NoColumns,
    #[error("layout supports at most {max} rows (got {rows})")]
    TooManyRows { rows: u32, max: u32 },
    #[error("{seats} seats starting at pk {start_pk} overflow the pk range")]
    PkOverflow { start_pk: u32, seats: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatType {
    #[default]
    Seater,
    Sleeper,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Deck {
    #[default]
    Lower,
    Upper,
}

/// One physical seat on a bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSpec {
    pub pk: u32,
    pub bus: u32,
    pub seat_number: String,
    #[serde(default)]
    pub seat_type: SeatType,
    #[serde(default)]
    pub deck: Deck,
    pub row: u32,
    pub col: u32,
}

impl SeatSpec {
    /// Element id used for the seat's checkbox.
    #[must_use]
    pub fn control_id(&self) -> String {
        format!("seat-{}", self.pk)
    }
}

/// Seats of one bus, ordered by deck, row and column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatLayout {
    seats: Vec<SeatSpec>,
}

impl SeatLayout {
    #[must_use]
    pub fn new(mut seats: Vec<SeatSpec>) -> Self {
        seats.sort_by_key(|s| (s.deck, s.row, s.col));
        Self { seats }
    }

    /// Load a layout from a JSON array of seats.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into seats.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<SeatSpec>>(json).map(Self::new)
    }

    #[must_use]
    pub fn seats(&self) -> &[SeatSpec] {
        &self.seats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn seat_numbers(&self) -> Vec<&str> {
        self.seats.iter().map(|s| s.seat_number.as_str()).collect()
    }

    #[must_use]
    pub fn find_by_number(&self, seat_number: &str) -> Option<&SeatSpec> {
        self.seats.iter().find(|s| s.seat_number == seat_number)
    }

    /// Distinct rows of `deck`, each with its seats in column order.
    #[must_use]
    pub fn rows(&self, deck: Deck) -> Vec<Vec<&SeatSpec>> {
        let mut rows: Vec<Vec<&SeatSpec>> = Vec::new();
        for seat in self.seats.iter().filter(|s| s.deck == deck) {
            match rows.last_mut() {
                Some(row) if row.first().is_some_and(|first| first.row == seat.row) => {
                    row.push(seat);
                }
                _ => rows.push(vec![seat]),
            }
        }
        rows
    }
}

/// Seat number for a 1-based row and column: row 1 col 3 is `A3`.
#[must_use]
pub fn seat_number(row: u32, col: u32) -> String {
    let letter = char::from_u32(u32::from(b'A') + row.saturating_sub(1)).unwrap_or('?');
    format!("{letter}{col}")
}

/// Generate a single-deck seater grid named `A1`..`A{cols}`, `B1`.. and so on.
///
/// # Errors
///
/// Returns an error if `rows` or `cols` is zero, `rows` exceeds [`MAX_ROWS`],
/// or the primary keys would run past `u32::MAX`.
pub fn generate_seater_seats(
    bus_id: u32,
    start_pk: u32,
    rows: u32,
    cols: u32,
) -> Result<SeatLayout, LayoutError> {
    if rows == 0 {
        return Err(LayoutError::NoRows);
    }
    if cols == 0 {
        return Err(LayoutError::NoColumns);
    }
    if rows > MAX_ROWS {
        return Err(LayoutError::TooManyRows {
            rows,
            max: MAX_ROWS,
        });
    }

    let count = u64::from(rows) * u64::from(cols);
    if u64::from(start_pk) + count - 1 > u64::from(u32::MAX) {
        return Err(LayoutError::PkOverflow {
            start_pk,
            seats: count,
        });
    }

    let mut seats = Vec::new();
    for (pk, (row, col)) in (start_pk..=u32::MAX)
        .zip((1..=rows).flat_map(|row| (1..=cols).map(move |col| (row, col))))
    {
        seats.push(SeatSpec {
            pk,
            bus: bus_id,
            seat_number: seat_number(row, col),
            seat_type: SeatType::Seater,
            deck: Deck::Lower,
            row,
            col,
        });
    }
    Ok(SeatLayout::new(seats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_lettered_grid() {
        let layout = generate_seater_seats(1, 1, 10, 4).unwrap();
        assert_eq!(layout.len(), 40);
        let numbers = layout.seat_numbers();
        assert_eq!(&numbers[..5], &["A1", "A2", "A3", "A4", "B1"]);
        assert_eq!(numbers.last(), Some(&"J4"));
        assert_eq!(layout.seats()[39].pk, 40);
        assert_eq!(layout.rows(Deck::Lower).len(), 10);
        assert!(layout.rows(Deck::Upper).is_empty());
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert_eq!(generate_seater_seats(1, 1, 0, 4), Err(LayoutError::NoRows));
        assert_eq!(generate_seater_seats(1, 1, 2, 0), Err(LayoutError::NoColumns));
        assert_eq!(
            generate_seater_seats(1, 1, 27, 1),
            Err(LayoutError::TooManyRows { rows: 27, max: 26 })
        );
    }

    #[test]
    fn primary_keys_stay_unique_at_the_top_of_the_range() {
        assert_eq!(
            generate_seater_seats(1, u32::MAX, 1, 2),
            Err(LayoutError::PkOverflow {
                start_pk: u32::MAX,
                seats: 2
            })
        );

        let last = generate_seater_seats(1, u32::MAX, 1, 1).unwrap();
        assert_eq!(last.seats()[0].pk, u32::MAX);

        let layout = generate_seater_seats(1, u32::MAX - 3, 2, 2).unwrap();
        let pks: Vec<u32> = layout.seats().iter().map(|s| s.pk).collect();
        assert_eq!(pks, vec![u32::MAX - 3, u32::MAX - 2, u32::MAX - 1, u32::MAX]);
    }

    #[test]
    fn json_layouts_sort_by_deck_row_col() {
        let json = r#"[
            {"pk": 3, "bus": 2, "seat_number": "U1", "deck": "UPPER", "seat_type": "SLEEPER", "row": 1, "col": 1},
            {"pk": 2, "bus": 2, "seat_number": "A2", "row": 1, "col": 2},
            {"pk": 1, "bus": 2, "seat_number": "A1", "row": 1, "col": 1}
        ]"#;
        let layout = SeatLayout::from_json(json).unwrap();
        assert_eq!(layout.seat_numbers(), vec!["A1", "A2", "U1"]);
        assert_eq!(
            layout.find_by_number("U1").map(|s| s.seat_type),
            Some(SeatType::Sleeper)
        );
        assert_eq!(layout.seats()[0].control_id(), "seat-1");
    }
}
