//! Seat fixtures in the booking site's loaddata format.
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use seatfare_core::{Deck, SeatLayout, SeatType, generate_seater_seats};

#[derive(Debug, Serialize)]
pub struct SeatFields<'a> {
    pub bus: u32,
    pub seat_number: &'a str,
    pub seat_type: SeatType,
    pub deck: Deck,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Serialize)]
pub struct FixtureRecord<'a> {
    pub model: &'static str,
    pub pk: u32,
    pub fields: SeatFields<'a>,
}

#[must_use]
pub fn fixture_records(layout: &SeatLayout) -> Vec<FixtureRecord<'_>> {
    layout
        .seats()
        .iter()
        .map(|seat| FixtureRecord {
            model: "buses.seat",
            pk: seat.pk,
            fields: SeatFields {
                bus: seat.bus,
                seat_number: &seat.seat_number,
                seat_type: seat.seat_type,
                deck: seat.deck,
                row: seat.row,
                col: seat.col,
            },
        })
        .collect()
}

/// Generate a seater grid and write it as a pretty JSON fixture array.
pub fn write_seater_fixture(
    out: &mut dyn Write,
    bus_id: u32,
    start_pk: u32,
    rows: u32,
    cols: u32,
) -> Result<usize> {
    let layout = generate_seater_seats(bus_id, start_pk, rows, cols)
        .with_context(|| format!("generating {rows}x{cols} layout for bus {bus_id}"))?;
    let records = fixture_records(&layout);
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    log::info!("generated {} seats for bus {bus_id}", records.len());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_matches_loaddata_shape() {
        let mut buf = Vec::new();
        let count = write_seater_fixture(&mut buf, 2, 1001, 10, 4).unwrap();
        assert_eq!(count, 40);
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let first = &value[0];
        assert_eq!(first["model"], "buses.seat");
        assert_eq!(first["pk"], 1001);
        assert_eq!(first["fields"]["seat_number"], "A1");
        assert_eq!(first["fields"]["seat_type"], "SEATER");
        assert_eq!(first["fields"]["deck"], "LOWER");
        assert_eq!(value[39]["fields"]["seat_number"], "J4");
        assert_eq!(value[39]["pk"], 1040);
    }

    #[test]
    fn invalid_grid_reports_context() {
        let err = write_seater_fixture(&mut Vec::<u8>::new(), 1, 1, 30, 4).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("30x4"));
        assert!(msg.contains("at most 26 rows"));
    }
}
