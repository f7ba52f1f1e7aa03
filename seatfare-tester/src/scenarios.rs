//! Named acceptance scenarios run against the in-memory seat page.
use anyhow::{Context, Result, bail, ensure};
use serde::Serialize;
use std::time::Instant;

use seatfare_core::{
    MemoryPage, MountError, SeatSelectionView, ViewConfig, generate_seater_seats,
};

pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    run: fn() -> Result<()>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub duration_ms: f64,
    pub failures: Vec<String>,
}

static CATALOG: &[Scenario] = &[
    Scenario {
        key: "empty-selection",
        description: "Three unchecked seats render None and 0.00",
        run: empty_selection,
    },
    Scenario {
        key: "single-seat",
        description: "Checking one seat shows it and charges one fare",
        run: single_seat,
    },
    Scenario {
        key: "two-seats",
        description: "Fractional base fare times two seats",
        run: two_seats,
    },
    Scenario {
        key: "missing-fare",
        description: "Absent or empty base fare always totals 0.00",
        run: missing_fare,
    },
    Scenario {
        key: "missing-target",
        description: "A missing output target disables the view without writing",
        run: missing_target,
    },
    Scenario {
        key: "subset-sweep",
        description: "Every subset of a 2x3 grid matches count x fare, summary and markers",
        run: subset_sweep,
    },
    Scenario {
        key: "idempotence",
        description: "Recomputing twice without changes renders the same output",
        run: idempotence,
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description))
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<&'static Scenario> {
    CATALOG.iter().find(|s| s.key == key)
}

/// Expand `all` into every catalog key, keeping other names as given.
#[must_use]
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    if names.iter().any(|n| n == "all") {
        return CATALOG.iter().map(|s| s.key.to_string()).collect();
    }
    names.to_vec()
}

impl Scenario {
    pub fn execute(&self) -> ScenarioResult {
        let started = Instant::now();
        let outcome = (self.run)();
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        log::debug!("scenario {} finished in {duration_ms:.3}ms", self.key);
        ScenarioResult {
            scenario_name: self.key.to_string(),
            passed: outcome.is_ok(),
            duration_ms,
            failures: outcome.err().map(|e| vec![format!("{e:#}")]).unwrap_or_default(),
        }
    }
}

fn mount(page: MemoryPage) -> Result<SeatSelectionView<MemoryPage>> {
    SeatSelectionView::mount(page, &ViewConfig::default()).context("mounting seat view")
}

fn outputs(view: &SeatSelectionView<MemoryPage>) -> (String, String) {
    (
        view.page().text("selectedSeatsText").unwrap_or_default(),
        view.page().text("totalFare").unwrap_or_default(),
    )
}

fn expect_outputs(view: &SeatSelectionView<MemoryPage>, summary: &str, total: &str) -> Result<()> {
    let (got_summary, got_total) = outputs(view);
    ensure!(
        got_summary == summary,
        "summary was {got_summary:?}, expected {summary:?}"
    );
    ensure!(got_total == total, "total was {got_total:?}, expected {total:?}");
    Ok(())
}

fn empty_selection() -> Result<()> {
    let view = mount(MemoryPage::standard(Some("50.00"), &["1A", "2A", "3A"]))?;
    view.recompute();
    expect_outputs(&view, "None", "0.00")
}

fn single_seat() -> Result<()> {
    let view = mount(MemoryPage::standard(Some("50.00"), &["1A", "2A", "3A"]))?;
    view.recompute();
    view.page().set_checked("seat-3", true);
    view.recompute();
    expect_outputs(&view, "3A", "50.00")?;
    ensure!(
        view.page().label_has_class("seat-3", "selected"),
        "label for 3A is not marked selected"
    );
    Ok(())
}

fn two_seats() -> Result<()> {
    let view = mount(MemoryPage::standard(Some("75.5"), &["1A", "2B", "3C"]))?;
    view.page().set_checked("seat-1", true);
    view.page().set_checked("seat-2", true);
    view.recompute();
    expect_outputs(&view, "1A, 2B", "151.00")
}

fn missing_fare() -> Result<()> {
    for fare in [None, Some("")] {
        let view = mount(MemoryPage::standard(fare, &["1A", "1B", "1C"]))?;
        for id in view.page().control_ids() {
            view.page().set_checked(&id, true);
            view.recompute();
            let (_, total) = outputs(&view);
            ensure!(total == "0.00", "fare {fare:?} produced total {total}");
        }
    }
    Ok(())
}

fn missing_target() -> Result<()> {
    let page = MemoryPage::standard(Some("50.00"), &["1A"]);
    page.remove_text_target("totalFare");
    match SeatSelectionView::mount(page, &ViewConfig::default()) {
        Err(MountError::MissingTarget { id }) if id == "totalFare" => Ok(()),
        Err(other) => bail!("unexpected mount error: {other}"),
        Ok(view) => {
            let (summary, _) = outputs(&view);
            bail!("view mounted without a total target (summary {summary:?})")
        }
    }
}

fn subset_sweep() -> Result<()> {
    let layout = generate_seater_seats(1, 1, 2, 3)?;
    let numbers = layout.seat_numbers();
    let view = mount(MemoryPage::standard(Some("12.5"), &numbers))?;
    let ids = view.page().control_ids();

    for mask in 0_u32..(1 << ids.len()) {
        let picked: Vec<&str> = (0..ids.len())
            .filter(|bit| mask & (1 << bit) != 0)
            .map(|bit| numbers[bit])
            .collect();
        for (bit, id) in ids.iter().enumerate() {
            view.page().set_checked(id, mask & (1 << bit) != 0);
        }
        let rendered = view.recompute();

        let expected_cents = 1250 * i64::try_from(picked.len())?;
        ensure!(
            rendered.total.cents() == expected_cents,
            "mask {mask:#08b}: total {} != {expected_cents} cents",
            rendered.total.cents()
        );
        let expected_summary = if picked.is_empty() {
            "None".to_string()
        } else {
            picked.join(", ")
        };
        ensure!(
            rendered.summary_text == expected_summary,
            "mask {mask:#08b}: summary {:?} != {expected_summary:?}",
            rendered.summary_text
        );
        for (bit, id) in ids.iter().enumerate() {
            let marked = view.page().label_has_class(id, "selected");
            ensure!(
                marked == (mask & (1 << bit) != 0),
                "mask {mask:#08b}: marker on {id} is {marked}"
            );
        }
    }
    Ok(())
}

fn idempotence() -> Result<()> {
    let view = mount(MemoryPage::standard(Some("33.33"), &["1A", "1B", "1C", "1D"]))?;
    view.page().set_checked("seat-2", true);
    view.page().set_checked("seat-4", true);
    let first = view.recompute();
    let first_outputs = outputs(&view);
    let second = view.recompute();
    ensure!(first == second, "second recompute differed: {second:?}");
    ensure!(first_outputs == outputs(&view), "page outputs changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_scenario_passes() {
        for (key, _) in list_scenarios() {
            let result = get_scenario(key).expect("listed").execute();
            assert!(result.passed, "{key} failed: {:?}", result.failures);
        }
    }

    #[test]
    fn expand_all_lists_catalog() {
        let expanded = expand_scenarios(&["all".to_string()]);
        assert_eq!(expanded.len(), CATALOG.len());
        let kept = expand_scenarios(&["two-seats".to_string(), "bogus".to_string()]);
        assert_eq!(kept, vec!["two-seats", "bogus"]);
        assert!(get_scenario("bogus").is_none());
    }
}
