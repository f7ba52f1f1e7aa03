use seatfare_core::memory::SEAT_CLASS;
use seatfare_core::{BaseFare, Deck, Rendered, SeatLayout, SeatSpec, SelectionSummary, ViewConfig};
use std::collections::BTreeSet;
use std::rc::Rc;
use thiserror::Error;
use yew::prelude::*;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("seat picker root #{0} is missing")]
    MissingRoot(String),
    #[error("invalid seat layout: {0}")]
    Layout(#[from] serde_json::Error),
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub layout: Rc<SeatLayout>,
    pub base_fare: AttrValue,
    /// Primary keys of seats that are locked or already booked.
    #[prop_or_default]
    pub unavailable: Rc<BTreeSet<u32>>,
    #[prop_or_default]
    pub initially_selected: Rc<BTreeSet<u32>>,
    #[prop_or_default]
    pub config: Rc<ViewConfig>,
    #[prop_or_default]
    pub on_change: Callback<SelectionSummary>,
}

impl Props {
    /// Build props from a JSON seat array and the raw base-fare text.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Layout`] if the layout JSON does not parse.
    pub fn from_json(layout_json: &str, base_fare: &str) -> Result<Self, PickerError> {
        Ok(Self {
            layout: Rc::new(SeatLayout::from_json(layout_json)?),
            base_fare: AttrValue::from(base_fare.to_string()),
            unavailable: Rc::default(),
            initially_selected: Rc::default(),
            config: Rc::default(),
            on_change: Callback::noop(),
        })
    }
}

/// Apply one checkbox toggle. Unavailable seats never enter the selection.
#[must_use]
pub fn toggle_seat(
    selected: &BTreeSet<u32>,
    unavailable: &BTreeSet<u32>,
    pk: u32,
    on: bool,
) -> BTreeSet<u32> {
    let mut next = selected.clone();
    if on && !unavailable.contains(&pk) {
        next.insert(pk);
    } else {
        next.remove(&pk);
    }
    next
}

/// Summary and total for the checked primary keys, in layout order.
#[must_use]
pub fn render_selection(props: &Props, selected: &BTreeSet<u32>) -> Rendered {
    let snapshot: Vec<(&str, bool)> = props
        .layout
        .seats()
        .iter()
        .map(|seat| (seat.seat_number.as_str(), selected.contains(&seat.pk)))
        .collect();
    Rendered::from_snapshot(
        snapshot.iter().copied(),
        BaseFare::parse(&props.base_fare),
        &props.config.empty_text,
        &props.config.separator,
    )
}

fn control_class(config: &ViewConfig) -> String {
    config
        .control_selector
        .strip_prefix('.')
        .unwrap_or(SEAT_CLASS)
        .to_string()
}

const fn deck_title(deck: Deck) -> &'static str {
    match deck {
        Deck::Lower => "Lower deck",
        Deck::Upper => "Upper deck",
    }
}

/// Seat grid with live selection summary and total fare.
#[function_component(SeatPicker)]
pub fn seat_picker(p: &Props) -> Html {
    let selected = {
        let initial = p.initially_selected.clone();
        let unavailable = p.unavailable.clone();
        use_state(move || {
            initial
                .iter()
                .copied()
                .filter(|pk| !unavailable.contains(pk))
                .collect::<BTreeSet<u32>>()
        })
    };
    let rendered = render_selection(p, &selected);

    let seat_cell = |seat: &SeatSpec| -> Html {
        let pk = seat.pk;
        let id = seat.control_id();
        let checked = selected.contains(&pk);
        let unavailable = p.unavailable.contains(&pk);
        let onchange = {
            let selected = selected.clone();
            let unavailable_set = p.unavailable.clone();
            let layout = p.layout.clone();
            let on_change = p.on_change.clone();
            Callback::from(move |e: Event| {
                let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
                    return;
                };
                let next = toggle_seat(&selected, &unavailable_set, pk, input.checked());
                let summary = SelectionSummary::from_snapshot(
                    layout
                        .seats()
                        .iter()
                        .map(|s| (s.seat_number.as_str(), next.contains(&s.pk))),
                );
                selected.set(next);
                on_change.emit(summary);
            })
        };
        let label_class = classes!(
            "seat",
            checked.then(|| p.config.marker_class.clone()),
            unavailable.then_some("unavailable"),
        );
        html! {
            <span class="seat-cell" key={pk}>
                <input
                    type="checkbox"
                    class={control_class(&p.config)}
                    id={id.clone()}
                    name="seats"
                    value={pk.to_string()}
                    data-seat-number={seat.seat_number.clone()}
                    checked={checked}
                    disabled={unavailable}
                    {onchange}
                />
                <label for={id} class={label_class}>{ seat.seat_number.clone() }</label>
            </span>
        }
    };

    let decks = [Deck::Lower, Deck::Upper]
        .into_iter()
        .filter_map(|deck| {
            let rows = p.layout.rows(deck);
            (!rows.is_empty()).then(|| {
                html! {
                    <section class="seat-deck" aria-label={deck_title(deck)}>
                        <h3 class="seat-deck__title">{ deck_title(deck) }</h3>
                        { for rows.into_iter().map(|row| html! {
                            <div class="seat-row" role="group">
                                { for row.into_iter().map(|seat| seat_cell(seat)) }
                            </div>
                        }) }
                    </section>
                }
            })
        })
        .collect::<Html>();

    html! {
        <div class="seat-picker">
            <input type="hidden" id={p.config.base_fare_id.clone()} value={p.base_fare.clone()} />
            if p.layout.is_empty() {
                <p class="muted">{ "No seats available on this trip." }</p>
            } else {
                { decks }
            }
            <dl class="seat-summary" aria-live="polite">
                <dt>{ "Selected seats" }</dt>
                <dd id={p.config.selected_seats_id.clone()}>{ rendered.summary_text }</dd>
                <dt>{ "Total fare" }</dt>
                <dd id={p.config.total_fare_id.clone()}>{ rendered.total_text }</dd>
            </dl>
        </div>
    }
}
