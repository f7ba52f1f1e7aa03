//! Host page abstraction and the seat selection view bound to it.
use crate::config::ViewConfig;
use crate::fare::BaseFare;
use crate::selection::Rendered;
use thiserror::Error;

/// Access to the page markup hosting the seat controls.
/// Platform-specific implementations should provide this.
pub trait SeatPage {
    type Control;
    type Label;
    type Text;

    /// All seat controls matching `selector`, in document order.
    fn controls(&self, selector: &str) -> Vec<Self::Control>;

    fn control_id(&self, control: &Self::Control) -> String;

    fn attribute(&self, control: &Self::Control, name: &str) -> Option<String>;

    fn is_checked(&self, control: &Self::Control) -> bool;

    /// The label whose `for` reference names `control_id`.
    fn label_for(&self, control_id: &str) -> Option<Self::Label>;

    fn set_marker(&self, label: &Self::Label, class: &str, on: bool);

    /// Current value of the input with element id `id`.
    fn input_value(&self, id: &str) -> Option<String>;

    fn text_target(&self, id: &str) -> Option<Self::Text>;

    fn write_text(&self, target: &Self::Text, text: &str);
}

/// Raised when a required display target is missing at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("display target #{id} is missing")]
    MissingTarget { id: String },
}

/// A control with its label and seat number resolved once at mount time.
pub struct BoundSeat<P: SeatPage> {
    pub control: P::Control,
    pub label: Option<P::Label>,
    pub seat_number: String,
}

/// Seat selection bound to a page: recomputes the summary and total fare
/// from the controls' checked state.
pub struct SeatSelectionView<P: SeatPage> {
    page: P,
    base_fare: BaseFare,
    seats: Vec<BoundSeat<P>>,
    summary_target: P::Text,
    total_target: P::Text,
    marker_class: String,
    empty_text: String,
    separator: String,
}

impl<P: SeatPage> SeatSelectionView<P> {
    /// Resolve every control, label and target, and read the base fare once.
    ///
    /// Does not render; call [`Self::recompute`] for the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::MissingTarget`] if either output target is absent.
    pub fn mount(page: P, config: &ViewConfig) -> Result<Self, MountError> {
        let target = |id: &str| {
            page.text_target(id)
                .ok_or_else(|| MountError::MissingTarget { id: id.to_string() })
        };
        let summary_target = target(&config.selected_seats_id)?;
        let total_target = target(&config.total_fare_id)?;

        let base_fare = BaseFare::from_field(page.input_value(&config.base_fare_id).as_deref());

        let seats = page
            .controls(&config.control_selector)
            .into_iter()
            .map(|control| {
                let id = page.control_id(&control);
                let seat_number = page
                    .attribute(&control, &config.seat_number_attr)
                    .unwrap_or_else(|| id.clone());
                BoundSeat {
                    label: page.label_for(&id),
                    control,
                    seat_number,
                }
            })
            .collect();

        Ok(Self {
            page,
            base_fare,
            seats,
            summary_target,
            total_target,
            marker_class: config.marker_class.clone(),
            empty_text: config.empty_text.clone(),
            separator: config.separator.clone(),
        })
    }

    #[must_use]
    pub const fn base_fare(&self) -> BaseFare {
        self.base_fare
    }

    #[must_use]
    pub fn seats(&self) -> &[BoundSeat<P>] {
        &self.seats
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Read every control, toggle label markers and write both outputs.
    pub fn recompute(&self) -> Rendered {
        let snapshot: Vec<(&str, bool)> = self
            .seats
            .iter()
            .map(|seat| (seat.seat_number.as_str(), self.page.is_checked(&seat.control)))
            .collect();

        for (seat, (_, checked)) in self.seats.iter().zip(&snapshot) {
            if let Some(label) = &seat.label {
                self.page.set_marker(label, &self.marker_class, *checked);
            }
        }

        let rendered = Rendered::from_snapshot(
            snapshot.iter().copied(),
            self.base_fare,
            &self.empty_text,
            &self.separator,
        );
        self.page.write_text(&self.summary_target, &rendered.summary_text);
        self.page.write_text(&self.total_target, &rendered.total_text);
        rendered
    }
}
