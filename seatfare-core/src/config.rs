//! Markup contract between the host page and the seat selection view.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a view configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid view config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Selectors, element ids and display strings the view binds to.
///
/// Every field is optional in JSON and falls back to the markup used by the
/// seat-select page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// CSS selector matching every seat checkbox.
    pub control_selector: String,
    /// Attribute carrying a control's seat number.
    pub seat_number_attr: String,
    pub base_fare_id: String,
    pub total_fare_id: String,
    pub selected_seats_id: String,
    /// Class toggled on a label while its seat is selected.
    pub marker_class: String,
    pub empty_text: String,
    pub separator: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            control_selector: ".seat-check".to_string(),
            seat_number_attr: "data-seat-number".to_string(),
            base_fare_id: "baseFare".to_string(),
            total_fare_id: "totalFare".to_string(),
            selected_seats_id: "selectedSeatsText".to_string(),
            marker_class: "selected".to_string(),
            empty_text: "None".to_string(),
            separator: ", ".to_string(),
        }
    }
}

impl ViewConfig {
    /// Load a configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a lookup key is empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every selector and element id is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [
            ("control_selector", &self.control_selector),
            ("seat_number_attr", &self.seat_number_attr),
            ("base_fare_id", &self.base_fare_id),
            ("total_fare_id", &self.total_fare_id),
            ("selected_seats_id", &self.selected_seats_id),
            ("marker_class", &self.marker_class),
        ];
        match keys.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ConfigError::Empty { field: *field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_seat_select_markup() {
        let cfg = ViewConfig::default();
        assert_eq!(cfg.control_selector, ".seat-check");
        assert_eq!(cfg.base_fare_id, "baseFare");
        assert_eq!(cfg.total_fare_id, "totalFare");
        assert_eq!(cfg.selected_seats_id, "selectedSeatsText");
        assert_eq!(cfg.marker_class, "selected");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ViewConfig::from_json(r#"{ "marker_class": "is-picked" }"#).unwrap();
        assert_eq!(cfg.marker_class, "is-picked");
        assert_eq!(cfg.empty_text, "None");
        assert_eq!(cfg.separator, ", ");
    }

    #[test]
    fn rejects_blank_ids_and_bad_json() {
        let err = ViewConfig::from_json(r#"{ "total_fare_id": " " }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Empty { field: "total_fare_id" }));
        assert!(matches!(
            ViewConfig::from_json("{ nope").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
