use crate::domain::{LatLng, LocalEvent, PredictionTime};
use crate::variant::{RequiredField, Variant};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Reasons a submit is refused before any request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a location on the map first!")]
    MissingLocation,
    #[error("Please select a date first!")]
    MissingDate,
    #[error("Please select a road on the map first!")]
    MissingRoad,
}

/// A single overwrite of one selection field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionField {
    Coordinates(LatLng),
    PredictionTime(PredictionTime),
    Event(LocalEvent),
    SelectedDate(Option<NaiveDate>),
}

/// The user's choices on the expert dashboard.
///
/// `model` is fixed at construction. The remaining fields are written by
/// exactly one control each: the map handler owns `coordinates`, the time
/// buttons own `prediction_time`, the event selector owns `event` and the
/// date picker owns `selected_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    model: Variant,
    coordinates: Option<LatLng>,
    prediction_time: PredictionTime,
    event: Option<LocalEvent>,
    selected_date: Option<NaiveDate>,
}

impl SelectionState {
    pub fn new(model: Variant) -> Self {
        let event = model
            .profile()
            .layout
            .event_selector
            .then_some(LocalEvent::None);

        Self {
            model,
            coordinates: None,
            prediction_time: PredictionTime::NextHour,
            event,
            selected_date: None,
        }
    }

    pub const fn model(&self) -> Variant {
        self.model
    }

    pub const fn coordinates(&self) -> Option<LatLng> {
        self.coordinates
    }

    pub const fn prediction_time(&self) -> PredictionTime {
        self.prediction_time
    }

    pub const fn event(&self) -> Option<LocalEvent> {
        self.event
    }

    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn set_field(&mut self, field: SelectionField) {
        match field {
            SelectionField::Coordinates(point) => self.coordinates = Some(point),
            SelectionField::PredictionTime(time) => self.prediction_time = time,
            SelectionField::Event(event) => self.event = Some(event),
            SelectionField::SelectedDate(date) => self.selected_date = date,
        }
    }

    pub fn validate_for_submit(&self) -> Result<(), ValidationError> {
        if self.coordinates.is_none() {
            return Err(ValidationError::MissingLocation);
        }
        if self.model.requires(RequiredField::SelectedDate) && self.selected_date.is_none() {
            return Err(ValidationError::MissingDate);
        }
        Ok(())
    }

    /// Validates and builds the body for `POST /api/expert-predict`.
    ///
    /// Only the keys the variant's controls expose are included.
    pub fn to_request(&self) -> Result<ExpertRequest, ValidationError> {
        self.validate_for_submit()?;
        let coordinates = self.coordinates.ok_or(ValidationError::MissingLocation)?;
        let layout = self.model.profile().layout;

        Ok(ExpertRequest {
            model: self.model,
            coordinates,
            prediction_time: layout.has_time().then_some(self.prediction_time),
            event: if layout.event_selector { self.event } else { None },
            selected_date: if layout.date_picker {
                self.selected_date
                    .map(|date| date.format("%Y-%m-%d").to_string())
            } else {
                None
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertRequest {
    pub model: Variant,
    pub coordinates: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_time: Option<PredictionTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<LocalEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<String>,
}

/// Parses the date picker's text, accepting only `YYYY-MM-DD`.
pub fn parse_picker_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(value: &str) -> NaiveDate {
        parse_picker_date(value).unwrap_or_default()
    }

    #[test]
    fn every_variant_blocks_without_a_location() {
        for variant in Variant::ALL {
            let state = SelectionState::new(variant);
            assert_eq!(
                state.validate_for_submit(),
                Err(ValidationError::MissingLocation),
                "{variant:?}"
            );
            assert_eq!(
                ValidationError::MissingLocation.to_string(),
                "Please select a location on the map first!"
            );
        }
    }

    #[test]
    fn forecaster_with_location_but_no_date_reports_the_date() {
        let mut state = SelectionState::new(Variant::Lstm);
        state.set_field(SelectionField::Coordinates(LatLng::new(12.9, 77.6)));

        assert_eq!(state.validate_for_submit(), Err(ValidationError::MissingDate));

        state.set_field(SelectionField::SelectedDate(Some(date("2025-03-14"))));
        assert_eq!(state.validate_for_submit(), Ok(()));
    }

    #[test]
    fn forecaster_without_anything_reports_location_first() {
        let state = SelectionState::new(Variant::Lstm);
        assert_eq!(state.validate_for_submit(), Err(ValidationError::MissingLocation));
    }

    #[test]
    fn other_variants_never_require_a_date() {
        for variant in [
            Variant::Xgboost,
            Variant::Catboost,
            Variant::Randomforest,
            Variant::Kmeans,
            Variant::Hybrid,
        ] {
            let mut state = SelectionState::new(variant);
            state.set_field(SelectionField::Coordinates(LatLng::new(12.9, 77.6)));
            assert_eq!(state.validate_for_submit(), Ok(()), "{variant:?}");
        }
    }

    #[test]
    fn coordinates_are_overwritten_not_merged() {
        let mut state = SelectionState::new(Variant::Xgboost);
        state.set_field(SelectionField::Coordinates(LatLng::new(12.90, 77.60)));
        state.set_field(SelectionField::Coordinates(LatLng::new(12.95, 77.55)));

        assert_eq!(state.coordinates(), Some(LatLng::new(12.95, 77.55)));
    }

    #[test]
    fn pattern_request_carries_only_model_and_coordinates() {
        let mut state = SelectionState::new(Variant::Kmeans);
        state.set_field(SelectionField::Coordinates(LatLng::new(12.95, 77.55)));

        let request = state.to_request().unwrap_or_else(|e| panic!("{e}"));
        let body = serde_json::to_value(&request).unwrap_or_default();

        assert_eq!(
            body,
            json!({"model": "kmeans", "coordinates": {"lat": 12.95, "lng": 77.55}})
        );
    }

    #[test]
    fn context_request_includes_time_and_event() {
        let mut state = SelectionState::new(Variant::Catboost);
        state.set_field(SelectionField::Coordinates(LatLng::new(12.9, 77.6)));
        state.set_field(SelectionField::Event(LocalEvent::CricketMatch));

        let body = serde_json::to_value(state.to_request().unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or_default();

        assert_eq!(body["predictionTime"], "Next Hour");
        assert_eq!(body["event"], "Cricket Match");
        assert!(body.get("selectedDate").is_none());
    }

    #[test]
    fn forecast_request_formats_the_date() {
        let mut state = SelectionState::new(Variant::Lstm);
        state.set_field(SelectionField::Coordinates(LatLng::new(12.9, 77.6)));
        state.set_field(SelectionField::SelectedDate(Some(date("2025-03-04"))));

        let body = serde_json::to_value(state.to_request().unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or_default();

        assert_eq!(body["selectedDate"], "2025-03-04");
        assert!(body.get("predictionTime").is_none());
        assert_eq!(body["model"], "lstm");
    }

    #[test]
    fn standard_request_defaults_to_next_hour() {
        let mut state = SelectionState::new(Variant::Hybrid);
        state.set_field(SelectionField::Coordinates(LatLng::new(12.9, 77.6)));
        let request = state.to_request().unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(request.prediction_time, Some(PredictionTime::NextHour));
        assert_eq!(request.event, None);
    }

    #[test]
    fn picker_rejects_malformed_dates() {
        assert!(parse_picker_date("2025-02-30").is_none());
        assert!(parse_picker_date("14/03/2025").is_none());
        assert!(parse_picker_date(" 2025-03-14 ").is_some());
    }
}
