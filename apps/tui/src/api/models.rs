use crate::api::ApiError;
use crate::domain::{PredictionTime, PredictionType};
use crate::variant::{DisplayAdapter, Variant};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier or short value the backend may send as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireText {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for WireText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Entry of `GET /api/roads`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub id: WireText,
    pub name: String,
}

impl Road {
    /// Stable key used for map layers.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadRequest {
    pub road_id: WireText,
    pub road_name: String,
    pub prediction_time: PredictionTime,
    pub prediction_type: PredictionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Congestion {
    pub label: String,
    pub level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    pub congestion: Congestion,
    pub avg_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_volume: Option<f64>,
}

impl Predictions {
    fn validate(&self) -> Result<(), ApiError> {
        ensure_finite("predictions.congestion.level", self.congestion.level)?;
        ensure_finite("predictions.avgSpeed", self.avg_speed)?;
        if let Some(volume) = self.predicted_volume {
            ensure_finite("predictions.predictedVolume", volume)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRoute {
    pub road_id: WireText,
    pub time_saved: WireText,
}

/// Response of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadPrediction {
    pub predictions: Predictions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_route: Option<AlternativeRoute>,
}

impl RoadPrediction {
    pub fn validate(self) -> Result<Self, ApiError> {
        self.predictions.validate()?;
        Ok(self)
    }
}

/// Parallel label/value arrays as sent for charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl Series {
    fn validate(&self, field: &str) -> Result<(), ApiError> {
        if self.labels.len() != self.data.len() {
            return Err(ApiError::Malformed(format!(
                "{field}: {} labels but {} values",
                self.labels.len(),
                self.data.len()
            )));
        }
        for value in &self.data {
            ensure_finite(field, *value)?;
        }
        Ok(())
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardPrediction {
    pub predictions: Predictions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub traffic_state: String,
    pub color: String,
    pub description: String,
    pub volume_analyzed: f64,
    pub pattern_distribution: Series,
}

/// A backend response checked against the shape its variant expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResult {
    Standard(StandardPrediction),
    Forecast(Series),
    Patterns(PatternReport),
}

impl PredictionResult {
    pub fn decode(variant: Variant, body: serde_json::Value) -> Result<Self, ApiError> {
        match variant.profile().adapter {
            DisplayAdapter::Standard | DisplayAdapter::Speed | DisplayAdapter::Context => {
                let prediction: StandardPrediction = from_body(body)?;
                prediction.predictions.validate()?;
                if let Some(features) = &prediction.feature_importance {
                    features.validate("featureImportance")?;
                }
                Ok(Self::Standard(prediction))
            }
            DisplayAdapter::Forecast => {
                let forecast: Series = from_body(body)?;
                forecast.validate("forecast")?;
                Ok(Self::Forecast(forecast))
            }
            DisplayAdapter::Patterns => {
                let report: PatternReport = from_body(body)?;
                ensure_finite("volumeAnalyzed", report.volume_analyzed)?;
                report.pattern_distribution.validate("patternDistribution")?;
                Ok(Self::Patterns(report))
            }
        }
    }
}

fn from_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn ensure_finite(field: &str, value: f64) -> Result<(), ApiError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ApiError::Malformed(format!("{field} is not a finite number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_shape_decodes_with_optional_fields() -> Result<(), ApiError> {
        let body = json!({
            "predictions": {
                "congestion": {"label": "High", "level": 0.82},
                "avgSpeed": 14.5,
                "predictedVolume": 1200
            }
        });

        let PredictionResult::Standard(prediction) = PredictionResult::decode(Variant::Xgboost, body)?
        else {
            panic!("expected a standard prediction");
        };
        assert_eq!(prediction.predictions.congestion.label, "High");
        assert_eq!(prediction.predictions.predicted_volume, Some(1200.0));
        assert!(prediction.feature_importance.is_none());
        Ok(())
    }

    #[test]
    fn forecast_requires_matching_lengths() {
        let body = json!({"labels": ["00:00", "01:00"], "data": [0.3]});
        let error = PredictionResult::decode(Variant::Lstm, body);
        assert!(matches!(error, Err(ApiError::Malformed(_))));
    }

    #[test]
    fn pattern_report_decodes() -> Result<(), ApiError> {
        let body = json!({
            "trafficState": "Rush Hour",
            "color": "#e94560",
            "description": "Heavy commuter flow",
            "volumeAnalyzed": 5400,
            "patternDistribution": {"labels": ["Free", "Rush"], "data": [60, 40]}
        });

        let PredictionResult::Patterns(report) = PredictionResult::decode(Variant::Kmeans, body)?
        else {
            panic!("expected a pattern report");
        };
        assert_eq!(report.traffic_state, "Rush Hour");
        assert_eq!(report.pattern_distribution.data, vec![60.0, 40.0]);
        Ok(())
    }

    #[test]
    fn missing_nested_field_is_reported_not_panicked() {
        let body = json!({"predictions": {"avgSpeed": 20}});
        let result = PredictionResult::decode(Variant::Hybrid, body);
        assert!(matches!(result, Err(ApiError::Malformed(_))));
    }

    #[test]
    fn forecast_body_is_rejected_for_a_standard_variant() {
        let body = json!({"labels": ["a"], "data": [1.0]});
        assert!(PredictionResult::decode(Variant::Randomforest, body).is_err());
    }

    #[test]
    fn road_ids_keep_their_wire_type() -> Result<(), serde_json::Error> {
        let roads: Vec<Road> =
            serde_json::from_value(json!([{"id": 7, "name": "MG Road"}, {"id": "r-9", "name": "ORR"}]))?;
        assert_eq!(roads[0].key(), "7");
        assert_eq!(roads[1].key(), "r-9");

        let request = RoadRequest {
            road_id: roads[0].id.clone(),
            road_name: roads[0].name.clone(),
            prediction_time: PredictionTime::NextThreeHours,
            prediction_type: PredictionType::Congestion,
        };
        assert_eq!(
            serde_json::to_value(&request)?,
            json!({
                "roadId": 7,
                "roadName": "MG Road",
                "predictionTime": "Next 3 Hours",
                "predictionType": "Congestion"
            })
        );
        Ok(())
    }

    #[test]
    fn road_prediction_with_alternative_route() -> Result<(), Box<dyn std::error::Error>> {
        let prediction: RoadPrediction = serde_json::from_value(json!({
            "predictions": {"congestion": {"label": "Moderate", "level": 0.5}, "avgSpeed": 32},
            "alternativeRoute": {"roadId": 12, "timeSaved": "8 mins"}
        }))?;
        let prediction = prediction.validate()?;

        let route = prediction.alternative_route.ok_or("missing route")?;
        assert_eq!(route.road_id.to_string(), "12");
        assert_eq!(route.time_saved.to_string(), "8 mins");
        Ok(())
    }
}
