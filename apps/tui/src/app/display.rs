use crate::api::models::{PatternReport, Predictions, RoadPrediction, Series, StandardPrediction};
use crate::api::{ApiError, PredictionResult};
use crate::domain::LatLng;
use crate::variant::{DisplayAdapter, Variant};
use std::fmt;

pub const FAILURE_MESSAGE: &str = "Failed to get prediction.";
pub const ROAD_FAILURE_MESSAGE: &str = "Failed to get prediction. Is the server running?";
const PATTERN_PLACEHOLDER: &str =
    "Select a location and click \"Find Patterns\" to see its typical traffic profiles.";

/// One line of result text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultLine {
    Field {
        label: &'static str,
        value: String,
        accent: Option<(u8, u8, u8)>,
    },
    Headline(String),
    Text(String),
}

impl ResultLine {
    fn field(label: &'static str, value: impl Into<String>) -> Self {
        Self::Field {
            label,
            value: value.into(),
            accent: None,
        }
    }
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { label, value, .. } => write!(f, "{label}: {value}"),
            Self::Headline(text) | Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultChart {
    /// Line chart of predicted congestion over the day.
    Forecast(Series),
    /// Horizontal bars titled "Prediction Factors".
    FeatureImportance(Series),
    /// Pie of pattern percentages.
    Patterns(Series),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    Empty,
    Placeholder(String),
    Lines(Vec<ResultLine>),
    Error(String),
}

/// Text and chart produced by a display adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub lines: Vec<ResultLine>,
    pub chart: Option<ResultChart>,
}

/// The results card shown under the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPanel {
    pub visible: bool,
    pub heading: String,
    pub body: PanelBody,
    pub chart: Option<ResultChart>,
}

impl ResultsPanel {
    pub fn for_variant(variant: Variant) -> Self {
        let body = if variant.profile().adapter == DisplayAdapter::Patterns {
            PanelBody::Placeholder(PATTERN_PLACEHOLDER.to_string())
        } else {
            PanelBody::Empty
        };

        Self {
            visible: false,
            heading: variant.profile().results_heading.to_string(),
            body,
            chart: None,
        }
    }

    pub fn empty(heading: &str) -> Self {
        Self {
            visible: false,
            heading: heading.to_string(),
            body: PanelBody::Empty,
            chart: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.body {
            PanelBody::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Replaces text and chart with the adapter output for `variant`.
    pub fn show_result(
        &mut self,
        variant: Variant,
        at: LatLng,
        result: &PredictionResult,
    ) -> Result<(), ApiError> {
        let rendered = adapt(variant, result)?;
        self.heading = format!("{} {}", variant.profile().results_heading, at.label());
        self.show(rendered);
        Ok(())
    }

    pub fn show(&mut self, rendered: Rendered) {
        // Previous chart is dropped here, never kept alongside the new one.
        self.chart = rendered.chart;
        self.body = PanelBody::Lines(rendered.lines);
        self.visible = true;
    }

    /// Shows `message` in place of the text, leaving the chart area alone.
    pub fn show_failure(&mut self, message: &str) {
        self.body = PanelBody::Error(message.to_string());
        self.visible = true;
    }
}

/// Maps a validated response to panel content for `variant`.
pub fn adapt(variant: Variant, result: &PredictionResult) -> Result<Rendered, ApiError> {
    match (variant.profile().adapter, result) {
        (DisplayAdapter::Standard, PredictionResult::Standard(prediction)) => {
            Ok(standard(variant, prediction))
        }
        (DisplayAdapter::Speed, PredictionResult::Standard(prediction)) => {
            Ok(speed(variant, &prediction.predictions))
        }
        (DisplayAdapter::Context, PredictionResult::Standard(prediction)) => Ok(context(prediction)),
        (DisplayAdapter::Forecast, PredictionResult::Forecast(forecast)) => Ok(forecast_view(forecast)),
        (DisplayAdapter::Patterns, PredictionResult::Patterns(report)) => Ok(patterns(report)),
        (adapter, _) => Err(ApiError::Malformed(format!(
            "response shape does not match the {adapter:?} display"
        ))),
    }
}

fn congestion_value(predictions: &Predictions) -> String {
    format!(
        "{} ({})",
        predictions.congestion.label,
        percent(predictions.congestion.level)
    )
}

fn standard(variant: Variant, prediction: &StandardPrediction) -> Rendered {
    let predictions = &prediction.predictions;
    let mut lines = vec![
        ResultLine::field("Model", variant.as_str().to_uppercase()),
        ResultLine::field("Congestion Level", congestion_value(predictions)),
        ResultLine::field("Average Speed", format!("{} km/h", quantity(predictions.avg_speed))),
    ];
    if let Some(volume) = predictions.predicted_volume {
        lines.push(ResultLine::field("Predicted Volume", quantity(volume)));
    }

    Rendered { lines, chart: None }
}

fn speed(variant: Variant, predictions: &Predictions) -> Rendered {
    Rendered {
        lines: vec![
            ResultLine::field("Model", variant.as_str().to_uppercase()),
            ResultLine::Headline(format!("{} km/h", quantity(predictions.avg_speed))),
            ResultLine::Text("Predicted Average Speed".to_string()),
        ],
        chart: None,
    }
}

fn context(prediction: &StandardPrediction) -> Rendered {
    let predictions = &prediction.predictions;
    Rendered {
        lines: vec![
            ResultLine::field("Congestion Level", percent(predictions.congestion.level)),
            ResultLine::field("Average Speed", format!("{} km/h", quantity(predictions.avg_speed))),
        ],
        chart: prediction
            .feature_importance
            .clone()
            .map(ResultChart::FeatureImportance),
    }
}

fn forecast_view(forecast: &Series) -> Rendered {
    let peak = forecast
        .points()
        .max_by(|left, right| left.1.total_cmp(&right.1));

    let lines = peak.map_or_else(
        || vec![ResultLine::Text("The forecast is empty.".to_string())],
        |(label, value)| {
            vec![ResultLine::field(
                "Peak Congestion",
                format!("{} at {label}", percent(value)),
            )]
        },
    );

    Rendered {
        lines,
        chart: Some(ResultChart::Forecast(forecast.clone())),
    }
}

fn patterns(report: &PatternReport) -> Rendered {
    Rendered {
        lines: vec![
            ResultLine::Text(
                "This location typically experiences the following traffic patterns:".to_string(),
            ),
            ResultLine::Field {
                label: "Traffic State",
                value: report.traffic_state.clone(),
                accent: parse_hex_color(&report.color),
            },
            ResultLine::field("Description", report.description.clone()),
            ResultLine::field("Volume Analyzed", quantity(report.volume_analyzed)),
        ],
        chart: Some(ResultChart::Patterns(report.pattern_distribution.clone())),
    }
}

/// Lines for the road dashboard's results card.
pub fn road_lines(prediction: &RoadPrediction) -> Vec<ResultLine> {
    let predictions = &prediction.predictions;
    let mut lines = vec![
        ResultLine::field("Congestion Level", congestion_value(predictions)),
        ResultLine::field("Average Speed", format!("{} km/h", quantity(predictions.avg_speed))),
    ];
    if let Some(route) = &prediction.alternative_route {
        lines.push(ResultLine::field(
            "Alternative Route",
            format!("{} (Saves ~{})", route.road_id, route.time_saved),
        ));
    }
    lines
}

fn percent(level: f64) -> String {
    format!("{}%", quantity(level * 100.0))
}

/// Whole numbers print without decimals, everything else with one.
fn quantity(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Parses `#rrggbb` (or `rrggbb`) into RGB components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Congestion;

    fn standard_result(level: f64, features: Option<Series>) -> PredictionResult {
        PredictionResult::Standard(StandardPrediction {
            predictions: Predictions {
                congestion: Congestion {
                    label: "High".to_string(),
                    level,
                },
                avg_speed: 18.0,
                predicted_volume: None,
            },
            feature_importance: features,
        })
    }

    fn series(labels: &[&str], data: &[f64]) -> Series {
        Series {
            labels: labels.iter().map(ToString::to_string).collect(),
            data: data.to_vec(),
        }
    }

    const HERE: LatLng = LatLng::new(12.9, 77.6);

    #[test]
    fn standard_lines_name_the_model() -> Result<(), ApiError> {
        let rendered = adapt(Variant::Hybrid, &standard_result(0.82, None))?;
        let text: Vec<String> = rendered.lines.iter().map(ToString::to_string).collect();

        assert_eq!(
            text,
            vec![
                "Model: HYBRID",
                "Congestion Level: High (82%)",
                "Average Speed: 18 km/h"
            ]
        );
        assert!(rendered.chart.is_none());
        Ok(())
    }

    #[test]
    fn speed_adapter_headlines_the_speed() -> Result<(), ApiError> {
        let rendered = adapt(Variant::Randomforest, &standard_result(0.3, None))?;
        assert_eq!(rendered.lines[1], ResultLine::Headline("18 km/h".to_string()));
        Ok(())
    }

    #[test]
    fn success_clears_error_and_replaces_chart() -> Result<(), ApiError> {
        let mut panel = ResultsPanel::for_variant(Variant::Catboost);
        let first = standard_result(0.5, Some(series(&["Time", "Event", "Weather"], &[0.5, 0.3, 0.2])));
        panel.show_result(Variant::Catboost, HERE, &first)?;
        panel.show_failure(FAILURE_MESSAGE);
        assert_eq!(panel.error(), Some(FAILURE_MESSAGE));

        let second = standard_result(0.4, Some(series(&["Event"], &[1.0])));
        panel.show_result(Variant::Catboost, HERE, &second)?;

        assert_eq!(panel.error(), None);
        assert_eq!(
            panel.chart,
            Some(ResultChart::FeatureImportance(series(&["Event"], &[1.0])))
        );
        assert_eq!(panel.heading, "Prediction for Lat: 12.9000, Lng: 77.6000");
        Ok(())
    }

    #[test]
    fn result_without_chart_clears_the_old_one() -> Result<(), ApiError> {
        let mut panel = ResultsPanel::for_variant(Variant::Catboost);
        panel.show_result(
            Variant::Catboost,
            HERE,
            &standard_result(0.5, Some(series(&["Time"], &[1.0]))),
        )?;
        panel.show_result(Variant::Catboost, HERE, &standard_result(0.5, None))?;
        assert!(panel.chart.is_none());
        Ok(())
    }

    #[test]
    fn failure_leaves_the_chart_untouched() -> Result<(), ApiError> {
        let mut panel = ResultsPanel::for_variant(Variant::Lstm);
        let forecast = PredictionResult::Forecast(series(&["00:00", "01:00"], &[0.2, 0.9]));
        panel.show_result(Variant::Lstm, HERE, &forecast)?;
        let chart_before = panel.chart.clone();

        panel.show_failure(FAILURE_MESSAGE);

        assert_eq!(panel.chart, chart_before);
        assert!(panel.visible);
        Ok(())
    }

    #[test]
    fn failure_before_any_chart_does_not_invent_one() {
        let mut panel = ResultsPanel::for_variant(Variant::Kmeans);
        panel.show_failure(FAILURE_MESSAGE);
        assert!(panel.chart.is_none());
        assert_eq!(panel.error(), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn forecast_reports_its_peak() -> Result<(), ApiError> {
        let forecast = PredictionResult::Forecast(series(&["06:00", "09:00", "12:00"], &[0.2, 0.95, 0.6]));
        let rendered = adapt(Variant::Lstm, &forecast)?;
        assert_eq!(rendered.lines[0].to_string(), "Peak Congestion: 95% at 09:00");
        Ok(())
    }

    #[test]
    fn pattern_report_carries_its_color() -> Result<(), ApiError> {
        let report = PredictionResult::Patterns(PatternReport {
            traffic_state: "Rush Hour".to_string(),
            color: "#e94560".to_string(),
            description: "Commuters".to_string(),
            volume_analyzed: 5400.0,
            pattern_distribution: series(&["Free", "Rush"], &[60.0, 40.0]),
        });
        let rendered = adapt(Variant::Kmeans, &report)?;

        assert!(matches!(
            rendered.lines[1],
            ResultLine::Field { accent: Some((0xe9, 0x45, 0x60)), .. }
        ));
        assert!(matches!(rendered.chart, Some(ResultChart::Patterns(_))));
        Ok(())
    }

    #[test]
    fn mismatched_shape_is_an_error() {
        let forecast = PredictionResult::Forecast(series(&["a"], &[1.0]));
        assert!(adapt(Variant::Xgboost, &forecast).is_err());
    }

    #[test]
    fn pattern_panel_starts_with_a_hint() {
        let panel = ResultsPanel::for_variant(Variant::Kmeans);
        assert!(matches!(panel.body, PanelBody::Placeholder(_)));
        assert!(!panel.visible);
    }

    #[test]
    fn hex_colors_parse_strictly() {
        assert_eq!(parse_hex_color("#0f3460"), Some((0x0f, 0x34, 0x60)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345g"), None);
    }
}
