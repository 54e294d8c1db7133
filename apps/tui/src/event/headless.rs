use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::Write;

use crate::api::{PredictionApi, PredictionResult};
use crate::app::actions::AppActions;
use crate::app::display::{adapt, ResultChart, FAILURE_MESSAGE};
use crate::cli::CliArgs;
use crate::domain::LatLng;
use crate::selection::{SelectionField, SelectionState};

/// Runs one expert prediction without a terminal UI.
///
/// Validation and request failures surface as errors carrying the
/// message the dashboard would have shown.
pub async fn run_headless<A: PredictionApi, W: Write>(
    api: &A,
    actions: &mut AppActions,
    args: &CliArgs,
    out: &mut W,
) -> Result<()> {
    let variant = match args.model {
        Some(variant) => {
            actions.remember_model(variant).await?;
            variant
        }
        None => actions.model_choice().await?,
    };
    log::info!("Headless prediction with {}", variant.as_str());

    let state = selection_from_args(variant, args);
    let request = state.to_request().map_err(|e| eyre!("{e}"))?;

    let body = api.expert_predict(&request).await.map_err(|e| {
        log::error!("Prediction request failed: {e}");
        eyre!(FAILURE_MESSAGE)
    })?;
    let result = PredictionResult::decode(variant, body).map_err(|e| {
        log::error!("Prediction response rejected: {e}");
        eyre!(FAILURE_MESSAGE)
    })?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        return Ok(());
    }

    let rendered = adapt(variant, &result)?;
    writeln!(out, "{}", variant.profile().title)?;
    writeln!(
        out,
        "{} {}",
        variant.profile().results_heading,
        request.coordinates.label()
    )?;
    for line in &rendered.lines {
        writeln!(out, "  {line}")?;
    }

    if let Some(chart) = &rendered.chart {
        let (title, series) = match chart {
            ResultChart::Forecast(series) => ("Forecast", series),
            ResultChart::FeatureImportance(series) => ("Prediction Factors", series),
            ResultChart::Patterns(series) => ("Pattern Distribution", series),
        };
        writeln!(out, "{title}:")?;
        for (label, value) in series.points() {
            writeln!(out, "  {label}: {value}")?;
        }
    }

    Ok(())
}

/// Fills a selection through the same setters the dashboard controls use.
fn selection_from_args(variant: crate::variant::Variant, args: &CliArgs) -> SelectionState {
    let layout = variant.profile().layout;
    let mut state = SelectionState::new(variant);

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        state.set_field(SelectionField::Coordinates(LatLng::new(lat, lng)));
    }
    if let Some(time) = args.time {
        if layout.time_options.contains(&time) {
            state.set_field(SelectionField::PredictionTime(time));
        } else {
            log::warn!("{} is not offered by {}, ignoring", time.label(), variant.as_str());
        }
    }
    if let Some(event) = args.event.filter(|_| layout.event_selector) {
        state.set_field(SelectionField::Event(event));
    }
    if let Some(date) = args.date.filter(|_| layout.date_picker) {
        state.set_field(SelectionField::SelectedDate(Some(date)));
    }
    state
}
