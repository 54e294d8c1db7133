use crate::domain::{LocalEvent, PredictionTime};
use crate::selection::parse_picker_date;
use crate::variant::Variant;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "traffic-dashboard", version, about = "Traffic prediction dashboard")]
pub struct CliArgs {
    /// Run one expert prediction and print the result
    #[arg(long)]
    pub headless: bool,

    /// Print the headless result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the prediction service URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Override the log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Choose and remember the prediction model
    #[arg(long, value_name = "NAME", value_parser = parse_variant)]
    pub model: Option<Variant>,

    /// Latitude of the location to predict for
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude of the location to predict for
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Prediction horizon ("Next Hour" or "Next 3 Hours")
    #[arg(long, value_parser = parse_time)]
    pub time: Option<PredictionTime>,

    /// Local event for the context-aware model
    #[arg(long, value_parser = parse_event)]
    pub event: Option<LocalEvent>,

    /// Day to forecast, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

fn parse_variant(value: &str) -> Result<Variant, String> {
    Variant::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Variant::ALL.iter().map(|v| v.as_str()).collect();
        format!("unknown model {value:?}, expected one of {}", names.join(", "))
    })
}

fn parse_time(value: &str) -> Result<PredictionTime, String> {
    PredictionTime::parse(value).ok_or_else(|| format!("unknown prediction time {value:?}"))
}

fn parse_event(value: &str) -> Result<LocalEvent, String> {
    LocalEvent::parse(value).ok_or_else(|| format!("unknown event {value:?}"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_picker_date(value).ok_or_else(|| format!("{value:?} is not a YYYY-MM-DD date"))
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("PREDICTION_API_URL", url);
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_flags_parse_into_domain_types() {
        let args = CliArgs::try_parse_from([
            "traffic-dashboard",
            "--headless",
            "--model",
            "catboost",
            "--lat",
            "12.95",
            "--lng",
            "77.55",
            "--event",
            "vip",
            "--time",
            "next hour",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert!(args.headless);
        assert_eq!(args.model, Some(Variant::Catboost));
        assert_eq!(args.event, Some(LocalEvent::VipMovement));
        assert_eq!(args.time, Some(PredictionTime::NextHour));
        assert_eq!(args.lat, Some(12.95));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(CliArgs::try_parse_from(["traffic-dashboard", "--model", "svm"]).is_err());
        assert!(CliArgs::try_parse_from(["traffic-dashboard", "--date", "14/03/2025"]).is_err());
        assert!(CliArgs::try_parse_from(["traffic-dashboard", "--lat", "12.9"]).is_err());
    }

    #[test]
    fn help_lists_the_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--api-url"));
        assert!(help.contains("--headless"));
    }
}
