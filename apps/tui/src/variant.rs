use crate::domain::PredictionTime;
use serde::{Deserialize, Serialize};

/// The six prediction models offered by the expert dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Xgboost,
    Lstm,
    Catboost,
    Randomforest,
    Kmeans,
    Hybrid,
}

/// Fields that must be present before a variant may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Coordinates,
    SelectedDate,
}

/// Which routine turns a backend response into panel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAdapter {
    Standard,
    Speed,
    Context,
    Forecast,
    Patterns,
}

/// Optional controls shown below the location step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLayout {
    pub time_options: &'static [PredictionTime],
    pub event_selector: bool,
    pub date_picker: bool,
}

impl ControlLayout {
    pub const fn has_time(&self) -> bool {
        !self.time_options.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantProfile {
    pub title: &'static str,
    pub tagline: &'static str,
    pub layout: ControlLayout,
    pub submit_label: &'static str,
    pub busy_label: &'static str,
    pub results_heading: &'static str,
    pub required: &'static [RequiredField],
    pub adapter: DisplayAdapter,
}

const BOTH_HORIZONS: &[PredictionTime] = &[PredictionTime::NextHour, PredictionTime::NextThreeHours];
const NEXT_HOUR_ONLY: &[PredictionTime] = &[PredictionTime::NextHour];
const LOCATION: &[RequiredField] = &[RequiredField::Coordinates];
const LOCATION_AND_DATE: &[RequiredField] = &[RequiredField::Coordinates, RequiredField::SelectedDate];

const STANDARD_LAYOUT: ControlLayout = ControlLayout {
    time_options: BOTH_HORIZONS,
    event_selector: false,
    date_picker: false,
};

const XGBOOST: VariantProfile = VariantProfile {
    title: "XGBoost: Performance Predictor",
    tagline: "Fast congestion and speed estimates for any point",
    layout: STANDARD_LAYOUT,
    submit_label: "Generate Prediction",
    busy_label: "Predicting...",
    results_heading: "Prediction for",
    required: LOCATION,
    adapter: DisplayAdapter::Standard,
};

const LSTM: VariantProfile = VariantProfile {
    title: "LSTM: Future Forecaster",
    tagline: "24-hour congestion forecast for a chosen day",
    layout: ControlLayout {
        time_options: &[],
        event_selector: false,
        date_picker: true,
    },
    submit_label: "Generate Prediction",
    busy_label: "Forecasting...",
    results_heading: "24-Hour Forecast for",
    required: LOCATION_AND_DATE,
    adapter: DisplayAdapter::Forecast,
};

const CATBOOST: VariantProfile = VariantProfile {
    title: "CatBoost: Smart Context Predictor",
    tagline: "Accounts for local events and explains its factors",
    layout: ControlLayout {
        time_options: NEXT_HOUR_ONLY,
        event_selector: true,
        date_picker: false,
    },
    submit_label: "Generate Prediction",
    busy_label: "Predicting...",
    results_heading: "Prediction for",
    required: LOCATION,
    adapter: DisplayAdapter::Context,
};

const RANDOMFOREST: VariantProfile = VariantProfile {
    title: "Random Forest: Speed Specialist",
    tagline: "Focused average-speed predictions",
    layout: STANDARD_LAYOUT,
    submit_label: "Generate Prediction",
    busy_label: "Predicting...",
    results_heading: "Prediction for",
    required: LOCATION,
    adapter: DisplayAdapter::Speed,
};

const KMEANS: VariantProfile = VariantProfile {
    title: "K-Means: Pattern Detective",
    tagline: "Typical historical traffic profiles for an area",
    layout: ControlLayout {
        time_options: &[],
        event_selector: false,
        date_picker: false,
    },
    submit_label: "Find Patterns",
    busy_label: "Finding...",
    results_heading: "Historical Patterns for",
    required: LOCATION,
    adapter: DisplayAdapter::Patterns,
};

const HYBRID: VariantProfile = VariantProfile {
    title: "Hybrid: Ultimate Accuracy Engine",
    tagline: "Blends every model for the most accurate answer",
    layout: STANDARD_LAYOUT,
    submit_label: "Generate Prediction",
    busy_label: "Predicting...",
    results_heading: "Prediction for",
    required: LOCATION,
    adapter: DisplayAdapter::Standard,
};

impl Variant {
    pub const ALL: [Self; 6] = [
        Self::Xgboost,
        Self::Lstm,
        Self::Catboost,
        Self::Randomforest,
        Self::Kmeans,
        Self::Hybrid,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xgboost => "xgboost",
            Self::Lstm => "lstm",
            Self::Catboost => "catboost",
            Self::Randomforest => "randomforest",
            Self::Kmeans => "kmeans",
            Self::Hybrid => "hybrid",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Xgboost),
            1 => Some(Self::Lstm),
            2 => Some(Self::Catboost),
            3 => Some(Self::Randomforest),
            4 => Some(Self::Kmeans),
            5 => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Xgboost => 0,
            Self::Lstm => 1,
            Self::Catboost => 2,
            Self::Randomforest => 3,
            Self::Kmeans => 4,
            Self::Hybrid => 5,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "xgboost" => Some(Self::Xgboost),
            "lstm" => Some(Self::Lstm),
            "catboost" => Some(Self::Catboost),
            "randomforest" => Some(Self::Randomforest),
            "kmeans" => Some(Self::Kmeans),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    /// Resolves a persisted choice, falling back to XGBoost when it is
    /// missing or unrecognized.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub const fn profile(self) -> &'static VariantProfile {
        match self {
            Self::Xgboost => &XGBOOST,
            Self::Lstm => &LSTM,
            Self::Catboost => &CATBOOST,
            Self::Randomforest => &RANDOMFOREST,
            Self::Kmeans => &KMEANS,
            Self::Hybrid => &HYBRID,
        }
    }

    pub fn requires(self, field: RequiredField) -> bool {
        self.profile().required.contains(&field)
    }
}
