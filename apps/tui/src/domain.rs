use serde::{Deserialize, Serialize};
use std::fmt;

/// Center of the default map viewport (Bengaluru).
pub const CITY_CENTER: LatLng = LatLng {
    lat: 12.9716,
    lng: 77.5946,
};

/// A point on the map in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Text shown next to "Selected:" and in result headings.
    pub fn label(self) -> String {
        format!("Lat: {:.4}, Lng: {:.4}", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PredictionTime {
    #[default]
    #[serde(rename = "Next Hour")]
    NextHour,
    #[serde(rename = "Next 3 Hours")]
    NextThreeHours,
}

impl PredictionTime {
    pub const ALL: [Self; 2] = [Self::NextHour, Self::NextThreeHours];

    pub const fn label(self) -> &'static str {
        match self {
            Self::NextHour => "Next Hour",
            Self::NextThreeHours => "Next 3 Hours",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "next hour" | "1h" | "1" => Some(Self::NextHour),
            "next 3 hours" | "3h" | "3" => Some(Self::NextThreeHours),
            _ => None,
        }
    }
}

/// Local events the context-aware model can take into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocalEvent {
    #[default]
    None,
    #[serde(rename = "Cricket Match")]
    CricketMatch,
    #[serde(rename = "Public Festival")]
    PublicFestival,
    #[serde(rename = "VIP Movement")]
    VipMovement,
}

impl LocalEvent {
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::CricketMatch,
        Self::PublicFestival,
        Self::VipMovement,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::CricketMatch => "Cricket Match",
            Self::PublicFestival => "Public Festival",
            Self::VipMovement => "VIP Movement",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::None),
            1 => Some(Self::CricketMatch),
            2 => Some(Self::PublicFestival),
            3 => Some(Self::VipMovement),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::CricketMatch => 1,
            Self::PublicFestival => 2,
            Self::VipMovement => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "cricket match" | "cricket" => Some(Self::CricketMatch),
            "public festival" | "festival" => Some(Self::PublicFestival),
            "vip movement" | "vip" => Some(Self::VipMovement),
            _ => None,
        }
    }
}

/// What the road dashboard asks the backend to predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PredictionType {
    #[default]
    Congestion,
    Speed,
}

impl PredictionType {
    pub const ALL: [Self; 2] = [Self::Congestion, Self::Speed];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Congestion => "Congestion",
            Self::Speed => "Speed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Traffic level bucket used to color markers and roads after a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CongestionBand {
    Light,
    Moderate,
    Heavy,
}

impl CongestionBand {
    pub fn from_level(level: f64) -> Self {
        if level > 0.7 {
            Self::Heavy
        } else if level > 0.4 {
            Self::Moderate
        } else {
            Self::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_label_uses_four_decimals() {
        assert_eq!(
            LatLng::new(12.9, 77.600_04).label(),
            "Lat: 12.9000, Lng: 77.6000"
        );
    }

    #[test]
    fn prediction_time_serializes_as_display_text() {
        let json = serde_json::to_string(&PredictionTime::NextThreeHours).unwrap_or_default();
        assert_eq!(json, "\"Next 3 Hours\"");
        assert_eq!(
            PredictionTime::parse("next hour"),
            Some(PredictionTime::NextHour)
        );
    }

    #[test]
    fn local_event_round_trips_through_index() {
        for event in LocalEvent::ALL {
            assert_eq!(LocalEvent::from_index(event.index()), Some(event));
        }
        assert_eq!(LocalEvent::parse("VIP Movement"), Some(LocalEvent::VipMovement));
    }

    #[test]
    fn congestion_bands_follow_thresholds() {
        assert_eq!(CongestionBand::from_level(0.4), CongestionBand::Light);
        assert_eq!(CongestionBand::from_level(0.41), CongestionBand::Moderate);
        assert_eq!(CongestionBand::from_level(0.7), CongestionBand::Moderate);
        assert_eq!(CongestionBand::from_level(0.71), CongestionBand::Heavy);
    }

    #[test]
    fn theme_toggles_and_parses() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
