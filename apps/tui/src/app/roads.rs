use crate::api::{ApiError, Road, RoadPrediction, RoadRequest};
use crate::app::display::{road_lines, Rendered, ResultsPanel, ROAD_FAILURE_MESSAGE};
use crate::app::input::helpers::cycle_index;
use crate::app::submit::{SubmitBlocked, SubmitControl, Ticket};
use crate::domain::{CongestionBand, LatLng, PredictionTime, PredictionType, CITY_CENTER};
use crate::map::{LayerColor, MapSurface, MapView};
use crate::selection::ValidationError;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoadsStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadFocus {
    Roads,
    Time,
    Type,
    Submit,
}

impl RoadFocus {
    const ORDER: [Self; 4] = [Self::Roads, Self::Time, Self::Type, Self::Submit];
}

/// Per-road prediction screen backed by `/api/roads` and `/api/predict`.
#[derive(Debug)]
pub struct RoadDashboard {
    pub roads: Vec<Road>,
    pub status: RoadsStatus,
    pub filter: String,
    pub filtering: bool,
    pub list_index: usize,
    pub selected: Option<usize>,
    pub surface: MapSurface,
    pub map_view: MapView,
    pub focus: RoadFocus,
    pub prediction_time: PredictionTime,
    pub prediction_type: PredictionType,
    pub submit: SubmitControl,
    pub results: ResultsPanel,
    roads_ticket: Option<Ticket>,
}

impl RoadDashboard {
    pub fn new() -> Self {
        Self {
            roads: Vec::new(),
            status: RoadsStatus::Loading,
            filter: String::new(),
            filtering: false,
            list_index: 0,
            selected: None,
            surface: MapSurface::default(),
            map_view: MapView::default(),
            focus: RoadFocus::Roads,
            prediction_time: PredictionTime::NextHour,
            prediction_type: PredictionType::Congestion,
            submit: SubmitControl::new("Generate Prediction", "Predicting..."),
            results: ResultsPanel::empty("Road Prediction"),
            roads_ticket: None,
        }
    }

    pub fn expect_roads(&mut self, ticket: Ticket) {
        self.status = RoadsStatus::Loading;
        self.roads_ticket = Some(ticket);
    }

    pub fn roads_loaded(&mut self, ticket: Ticket, outcome: Result<Vec<Road>, ApiError>) -> bool {
        if self.roads_ticket != Some(ticket) {
            return false;
        }
        self.roads_ticket = None;

        match outcome {
            Ok(roads) => {
                log::info!("Loaded {} roads", roads.len());
                self.surface.clear_polylines();
                for road in &roads {
                    self.surface.add_polyline(road.key(), placeholder_path(&road.key()));
                }
                self.roads = roads;
                self.status = RoadsStatus::Loaded;
            }
            Err(e) => {
                log::error!("Failed to load roads: {e}");
                self.status = RoadsStatus::Failed(format!("Could not load roads: {e}"));
            }
        }
        self.selected = None;
        self.list_index = 0;
        true
    }

    /// Indices into `roads` matching the filter, best match first.
    pub fn visible_roads(&self) -> Vec<usize> {
        if self.filter.is_empty() {
            return (0..self.roads.len()).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize)> = self
            .roads
            .iter()
            .enumerate()
            .filter_map(|(index, road)| {
                matcher
                    .fuzzy_match(&road.name, &self.filter)
                    .map(|score| (score, index))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, index)| index).collect()
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.list_index = 0;
    }

    pub fn move_list(&mut self, forward: bool) {
        let len = self.visible_roads().len();
        self.list_index = cycle_index(self.list_index, len, forward);
    }

    pub fn selected_road(&self) -> Option<&Road> {
        self.selected.and_then(|index| self.roads.get(index))
    }

    /// Selects the road under the list cursor and highlights it.
    pub fn select_highlighted(&mut self) -> Option<&Road> {
        let index = *self.visible_roads().get(self.list_index)?;
        self.select_road(index)
    }

    pub fn select_road(&mut self, index: usize) -> Option<&Road> {
        let key = self.roads.get(index)?.key();
        self.selected = Some(index);
        self.surface.reset_polyline_colors();
        self.surface.set_polyline_color(&key, LayerColor::Highlight);
        self.roads.get(index)
    }

    /// Selects the road whose drawn path passes closest to `point`.
    pub fn select_nearest(&mut self, point: LatLng) -> Option<&Road> {
        let nearest = self
            .surface
            .polylines()
            .iter()
            .map(|line| {
                let distance = line
                    .points
                    .iter()
                    .map(|p| (p.lat - point.lat).hypot(p.lng - point.lng))
                    .fold(f64::INFINITY, f64::min);
                (distance, line.key.clone())
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))?;
        let index = self.roads.iter().position(|road| road.key() == nearest.1)?;
        self.select_road(index)
    }

    pub fn focus_next(&mut self) {
        let index = RoadFocus::ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = RoadFocus::ORDER[cycle_index(index, RoadFocus::ORDER.len(), true)];
    }

    pub fn focus_previous(&mut self) {
        let index = RoadFocus::ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = RoadFocus::ORDER[cycle_index(index, RoadFocus::ORDER.len(), false)];
    }

    pub fn cycle_time(&mut self) {
        let index = PredictionTime::ALL
            .iter()
            .position(|t| *t == self.prediction_time)
            .unwrap_or(0);
        self.prediction_time = PredictionTime::ALL[cycle_index(index, PredictionTime::ALL.len(), true)];
    }

    pub fn cycle_type(&mut self) {
        let index = PredictionType::ALL
            .iter()
            .position(|t| *t == self.prediction_type)
            .unwrap_or(0);
        self.prediction_type = PredictionType::ALL[cycle_index(index, PredictionType::ALL.len(), true)];
    }

    pub fn begin_submit(&mut self, ticket: Ticket) -> Result<RoadRequest, SubmitBlocked> {
        if self.submit.is_busy() {
            return Err(SubmitBlocked::InFlight);
        }
        let road = self.selected_road().ok_or(ValidationError::MissingRoad)?;
        let request = RoadRequest {
            road_id: road.id.clone(),
            road_name: road.name.clone(),
            prediction_time: self.prediction_time,
            prediction_type: self.prediction_type,
        };
        self.submit.begin(ticket)?;
        log::info!("Requesting prediction {ticket} for {}", request.road_name);
        Ok(request)
    }

    pub fn complete_submit(&mut self, ticket: Ticket, outcome: Result<RoadPrediction, ApiError>) -> bool {
        if !self.submit.finish(ticket) {
            log::debug!("Dropping stale road reply {ticket}");
            return false;
        }

        match outcome {
            Ok(prediction) => {
                if let Some(road) = self.selected_road() {
                    let key = road.key();
                    self.results.heading = format!("Prediction for {}", road.name);
                    let band = CongestionBand::from_level(prediction.predictions.congestion.level);
                    self.surface.set_polyline_color(&key, LayerColor::from(band));
                }
                self.results.show(Rendered {
                    lines: road_lines(&prediction),
                    chart: None,
                });
            }
            Err(e) => {
                log::error!("Road prediction failed: {e}");
                self.results.show_failure(ROAD_FAILURE_MESSAGE);
            }
        }
        true
    }
}

impl Default for RoadDashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// A stable stand-in path for a road, derived from its key.
pub fn placeholder_path(key: &str) -> Vec<LatLng> {
    // FNV-1a
    let hash = key.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    let unit = |shift: u32| f64::from(((hash >> shift) & 0xffff) as u16) / f64::from(u16::MAX) - 0.5;

    let start = LatLng::new(
        CITY_CENTER.lat + unit(0) * 0.1,
        CITY_CENTER.lng + unit(16) * 0.15,
    );
    let heading_lat = unit(32) * 0.04;
    let heading_lng = unit(48) * 0.06;

    (0..4)
        .map(|step| {
            let step = f64::from(step);
            LatLng::new(
                heading_lat.mul_add(step, start.lat),
                heading_lng.mul_add(step, start.lng) + if step == 2.0 { 0.004 } else { 0.0 },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Congestion, Predictions, WireText};

    fn road(id: i64, name: &str) -> Road {
        Road {
            id: WireText::Number(id.into()),
            name: name.to_string(),
        }
    }

    fn loaded() -> RoadDashboard {
        let mut dashboard = RoadDashboard::new();
        dashboard.expect_roads(1);
        dashboard.roads_loaded(
            1,
            Ok(vec![road(1, "MG Road"), road(2, "Outer Ring Road"), road(3, "Hosur Road")]),
        );
        dashboard
    }

    fn prediction(level: f64) -> RoadPrediction {
        RoadPrediction {
            predictions: Predictions {
                congestion: Congestion {
                    label: "Heavy".to_string(),
                    level,
                },
                avg_speed: 11.0,
                predicted_volume: None,
            },
            alternative_route: None,
        }
    }

    #[test]
    fn loaded_roads_get_one_path_each() {
        let dashboard = loaded();
        assert_eq!(dashboard.status, RoadsStatus::Loaded);
        assert_eq!(dashboard.surface.polylines().len(), 3);
        assert_eq!(placeholder_path("2"), placeholder_path("2"));
        assert_ne!(placeholder_path("2"), placeholder_path("3"));
    }

    #[test]
    fn filter_ranks_fuzzy_matches() {
        let mut dashboard = loaded();
        dashboard.set_filter("ring".to_string());
        assert_eq!(dashboard.visible_roads(), vec![1]);

        dashboard.set_filter(String::new());
        assert_eq!(dashboard.visible_roads(), vec![0, 1, 2]);
    }

    #[test]
    fn selecting_highlights_only_that_road() {
        let mut dashboard = loaded();
        dashboard.select_road(0);
        dashboard.move_list(true);
        dashboard.select_highlighted();

        let colors: Vec<LayerColor> = dashboard.surface.polylines().iter().map(|l| l.color).collect();
        assert_eq!(colors, vec![LayerColor::Default, LayerColor::Highlight, LayerColor::Default]);
    }

    #[test]
    fn nearest_click_picks_a_drawn_road() {
        let mut dashboard = loaded();
        let on_road = dashboard.surface.polylines()[2].points[1];
        let name = dashboard.select_nearest(on_road).map(|r| r.name.clone());
        assert_eq!(name.as_deref(), Some("Hosur Road"));
    }

    #[test]
    fn submit_requires_a_road() {
        let mut dashboard = loaded();
        assert_eq!(
            dashboard.begin_submit(5),
            Err(SubmitBlocked::Invalid(ValidationError::MissingRoad))
        );
    }

    #[test]
    fn reply_recolors_the_road() {
        let mut dashboard = loaded();
        dashboard.select_road(2);
        let request = dashboard.begin_submit(5).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(request.road_name, "Hosur Road");

        assert!(dashboard.complete_submit(5, Ok(prediction(0.8))));
        assert_eq!(dashboard.surface.polylines()[2].color, LayerColor::Red);
        assert_eq!(dashboard.results.heading, "Prediction for Hosur Road");
        assert_eq!(dashboard.submit.label(), "Generate Prediction");
    }

    #[test]
    fn failed_reply_keeps_the_server_hint() {
        let mut dashboard = loaded();
        dashboard.select_road(0);
        dashboard.begin_submit(6).unwrap_or_else(|e| panic!("{e}"));
        dashboard.complete_submit(6, Err(ApiError::Transport("refused".to_string())));
        assert_eq!(dashboard.results.error(), Some(ROAD_FAILURE_MESSAGE));
    }

    #[test]
    fn stale_road_list_is_ignored() {
        let mut dashboard = RoadDashboard::new();
        dashboard.expect_roads(2);
        assert!(!dashboard.roads_loaded(1, Ok(vec![road(9, "Old")])));
        assert_eq!(dashboard.status, RoadsStatus::Loading);
    }
}
