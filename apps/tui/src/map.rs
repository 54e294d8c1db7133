use crate::domain::{CongestionBand, LatLng, CITY_CENTER};
use crate::selection::{SelectionField, SelectionState};
use ratatui::layout::Rect;

/// Colors a map layer can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerColor {
    Default,
    Highlight,
    Green,
    Orange,
    Red,
}

impl From<CongestionBand> for LayerColor {
    fn from(band: CongestionBand) -> Self {
        match band {
            CongestionBand::Light => Self::Green,
            CongestionBand::Moderate => Self::Orange,
            CongestionBand::Heavy => Self::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LatLng,
    pub color: LayerColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub key: String,
    pub points: Vec<LatLng>,
    pub color: LayerColor,
}

/// Everything drawn on top of the map grid.
#[derive(Debug, Default)]
pub struct MapSurface {
    markers: Vec<Marker>,
    polylines: Vec<Polyline>,
    next_marker_id: u64,
}

impl MapSurface {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn add_marker(&mut self, position: LatLng) -> Marker {
        self.next_marker_id += 1;
        let marker = Marker {
            id: MarkerId(self.next_marker_id),
            position,
            color: LayerColor::Default,
        };
        self.markers.push(marker);
        marker
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|marker| marker.id != id);
        self.markers.len() != before
    }

    pub fn set_marker_color(&mut self, id: MarkerId, color: LayerColor) -> bool {
        self.markers
            .iter_mut()
            .find(|marker| marker.id == id)
            .map(|marker| marker.color = color)
            .is_some()
    }

    pub fn add_polyline(&mut self, key: impl Into<String>, points: Vec<LatLng>) {
        self.polylines.push(Polyline {
            key: key.into(),
            points,
            color: LayerColor::Default,
        });
    }

    pub fn clear_polylines(&mut self) {
        self.polylines.clear();
    }

    pub fn set_polyline_color(&mut self, key: &str, color: LayerColor) -> bool {
        self.polylines
            .iter_mut()
            .find(|line| line.key == key)
            .map(|line| line.color = color)
            .is_some()
    }

    pub fn reset_polyline_colors(&mut self) {
        for line in &mut self.polylines {
            line.color = LayerColor::Default;
        }
    }
}

const DEFAULT_SPAN_LAT: f64 = 0.16;
const DEFAULT_SPAN_LNG: f64 = 0.24;
const MIN_SPAN_LAT: f64 = 0.01;
const MAX_SPAN_LAT: f64 = 2.0;
/// Cursor moves this fraction of the visible span per key press.
const CURSOR_STEP: f64 = 1.0 / 40.0;

/// Visible window of the map plus the keyboard crosshair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub span_lat: f64,
    pub span_lng: f64,
    pub cursor: LatLng,
}

impl Default for MapView {
    fn default() -> Self {
        Self::centered_on(CITY_CENTER)
    }
}

impl MapView {
    pub const fn centered_on(center: LatLng) -> Self {
        Self {
            center,
            span_lat: DEFAULT_SPAN_LAT,
            span_lng: DEFAULT_SPAN_LNG,
            cursor: center,
        }
    }

    pub fn lat_bounds(&self) -> [f64; 2] {
        [
            self.center.lat - self.span_lat / 2.0,
            self.center.lat + self.span_lat / 2.0,
        ]
    }

    pub fn lng_bounds(&self) -> [f64; 2] {
        [
            self.center.lng - self.span_lng / 2.0,
            self.center.lng + self.span_lng / 2.0,
        ]
    }

    pub fn contains(&self, point: LatLng) -> bool {
        let [lat_min, lat_max] = self.lat_bounds();
        let [lng_min, lng_max] = self.lng_bounds();
        (lat_min..=lat_max).contains(&point.lat) && (lng_min..=lng_max).contains(&point.lng)
    }

    /// Moves the crosshair by whole steps, panning when it leaves the view.
    pub fn move_cursor(&mut self, lat_steps: i32, lng_steps: i32) {
        self.cursor.lat =
            (f64::from(lat_steps) * self.span_lat).mul_add(CURSOR_STEP, self.cursor.lat);
        self.cursor.lng =
            (f64::from(lng_steps) * self.span_lng).mul_add(CURSOR_STEP, self.cursor.lng);
        self.cursor.lat = self.cursor.lat.clamp(-90.0, 90.0);
        self.cursor.lng = self.cursor.lng.clamp(-180.0, 180.0);

        if !self.contains(self.cursor) {
            self.center = self.cursor;
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(0.5);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(2.0);
    }

    fn zoom_by(&mut self, factor: f64) {
        let span_lat = (self.span_lat * factor).clamp(MIN_SPAN_LAT, MAX_SPAN_LAT);
        let applied = span_lat / self.span_lat;
        self.span_lat = span_lat;
        self.span_lng *= applied;
        self.center = self.cursor;
    }

    /// Converts a terminal cell inside `area` into map coordinates.
    pub fn point_at(&self, area: Rect, column: u16, row: u16) -> Option<LatLng> {
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let [lat_min, lat_max] = self.lat_bounds();
        let [lng_min, _] = self.lng_bounds();
        let x_fraction = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let y_fraction = (f64::from(row - area.y) + 0.5) / f64::from(area.height);

        Some(LatLng::new(
            y_fraction.mul_add(-(lat_max - lat_min), lat_max),
            x_fraction.mul_add(self.span_lng, lng_min),
        ))
    }
}

/// Turns map clicks into a coordinate update and a single marker.
#[derive(Debug, Default)]
pub struct MapSelection {
    current: Option<MarkerId>,
    label: Option<String>,
}

impl MapSelection {
    pub const fn current_marker(&self) -> Option<MarkerId> {
        self.current
    }

    /// Text for the "Selected:" line.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("None")
    }

    pub fn handle_click(
        &mut self,
        surface: &mut MapSurface,
        state: &mut SelectionState,
        point: LatLng,
        on_marker_created: Option<&mut dyn FnMut(&Marker)>,
    ) -> Marker {
        log::debug!("map click at {point}");
        state.set_field(SelectionField::Coordinates(point));
        self.label = Some(point.label());

        if let Some(previous) = self.current.take() {
            surface.remove_marker(previous);
        }

        let marker = surface.add_marker(point);
        self.current = Some(marker.id);

        if let Some(callback) = on_marker_created {
            callback(&marker);
        }

        marker
    }
}
