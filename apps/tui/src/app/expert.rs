use crate::api::{ApiError, PredictionResult};
use crate::app::display::{ResultsPanel, FAILURE_MESSAGE};
use crate::app::input::helpers::cycle_index;
use crate::app::submit::{SubmitBlocked, SubmitControl, Ticket};
use crate::domain::{CongestionBand, LatLng, LocalEvent};
use crate::map::{LayerColor, MapSelection, MapSurface, MapView, Marker, MarkerId};
use crate::selection::{parse_picker_date, ExpertRequest, SelectionField, SelectionState};
use crate::variant::{DisplayAdapter, Variant};
use chrono::{Days, NaiveDate};

const DATE_INPUT_LEN: usize = 10;

/// Controls reachable with Tab on the expert dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpertFocus {
    Map,
    Time,
    Event,
    Date,
    Submit,
}

#[derive(Debug)]
pub struct ExpertDashboard {
    pub selection: SelectionState,
    pub map_view: MapView,
    pub surface: MapSurface,
    pub map_selection: MapSelection,
    pub focus: ExpertFocus,
    pub time_index: usize,
    pub date_input: String,
    pub submit: SubmitControl,
    pub results: ResultsPanel,
    result_marker: Option<MarkerId>,
}

impl ExpertDashboard {
    pub fn new(variant: Variant) -> Self {
        let profile = variant.profile();
        Self {
            selection: SelectionState::new(variant),
            map_view: MapView::default(),
            surface: MapSurface::default(),
            map_selection: MapSelection::default(),
            focus: ExpertFocus::Map,
            time_index: 0,
            date_input: String::new(),
            submit: SubmitControl::new(profile.submit_label, profile.busy_label),
            results: ResultsPanel::for_variant(variant),
            result_marker: None,
        }
    }

    pub const fn variant(&self) -> Variant {
        self.selection.model()
    }

    pub fn focus_order(&self) -> Vec<ExpertFocus> {
        let layout = self.variant().profile().layout;
        let mut order = vec![ExpertFocus::Map];
        if layout.has_time() {
            order.push(ExpertFocus::Time);
        }
        if layout.event_selector {
            order.push(ExpertFocus::Event);
        }
        if layout.date_picker {
            order.push(ExpertFocus::Date);
        }
        order.push(ExpertFocus::Submit);
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[cycle_index(index, order.len(), true)];
    }

    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[cycle_index(index, order.len(), false)];
    }

    /// Places the location marker at `point`.
    pub fn click_map(&mut self, point: LatLng) -> Marker {
        let mut retained = None;
        let mut keep = |marker: &Marker| retained = Some(marker.id);
        let marker = self.map_selection.handle_click(
            &mut self.surface,
            &mut self.selection,
            point,
            Some(&mut keep),
        );
        self.result_marker = retained;
        marker
    }

    pub fn click_cursor(&mut self) -> Marker {
        self.click_map(self.map_view.cursor)
    }

    pub fn cycle_time(&mut self, forward: bool) {
        let options = self.variant().profile().layout.time_options;
        if options.is_empty() {
            return;
        }
        self.time_index = cycle_index(self.time_index, options.len(), forward);
        self.selection
            .set_field(SelectionField::PredictionTime(options[self.time_index]));
    }

    pub fn cycle_event(&mut self, forward: bool) {
        if !self.variant().profile().layout.event_selector {
            return;
        }
        let current = self.selection.event().unwrap_or_default().index();
        let next = cycle_index(current, LocalEvent::ALL.len(), forward);
        if let Some(event) = LocalEvent::from_index(next) {
            self.selection.set_field(SelectionField::Event(event));
        }
    }

    pub fn push_date_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-') && self.date_input.len() < DATE_INPUT_LEN {
            self.date_input.push(c);
            self.commit_date_input();
        }
    }

    pub fn pop_date_char(&mut self) {
        if self.date_input.pop().is_some() {
            self.commit_date_input();
        }
    }

    /// Moves the picked date by whole days, starting from `today` when empty.
    pub fn shift_date(&mut self, days: i64, today: NaiveDate) {
        let base = self.selection.selected_date().unwrap_or(today);
        let shifted = if days >= 0 {
            base.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            base.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = shifted {
            self.date_input = date.format("%Y-%m-%d").to_string();
            self.selection.set_field(SelectionField::SelectedDate(Some(date)));
        }
    }

    /// The picked date always mirrors the text; partial input clears it.
    fn commit_date_input(&mut self) {
        let date = parse_picker_date(&self.date_input);
        self.selection.set_field(SelectionField::SelectedDate(date));
    }

    /// Validates the selection and marks `ticket` as in flight.
    pub fn begin_submit(&mut self, ticket: Ticket) -> Result<ExpertRequest, SubmitBlocked> {
        if self.submit.is_busy() {
            return Err(SubmitBlocked::InFlight);
        }
        let request = self.selection.to_request()?;
        self.submit.begin(ticket)?;
        log::info!("Submitting {} prediction {ticket}", self.variant().as_str());
        Ok(request)
    }

    /// Applies the reply for `ticket`. Stale tickets are ignored.
    pub fn complete_submit(&mut self, ticket: Ticket, outcome: Result<serde_json::Value, ApiError>) -> bool {
        if !self.submit.finish(ticket) {
            log::debug!("Dropping stale reply for request {ticket}");
            return false;
        }

        let variant = self.variant();
        let shown = outcome
            .and_then(|body| PredictionResult::decode(variant, body))
            .and_then(|result| self.show(variant, &result));

        if let Err(e) = shown {
            log::error!("{} prediction failed: {e}", variant.as_str());
            self.results.show_failure(FAILURE_MESSAGE);
        }
        true
    }

    fn show(&mut self, variant: Variant, result: &PredictionResult) -> Result<(), ApiError> {
        let at = self
            .selection
            .coordinates()
            .unwrap_or(self.map_view.cursor);
        self.results.show_result(variant, at, result)?;

        if let (DisplayAdapter::Standard, PredictionResult::Standard(prediction)) =
            (variant.profile().adapter, result)
        {
            if let Some(id) = self.result_marker {
                let band = CongestionBand::from_level(prediction.predictions.congestion.level);
                self.surface.set_marker_color(id, LayerColor::from(band));
            }
        }
        Ok(())
    }
}
