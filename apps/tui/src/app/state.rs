use crate::app::actions::AppActions;
use crate::app::commands::{Command, Reply};
use crate::app::expert::ExpertDashboard;
use crate::app::roads::RoadDashboard;
use crate::app::submit::{SubmitBlocked, Ticket};
use crate::config::AppConfig;
use crate::domain::Theme;
use crate::variant::Variant;
use color_eyre::Result;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    ModelSelection,
    Expert,
    Roads,
}

/// Entries of the home menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    ExpertModels,
    RoadPredictions,
    Quit,
}

impl HomeEntry {
    pub const ALL: [Self; 3] = [Self::ExpertModels, Self::RoadPredictions, Self::Quit];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExpertModels => "Expert Models",
            Self::RoadPredictions => "Road Dashboard",
            Self::Quit => "Quit",
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    /// Blocking message; dismissed before any other input is handled.
    pub alert: Option<String>,
    pub status_message: String,
    pub theme: Theme,
    pub api_url: String,
    pub home_index: usize,
    pub model_index: usize,
    pub expert: Option<ExpertDashboard>,
    pub roads: Option<RoadDashboard>,
    pub actions: AppActions,
    pub spinner: ThrobberState,
    pub last_frame: Instant,
    commands: Vec<Command>,
    next_ticket: Ticket,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: AppScreen::Home,
            show_help: false,
            alert: None,
            status_message: String::new(),
            theme: Theme::default(),
            api_url: String::new(),
            home_index: 0,
            model_index: 0,
            expert: None,
            roads: None,
            actions: AppActions::new(),
            spinner: ThrobberState::default(),
            last_frame: Instant::now(),
            commands: Vec::new(),
            next_ticket: 0,
        }
    }

    /// Opens the preference store and restores the saved theme.
    ///
    /// A missing database is not fatal; choices then last for the session.
    pub async fn initialize(&mut self, config: &AppConfig) {
        self.api_url.clone_from(&config.api_url);

        match self.actions.initialize(&config.database_url).await {
            Ok(()) => log::info!("Preference store ready"),
            Err(e) => {
                log::warn!("Preference store unavailable: {e}");
                self.status_message = "Preferences will not be saved".to_string();
            }
        }

        match self.actions.theme().await {
            Ok(theme) => self.theme = theme,
            Err(e) => log::warn!("Could not read theme: {e}"),
        }
    }

    /// Advances the spinner while anything is in flight.
    pub fn update(&mut self) {
        let now = Instant::now();
        if self.is_busy() && now.duration_since(self.last_frame) >= SPINNER_INTERVAL {
            self.spinner.calc_next();
            self.last_frame = now;
        }
    }

    pub fn is_busy(&self) -> bool {
        let expert_busy = self.expert.as_ref().is_some_and(|d| d.submit.is_busy());
        let roads_busy = self
            .roads
            .as_ref()
            .is_some_and(|d| d.submit.is_busy() || d.status == crate::app::roads::RoadsStatus::Loading);
        expert_busy || roads_busy
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn open_model_selection(&mut self) {
        self.model_index = 0;
        self.screen = AppScreen::ModelSelection;
    }

    /// Stores the choice and opens the expert dashboard for it.
    pub async fn choose_model(&mut self, variant: Variant) -> Result<()> {
        self.actions.remember_model(variant).await?;
        log::info!("Selected model {}", variant.as_str());
        self.open_expert_dashboard().await?;
        self.status_message = format!(
            "Loading the {} expert dashboard...",
            variant.as_str().to_uppercase()
        );
        Ok(())
    }

    /// Builds the dashboard for whichever model the store holds.
    pub async fn open_expert_dashboard(&mut self) -> Result<()> {
        let variant = self.actions.model_choice().await?;
        self.expert = Some(ExpertDashboard::new(variant));
        self.screen = AppScreen::Expert;
        Ok(())
    }

    pub fn open_road_dashboard(&mut self) {
        let ticket = self.issue_ticket();
        let mut dashboard = RoadDashboard::new();
        dashboard.expect_roads(ticket);
        self.roads = Some(dashboard);
        self.commands.push(Command::FetchRoads { ticket });
        self.screen = AppScreen::Roads;
    }

    /// Leaves a dashboard; replies still in flight for it are dropped.
    pub fn go_home(&mut self) {
        self.expert = None;
        self.roads = None;
        self.screen = AppScreen::Home;
    }

    pub fn submit_expert(&mut self) {
        let ticket = self.issue_ticket();
        let Some(dashboard) = self.expert.as_mut() else {
            return;
        };
        match dashboard.begin_submit(ticket) {
            Ok(request) => self.commands.push(Command::ExpertPredict { ticket, request }),
            Err(blocked) => self.block_submit(blocked),
        }
    }

    pub fn submit_road(&mut self) {
        let ticket = self.issue_ticket();
        let Some(dashboard) = self.roads.as_mut() else {
            return;
        };
        match dashboard.begin_submit(ticket) {
            Ok(request) => self.commands.push(Command::PredictRoad { ticket, request }),
            Err(blocked) => self.block_submit(blocked),
        }
    }

    fn block_submit(&mut self, blocked: SubmitBlocked) {
        match blocked {
            SubmitBlocked::Invalid(reason) => self.alert = Some(reason.to_string()),
            SubmitBlocked::InFlight => self.status_message = blocked.to_string(),
        }
    }

    pub fn handle_reply(&mut self, reply: Reply) {
        let applied = match reply {
            Reply::Expert { ticket, outcome } => self
                .expert
                .as_mut()
                .is_some_and(|d| d.complete_submit(ticket, outcome)),
            Reply::RoadPrediction { ticket, outcome } => self
                .roads
                .as_mut()
                .is_some_and(|d| d.complete_submit(ticket, outcome)),
            Reply::Roads { ticket, outcome } => self
                .roads
                .as_mut()
                .is_some_and(|d| d.roads_loaded(ticket, outcome)),
        };
        if !applied {
            log::debug!("Reply arrived for a screen that is gone");
        }
    }

    pub async fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = self.actions.remember_theme(self.theme).await {
            log::warn!("Could not save theme: {e}");
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::{execute, tests::FakeApi};
    use crate::app::display::{PanelBody, FAILURE_MESSAGE};
    use crate::domain::LatLng;
    use serde_json::json;

    async fn expert_app(variant: Variant) -> App {
        let mut app = App::new();
        app.choose_model(variant).await.unwrap_or_else(|e| panic!("{e}"));
        app
    }

    #[tokio::test]
    async fn test_missing_location_raises_an_alert_and_sends_nothing() {
        let mut app = expert_app(Variant::Xgboost).await;

        app.submit_expert();

        assert_eq!(
            app.alert.as_deref(),
            Some("Please select a location on the map first!")
        );
        assert!(app.take_commands().is_empty());
    }

    #[tokio::test]
    async fn test_forecaster_without_date_names_the_date() {
        let mut app = expert_app(Variant::Lstm).await;
        if let Some(d) = app.expert.as_mut() {
            d.click_map(LatLng::new(12.9, 77.6));
        }

        app.submit_expert();

        assert_eq!(app.alert.as_deref(), Some("Please select a date first!"));
        assert!(app.take_commands().is_empty());
    }

    #[tokio::test]
    async fn test_full_cycle_through_the_fake_service() {
        let api = FakeApi::answering(Ok(json!({
            "predictions": {"congestion": {"label": "Moderate", "level": 0.55}, "avgSpeed": 24.5}
        })));
        let mut app = expert_app(Variant::Hybrid).await;
        if let Some(d) = app.expert.as_mut() {
            d.click_map(LatLng::new(12.93, 77.62));
        }

        app.submit_expert();
        assert!(app.is_busy());
        let commands = app.take_commands();
        assert_eq!(commands.len(), 1);

        for command in commands {
            let reply = execute(&api, command).await;
            app.handle_reply(reply);
        }

        let dashboard = app.expert.as_ref().unwrap_or_else(|| panic!("dashboard closed"));
        assert_eq!(dashboard.submit.label(), "Generate Prediction");
        let PanelBody::Lines(lines) = &dashboard.results.body else {
            panic!("expected result lines");
        };
        assert_eq!(lines[0].to_string(), "Model: HYBRID");
        assert_eq!(api.sent()[0]["predictionTime"], "Next Hour");
    }

    #[tokio::test]
    async fn test_server_error_restores_the_button() {
        let api = FakeApi::answering(Err(crate::api::ApiError::Status(500)));
        let mut app = expert_app(Variant::Catboost).await;
        if let Some(d) = app.expert.as_mut() {
            d.click_cursor();
        }

        app.submit_expert();
        for command in app.take_commands() {
            app.handle_reply(execute(&api, command).await);
        }

        let dashboard = app.expert.as_ref().unwrap_or_else(|| panic!("dashboard closed"));
        assert_eq!(dashboard.results.error(), Some(FAILURE_MESSAGE));
        assert_eq!(dashboard.submit.label(), "Generate Prediction");
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn test_double_submit_queues_one_request() {
        let mut app = expert_app(Variant::Kmeans).await;
        if let Some(d) = app.expert.as_mut() {
            d.click_cursor();
        }

        app.submit_expert();
        app.submit_expert();

        assert_eq!(app.take_commands().len(), 1);
        assert_eq!(app.status_message, "A request is already in flight");
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_reply_after_leaving_is_dropped() {
        let api = FakeApi::answering(Ok(json!({"labels": [], "data": []})));
        let mut app = expert_app(Variant::Xgboost).await;
        if let Some(d) = app.expert.as_mut() {
            d.click_cursor();
        }
        app.submit_expert();
        let commands = app.take_commands();

        app.go_home();
        for command in commands {
            app.handle_reply(execute(&api, command).await);
        }

        assert!(app.expert.is_none());
        assert_eq!(app.screen, AppScreen::Home);
    }

    #[tokio::test]
    async fn test_dashboard_follows_the_stored_choice() {
        let mut app = App::new();
        app.choose_model(Variant::Randomforest)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        app.go_home();

        app.open_expert_dashboard().await.unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            app.expert.as_ref().map(ExpertDashboard::variant),
            Some(Variant::Randomforest)
        );
    }

    #[tokio::test]
    async fn test_road_dashboard_loads_and_predicts() {
        let api = FakeApi::default();
        let mut app = App::new();
        app.open_road_dashboard();
        for command in app.take_commands() {
            app.handle_reply(execute(&api, command).await);
        }

        app.submit_road();
        assert_eq!(
            app.alert.as_deref(),
            Some("Please select a road on the map first!")
        );
        app.alert = None;

        if let Some(d) = app.roads.as_mut() {
            d.select_road(0);
        }
        app.submit_road();
        for command in app.take_commands() {
            app.handle_reply(execute(&api, command).await);
        }

        let dashboard = app.roads.as_ref().unwrap_or_else(|| panic!("dashboard closed"));
        assert_eq!(dashboard.results.heading, "Prediction for MG Road");
        assert!(!app.is_busy());
    }
}
