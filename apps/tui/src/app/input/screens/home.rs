use crate::app::input::helpers::cycle_index;
use crate::app::state::{App, HomeEntry};
use crossterm::event::KeyCode;

pub async fn handle_home_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.home_index = cycle_index(app.home_index, HomeEntry::ALL.len(), false),
        KeyCode::Down => app.home_index = cycle_index(app.home_index, HomeEntry::ALL.len(), true),
        KeyCode::Char('1') => app.open_model_selection(),
        KeyCode::Char('2') => app.open_road_dashboard(),
        KeyCode::Enter => match HomeEntry::ALL.get(app.home_index) {
            Some(HomeEntry::ExpertModels) => app.open_model_selection(),
            Some(HomeEntry::RoadPredictions) => app.open_road_dashboard(),
            Some(HomeEntry::Quit) => app.running = false,
            None => {}
        },
        KeyCode::Char('e') => {
            // Straight to the last chosen model
            if let Err(e) = app.open_expert_dashboard().await {
                log::error!("Could not open the expert dashboard: {e}");
                app.status_message = format!("Could not open the expert dashboard: {e}");
            }
        }
        _ => {}
    }
}
