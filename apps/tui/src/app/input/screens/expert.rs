use crate::app::expert::ExpertFocus;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_expert_input(app: &mut App, key: KeyCode) {
    let Some(dashboard) = app.expert.as_mut() else {
        return;
    };

    match key {
        KeyCode::Esc => {
            app.expert = None;
            app.open_model_selection();
            return;
        }
        KeyCode::Tab => {
            dashboard.focus_next();
            return;
        }
        KeyCode::BackTab => {
            dashboard.focus_previous();
            return;
        }
        KeyCode::Char('p') if dashboard.focus != ExpertFocus::Date => {
            app.submit_expert();
            return;
        }
        _ => {}
    }

    match dashboard.focus {
        ExpertFocus::Map => match key {
            KeyCode::Up => dashboard.map_view.move_cursor(1, 0),
            KeyCode::Down => dashboard.map_view.move_cursor(-1, 0),
            KeyCode::Left => dashboard.map_view.move_cursor(0, -1),
            KeyCode::Right => dashboard.map_view.move_cursor(0, 1),
            KeyCode::Char('+' | '=') => dashboard.map_view.zoom_in(),
            KeyCode::Char('-') => dashboard.map_view.zoom_out(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                dashboard.click_cursor();
            }
            _ => {}
        },
        ExpertFocus::Time => match key {
            KeyCode::Left | KeyCode::Up => dashboard.cycle_time(false),
            KeyCode::Right | KeyCode::Down | KeyCode::Enter => dashboard.cycle_time(true),
            _ => {}
        },
        ExpertFocus::Event => match key {
            KeyCode::Left | KeyCode::Up => dashboard.cycle_event(false),
            KeyCode::Right | KeyCode::Down | KeyCode::Enter => dashboard.cycle_event(true),
            _ => {}
        },
        ExpertFocus::Date => {
            let today = chrono::Local::now().date_naive();
            match key {
                KeyCode::Char(c) => dashboard.push_date_char(c),
                KeyCode::Backspace => dashboard.pop_date_char(),
                KeyCode::Left => dashboard.shift_date(-1, today),
                KeyCode::Right => dashboard.shift_date(1, today),
                KeyCode::Up => dashboard.shift_date(7, today),
                KeyCode::Down => dashboard.shift_date(-7, today),
                KeyCode::Enter => dashboard.focus_next(),
                _ => {}
            }
        }
        ExpertFocus::Submit => {
            if matches!(key, KeyCode::Enter | KeyCode::Char(' ')) {
                app.submit_expert();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppScreen;
    use crate::variant::Variant;

    async fn dashboard_app(variant: Variant) -> App {
        let mut app = App::new();
        app.choose_model(variant)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        app
    }

    #[tokio::test]
    async fn test_enter_on_map_then_submit_queues_a_request() {
        let mut app = dashboard_app(Variant::Randomforest).await;

        handle_expert_input(&mut app, KeyCode::Right);
        handle_expert_input(&mut app, KeyCode::Enter);
        handle_expert_input(&mut app, KeyCode::Char('p'));

        assert_eq!(app.take_commands().len(), 1);
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_submit_without_location_alerts() {
        let mut app = dashboard_app(Variant::Catboost).await;

        handle_expert_input(&mut app, KeyCode::BackTab);
        handle_expert_input(&mut app, KeyCode::Enter);

        assert_eq!(
            app.alert.as_deref(),
            Some("Please select a location on the map first!")
        );
    }

    #[tokio::test]
    async fn test_escape_returns_to_model_selection() {
        let mut app = dashboard_app(Variant::Hybrid).await;
        handle_expert_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::ModelSelection);
        assert!(app.expert.is_none());
    }
}
