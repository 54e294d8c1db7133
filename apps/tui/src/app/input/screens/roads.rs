use crate::app::roads::{RoadFocus, RoadsStatus};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_roads_input(app: &mut App, key: KeyCode) {
    let Some(dashboard) = app.roads.as_mut() else {
        return;
    };

    if dashboard.filtering {
        match key {
            KeyCode::Char(c) => {
                let mut filter = dashboard.filter.clone();
                filter.push(c);
                dashboard.set_filter(filter);
            }
            KeyCode::Backspace => {
                let mut filter = dashboard.filter.clone();
                filter.pop();
                dashboard.set_filter(filter);
            }
            KeyCode::Up => dashboard.move_list(false),
            KeyCode::Down => dashboard.move_list(true),
            KeyCode::Enter => {
                dashboard.select_highlighted();
                dashboard.filtering = false;
            }
            KeyCode::Esc => {
                dashboard.set_filter(String::new());
                dashboard.filtering = false;
            }
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Esc => {
            app.go_home();
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
        KeyCode::Char('/') => {
            dashboard.focus = RoadFocus::Roads;
            dashboard.filtering = true;
            return;
        }
        KeyCode::Char('r') if matches!(dashboard.status, RoadsStatus::Failed(_)) => {
            app.open_road_dashboard();
            return;
        }
        KeyCode::Char('p') => {
            app.submit_road();
            return;
        }
        KeyCode::Char('+' | '=') => {
            dashboard.map_view.zoom_in();
            return;
        }
        KeyCode::Char('-') => {
            dashboard.map_view.zoom_out();
            return;
        }
        _ => {}
    }

    match dashboard.focus {
        RoadFocus::Roads => match key {
            KeyCode::Up => dashboard.move_list(false),
            KeyCode::Down => dashboard.move_list(true),
            KeyCode::Enter | KeyCode::Char(' ') => {
                dashboard.select_highlighted();
            }
            _ => {}
        },
        RoadFocus::Time => {
            if matches!(key, KeyCode::Left | KeyCode::Right | KeyCode::Enter) {
                dashboard.cycle_time();
            }
        }
        RoadFocus::Type => {
            if matches!(key, KeyCode::Left | KeyCode::Right | KeyCode::Enter) {
                dashboard.cycle_type();
            }
        }
        RoadFocus::Submit => {
            if matches!(key, KeyCode::Enter | KeyCode::Char(' ')) {
                app.submit_road();
            }
        }
    }
}
