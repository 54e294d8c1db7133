use crate::app::state::{App, AppScreen};
use crate::ui::layout::map_canvas;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

mod expert;
mod help;
mod home;
mod model_selection;
mod roads;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.alert.is_some() {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.alert = None;
        }
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if !is_typing(app) {
        match key {
            KeyCode::Char('q') => {
                app.running = false;
                return;
            }
            KeyCode::Char('t') => {
                app.toggle_theme().await;
                return;
            }
            _ => {}
        }
    }

    match app.screen {
        AppScreen::Home => home::handle_home_input(app, key).await,
        AppScreen::ModelSelection => model_selection::handle_model_selection_input(app, key).await,
        AppScreen::Expert => expert::handle_expert_input(app, key),
        AppScreen::Roads => roads::handle_roads_input(app, key),
    }
}

/// Text entry swallows the global single-letter shortcuts.
fn is_typing(app: &App) -> bool {
    match app.screen {
        AppScreen::Expert => app
            .expert
            .as_ref()
            .is_some_and(|d| d.focus == crate::app::expert::ExpertFocus::Date),
        AppScreen::Roads => app.roads.as_ref().is_some_and(|d| d.filtering),
        AppScreen::Home | AppScreen::ModelSelection => false,
    }
}

pub fn dispatch_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if app.alert.is_some() || app.show_help {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let canvas = map_canvas(area);
    match app.screen {
        AppScreen::Expert => {
            if let Some(dashboard) = app.expert.as_mut() {
                if let Some(point) = dashboard.map_view.point_at(canvas, mouse.column, mouse.row) {
                    dashboard.map_view.cursor = point;
                    dashboard.click_map(point);
                }
            }
        }
        AppScreen::Roads => {
            if let Some(dashboard) = app.roads.as_mut() {
                if let Some(point) = dashboard.map_view.point_at(canvas, mouse.column, mouse.row) {
                    dashboard.map_view.cursor = point;
                    dashboard.select_nearest(point);
                }
            }
        }
        AppScreen::Home | AppScreen::ModelSelection => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;
    use crossterm::event::KeyModifiers;

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn test_alert_blocks_other_keys_until_dismissed() {
        let mut app = App::new();
        app.alert = Some("Please select a location on the map first!".to_string());

        dispatch_input(&mut app, KeyCode::Char('q')).await;
        assert!(app.running);

        dispatch_input(&mut app, KeyCode::Enter).await;
        assert!(app.alert.is_none());

        dispatch_input(&mut app, KeyCode::Char('q')).await;
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_click_inside_the_map_places_the_marker() {
        let mut app = App::new();
        app.choose_model(Variant::Xgboost)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        let area = Rect::new(0, 0, 120, 40);
        let canvas = map_canvas(area);

        dispatch_mouse(&mut app, left_click(canvas.x + 3, canvas.y + 2), area);
        dispatch_mouse(&mut app, left_click(canvas.x + 10, canvas.y + 5), area);

        let dashboard = app.expert.as_ref().unwrap_or_else(|| panic!("no dashboard"));
        assert_eq!(dashboard.surface.markers().len(), 1);
        assert_eq!(
            dashboard.selection.coordinates(),
            Some(dashboard.surface.markers()[0].position)
        );
    }

    #[tokio::test]
    async fn test_click_outside_the_map_is_ignored() {
        let mut app = App::new();
        app.choose_model(Variant::Kmeans)
            .await
            .unwrap_or_else(|e| panic!("{e}"));

        dispatch_mouse(&mut app, left_click(0, 0), Rect::new(0, 0, 120, 40));

        let dashboard = app.expert.as_ref().unwrap_or_else(|| panic!("no dashboard"));
        assert!(dashboard.selection.coordinates().is_none());
    }

    #[tokio::test]
    async fn test_typing_a_date_does_not_quit() {
        let mut app = App::new();
        app.choose_model(Variant::Lstm)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        if let Some(d) = app.expert.as_mut() {
            d.focus = crate::app::expert::ExpertFocus::Date;
        }

        dispatch_input(&mut app, KeyCode::Char('q')).await;
        dispatch_input(&mut app, KeyCode::Char('t')).await;

        assert!(app.running);
        assert_eq!(app.theme, crate::domain::Theme::Dark);
    }
}
