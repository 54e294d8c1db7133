pub mod layout;
pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use crate::ui::widgets::popup::{render_alert, render_help};
use crate::ui::widgets::theme::palette;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let palette = palette(app.theme);
    if app.theme == crate::domain::Theme::Light {
        f.render_widget(
            Block::default().style(Style::default().bg(ratatui::style::Color::White)),
            f.area(),
        );
    }

    match app.screen {
        AppScreen::Home => screens::home::render_home(app, f, &palette),
        AppScreen::ModelSelection => {
            screens::model_selection::render_model_selection(app, f, &palette);
        }
        AppScreen::Expert => screens::expert::render_expert(app, f, &palette),
        AppScreen::Roads => screens::roads::render_roads(app, f, &palette),
    }

    if app.show_help {
        render_help(f, &palette);
    }
    if let Some(message) = &app.alert {
        render_alert(f, message, &palette);
    }
}
