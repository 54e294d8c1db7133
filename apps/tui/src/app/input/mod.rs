pub(crate) mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::{KeyCode, MouseEvent};
use ratatui::layout::Rect;

pub async fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key).await;
}

/// `area` is the full terminal area the last frame was drawn into.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    screens::dispatch_mouse(app, mouse, area);
}
