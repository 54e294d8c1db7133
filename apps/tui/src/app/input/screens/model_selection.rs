use crate::app::input::helpers::cycle_index;
use crate::app::state::App;
use crate::variant::Variant;
use crossterm::event::KeyCode;

pub async fn handle_model_selection_input(app: &mut App, key: KeyCode) {
    let chosen = match key {
        KeyCode::Up | KeyCode::Left => {
            app.model_index = cycle_index(app.model_index, Variant::ALL.len(), false);
            None
        }
        KeyCode::Down | KeyCode::Right => {
            app.model_index = cycle_index(app.model_index, Variant::ALL.len(), true);
            None
        }
        KeyCode::Enter => Variant::from_index(app.model_index),
        KeyCode::Char(c @ '1'..='6') => c
            .to_digit(10)
            .and_then(|digit| Variant::from_index(digit as usize - 1)),
        KeyCode::Esc => {
            app.go_home();
            None
        }
        _ => None,
    };

    if let Some(variant) = chosen {
        if let Err(e) = app.choose_model(variant).await {
            log::error!("Could not store model choice: {e}");
            app.status_message = format!("Could not store model choice: {e}");
        }
    }
}
