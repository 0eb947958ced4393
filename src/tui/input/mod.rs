mod confirm;
mod detail;
mod filter;
mod form;
mod move_mode;
mod normal;
mod search;
mod settings;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay: any key dismisses it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Normal => normal::handle_normal(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::Filter => filter::handle_filter(app, key),
        Mode::Move => move_mode::handle_move(app, key),
        Mode::Form => form::handle_form(app, key),
        Mode::Detail => detail::handle_detail(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
        Mode::Settings => settings::handle_settings(app, key),
    }
}
