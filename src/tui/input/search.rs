use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Live search: the visible set tracks the buffer keystroke by keystroke.
/// Enter commits the query and returns to Normal; Esc abandons it and the
/// last-known filter selection comes back.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.active_query = None;
            app.mode = Mode::Normal;
            app.refresh_visible();
        }
        KeyCode::Enter => {
            app.active_query = if app.search_input.is_empty() {
                None
            } else {
                Some(app.search_input.clone())
            };
            app.mode = Mode::Normal;
            app.refresh_visible();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            apply_live(app);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            apply_live(app);
        }
        _ => {}
    }
}

fn apply_live(app: &mut App) {
    // An emptied buffer falls back to the filter selection immediately
    app.active_query = if app.search_input.is_empty() {
        None
    } else {
        Some(app.search_input.clone())
    };
    app.refresh_visible();
}
