use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Mode, ToastKind};

/// Destructive actions require an explicit y/Enter; anything else cancels
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Enter);
    let Some(confirm) = app.confirm.take() else {
        app.mode = Mode::Normal;
        return;
    };
    app.mode = Mode::Normal;
    if !confirmed {
        return;
    }

    match confirm.action {
        ConfirmAction::DeleteTask { task_id } => {
            if let Some(task) = app.store.remove_task(&task_id) {
                app.save(false);
                app.refresh_visible();
                app.show_toast(format!("deleted \"{}\"", task.title), ToastKind::Info);
            }
        }
    }
}
