use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{Status, TaskEdit};
use crate::tui::app::{App, Mode};

/// Move mode: the carried card previews in the target column as h/l
/// retargets it. Enter commits the status change, Esc drops the card back
/// where it was.
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.carry = None;
            app.mode = Mode::Normal;
            app.clamp_cursors();
        }
        KeyCode::Char('h') | KeyCode::Left => retarget(app, -1),
        KeyCode::Char('l') | KeyCode::Right => retarget(app, 1),
        KeyCode::Enter => commit(app),
        _ => {}
    }
}

fn retarget(app: &mut App, delta: isize) {
    let Some(carry) = &mut app.carry else {
        app.mode = Mode::Normal;
        return;
    };
    let col = carry.target.column() as isize + delta;
    let col = col.clamp(0, Status::ALL.len() as isize - 1) as usize;
    carry.target = Status::ALL[col];

    // Keep the cursor on the preview card
    let task_id = carry.task_id.clone();
    app.kanban_col = col;
    if let Some(idx) = app.store.tasks.iter().position(|t| t.id == task_id)
        && let Some((_, row)) = app.board().position_of(idx)
    {
        app.kanban_row = row;
    }
}

fn commit(app: &mut App) {
    let Some(carry) = app.carry.take() else {
        app.mode = Mode::Normal;
        return;
    };
    app.mode = Mode::Normal;

    let changed = app
        .store
        .task(&carry.task_id)
        .is_some_and(|t| t.status != carry.target);
    if changed
        && app
            .store
            .update_task(&carry.task_id, TaskEdit::Status(carry.target))
            .is_ok()
    {
        app.save(false);
    }
    app.refresh_visible();
    if let Some(idx) = app.store.tasks.iter().position(|t| t.id == carry.task_id) {
        app.focus_task(idx);
    }
}
