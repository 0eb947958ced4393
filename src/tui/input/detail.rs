use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{Status, TaskEdit};
use crate::tui::app::{App, DetailField, DetailState, Mode, ToastKind};

/// Detail editor for a single task. j/k moves between fields; Enter opens
/// an edit buffer on text fields; h/l steps enum fields and progress in
/// place. In-place steps persist immediately.
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    let Some(mut detail) = app.detail.take() else {
        app.mode = Mode::Normal;
        return;
    };
    // The task can vanish under an open editor (sync replaced the store)
    if app.store.task(&detail.task_id).is_none() {
        app.mode = Mode::Normal;
        return;
    }

    if detail.edit.is_some() {
        handle_editing(app, &mut detail, key);
        app.detail = Some(detail);
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.mode = Mode::Normal;
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            detail.field = (detail.field + 1).min(DetailField::ALL.len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            detail.field = detail.field.saturating_sub(1);
        }
        KeyCode::Enter => {
            let field = DetailField::ALL[detail.field];
            if field.is_text()
                && let Some(task) = app.store.task(&detail.task_id)
            {
                detail.edit = Some(field.value(task));
            }
        }
        KeyCode::Char('h') | KeyCode::Left => adjust(app, &detail, -1),
        KeyCode::Char('l') | KeyCode::Right => adjust(app, &detail, 1),
        _ => {}
    }
    app.detail = Some(detail);
}

fn handle_editing(app: &mut App, detail: &mut DetailState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => detail.edit = None,
        KeyCode::Enter => commit_edit(app, detail),
        KeyCode::Backspace => {
            if let Some(buffer) = &mut detail.edit {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = &mut detail.edit {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

fn commit_edit(app: &mut App, detail: &mut DetailState) {
    let Some(buffer) = detail.edit.clone() else {
        return;
    };
    let text = buffer.trim().to_string();

    let edit = match DetailField::ALL[detail.field] {
        DetailField::Title => {
            if text.is_empty() {
                app.show_toast("title cannot be empty", ToastKind::Error);
                return;
            }
            TaskEdit::Title(text)
        }
        DetailField::Project => {
            if !text.is_empty() {
                app.store.add_project(text.clone());
            }
            TaskEdit::Project(text)
        }
        DetailField::Assignee => {
            if !text.is_empty() {
                app.store.add_assignee(text.clone());
            }
            TaskEdit::Assignee(text)
        }
        DetailField::Deadline => {
            if text.is_empty() {
                TaskEdit::Deadline(None)
            } else {
                match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                    Ok(date) => TaskEdit::Deadline(Some(date)),
                    Err(_) => {
                        app.show_toast("deadline must be YYYY-MM-DD", ToastKind::Error);
                        return;
                    }
                }
            }
        }
        DetailField::NextAction => TaskEdit::NextAction(text),
        DetailField::Notes => TaskEdit::Notes(text),
        // h/l fields never open an edit buffer
        _ => return,
    };

    if app.store.update_task(&detail.task_id, edit).is_ok() {
        app.save(false);
        app.refresh_visible();
    }
    detail.edit = None;
}

/// Step a non-text field in place and persist
fn adjust(app: &mut App, detail: &DetailState, dir: isize) {
    let Some(task) = app.store.task(&detail.task_id) else {
        return;
    };

    let edit = match DetailField::ALL[detail.field] {
        DetailField::Status => {
            let col = task.status.column() as isize + dir;
            let col = col.clamp(0, Status::ALL.len() as isize - 1) as usize;
            if Status::ALL[col] == task.status {
                return;
            }
            TaskEdit::Status(Status::ALL[col])
        }
        DetailField::Priority => {
            let next = if dir >= 0 {
                task.priority.cycle()
            } else {
                task.priority.cycle().cycle().cycle()
            };
            TaskEdit::Priority(next)
        }
        DetailField::Effort => {
            let next = if dir >= 0 {
                task.effort.cycle()
            } else {
                task.effort.cycle().cycle()
            };
            TaskEdit::Effort(next)
        }
        DetailField::Progress => {
            let next = if dir >= 0 {
                task.progress.saturating_add(10).min(100)
            } else {
                task.progress.saturating_sub(10)
            };
            TaskEdit::Progress(next)
        }
        _ => return,
    };

    if app.store.update_task(&detail.task_id, edit).is_ok() {
        app.save(false);
        app.refresh_visible();
    }
}
