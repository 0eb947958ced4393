use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::NewTask;
use crate::tui::app::{App, FORM_FIELDS, FormState, Mode, ToastKind};

/// New-task form. The quick variant only takes a title; the full form tabs
/// through every field. Enter submits from any field.
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.form = None;
            app.mode = Mode::Normal;
            return;
        }
        KeyCode::Enter => {
            submit(app);
            return;
        }
        _ => {}
    }

    let Some(form) = &mut app.form else {
        app.mode = Mode::Normal;
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            if !form.quick {
                form.field = (form.field + 1) % FORM_FIELDS.len();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if !form.quick {
                form.field = (form.field + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
            }
        }
        KeyCode::Left if is_priority_field(form) => {
            // cycle() steps forward; three forward steps is one back
            form.priority = form.priority.cycle().cycle().cycle();
        }
        KeyCode::Right if is_priority_field(form) => {
            form.priority = form.priority.cycle();
        }
        KeyCode::Backspace => {
            if let Some(buffer) = text_buffer(form) {
                buffer.pop();
            }
            form.error = None;
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = text_buffer(form) {
                buffer.push(c);
            }
            form.error = None;
        }
        _ => {}
    }
}

fn is_priority_field(form: &FormState) -> bool {
    !form.quick && FORM_FIELDS[form.field] == "priority"
}

fn text_buffer(form: &mut FormState) -> Option<&mut String> {
    if form.quick {
        return Some(&mut form.title);
    }
    match FORM_FIELDS[form.field] {
        "title" => Some(&mut form.title),
        "project" => Some(&mut form.project),
        "assignee" => Some(&mut form.assignee),
        "deadline" => Some(&mut form.deadline),
        "notes" => Some(&mut form.notes),
        _ => None,
    }
}

fn submit(app: &mut App) {
    let Some(form) = &app.form else {
        app.mode = Mode::Normal;
        return;
    };

    let title = form.title.trim().to_string();
    if title.is_empty() {
        if let Some(form) = &mut app.form {
            form.error = Some("title is required".to_string());
        }
        return;
    }

    let deadline_text = form.deadline.trim().to_string();
    let deadline = if deadline_text.is_empty() {
        None
    } else {
        match NaiveDate::parse_from_str(&deadline_text, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                if let Some(form) = &mut app.form {
                    form.error = Some("deadline must be YYYY-MM-DD".to_string());
                }
                return;
            }
        }
    };

    let Some(form) = app.form.take() else {
        return;
    };
    app.mode = Mode::Normal;

    let mut draft = NewTask::titled(title.clone());
    draft.project = form.project.trim().to_string();
    draft.assignee = form.assignee.trim().to_string();
    draft.priority = Some(form.priority);
    draft.deadline = deadline;
    draft.notes = form.notes.trim().to_string();

    // Register any new reference names alongside the task
    if !draft.project.is_empty() {
        app.store.add_project(draft.project.clone());
    }
    if !draft.assignee.is_empty() {
        app.store.add_assignee(draft.assignee.clone());
    }

    app.store.add_task(draft);
    let new_idx = app.store.tasks.len() - 1;
    app.save(false);
    app.refresh_visible();
    app.focus_task(new_idx);
    app.show_toast(format!("added \"{title}\""), ToastKind::Success);
}
