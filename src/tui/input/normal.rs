use chrono::{Duration, Months};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{CalendarScale, Status, ViewKind};
use crate::tui::app::{
    App, ConfirmAction, ConfirmState, DetailState, FormState, Mode, SettingsState, ToastKind,
};
use crate::view::Carry;

pub(super) fn handle_normal(app: &mut App, key: KeyEvent) {
    // Platform modifier + k: quick add
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('k') = key.code {
            open_form(app, true);
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('1') => switch_view(app, ViewKind::Kanban),
        KeyCode::Char('2') => switch_view(app, ViewKind::List),
        KeyCode::Char('3') => switch_view(app, ViewKind::Calendar),
        KeyCode::Tab => switch_view(app, app.view.cycle()),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('/') => {
            app.search_input = app.active_query.clone().unwrap_or_default();
            app.mode = Mode::Search;
        }
        KeyCode::Char('f') => {
            // Filter and search are mutually exclusive view states
            app.active_query = None;
            app.search_input.clear();
            app.filter_field = 0;
            app.mode = Mode::Filter;
            app.refresh_visible();
        }
        KeyCode::Char('n') => open_form(app, false),
        KeyCode::Char('s') => {
            app.settings = Some(SettingsState {
                cursor: 0,
                adding: None,
            });
            app.mode = Mode::Settings;
        }
        KeyCode::Char('m') if app.view == ViewKind::Kanban => start_move(app),
        KeyCode::Char('d') => request_delete(app),
        KeyCode::Char('D') => duplicate_selected(app),
        KeyCode::Char('t') => match app.view {
            ViewKind::List => {
                app.list_table = !app.list_table;
                app.clamp_cursors();
            }
            ViewKind::Calendar => app.cal_cursor = app.today,
            ViewKind::Kanban => {}
        },
        KeyCode::Char('v') if app.view == ViewKind::Calendar => {
            app.cal_scale = app.cal_scale.cycle();
        }
        KeyCode::Char('[') if app.view == ViewKind::Calendar => month_delta(app, -1),
        KeyCode::Char(']') if app.view == ViewKind::Calendar => month_delta(app, 1),
        KeyCode::Enter => open_detail(app),
        KeyCode::Esc => {
            // Clear an active search, restoring the filter selection
            if app.active_query.is_some() {
                app.active_query = None;
                app.search_input.clear();
                app.refresh_visible();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => nav_left(app),
        KeyCode::Char('l') | KeyCode::Right => nav_right(app),
        KeyCode::Char('j') | KeyCode::Down => nav_down(app),
        KeyCode::Char('k') | KeyCode::Up => nav_up(app),
        _ => {}
    }
}

fn switch_view(app: &mut App, view: ViewKind) {
    app.view = view;
    app.clamp_cursors();
}

fn open_form(app: &mut App, quick: bool) {
    let mut form = FormState::new(quick);
    // Inherit an active project filter as the default project
    if let Some(project) = &app.filters.project {
        form.project = project.clone();
    }
    app.form = Some(form);
    app.mode = Mode::Form;
}

fn open_detail(app: &mut App) {
    if let Some(task_id) = app.selected_task_id() {
        app.detail = Some(DetailState {
            task_id,
            field: 0,
            edit: None,
        });
        app.mode = Mode::Detail;
    }
}

/// Pick up the selected card: the transfer payload is the task id, the
/// initial drop target is its own column
fn start_move(app: &mut App) {
    let Some(idx) = app.selected_task_idx() else {
        return;
    };
    let task = &app.store.tasks[idx];
    app.carry = Some(Carry {
        task_id: task.id.clone(),
        target: task.status,
    });
    app.mode = Mode::Move;
}

fn request_delete(app: &mut App) {
    let Some(idx) = app.selected_task_idx() else {
        return;
    };
    let task = &app.store.tasks[idx];
    app.confirm = Some(ConfirmState {
        action: ConfirmAction::DeleteTask {
            task_id: task.id.clone(),
        },
        message: format!("Delete \"{}\"?", task.title),
    });
    app.mode = Mode::Confirm;
}

fn duplicate_selected(app: &mut App) {
    let Some(task_id) = app.selected_task_id() else {
        return;
    };
    if app.store.duplicate_task(&task_id).is_ok() {
        let new_idx = app.store.tasks.len() - 1;
        app.save(false);
        app.refresh_visible();
        app.focus_task(new_idx);
        app.show_toast("task duplicated", ToastKind::Info);
    }
}

fn month_delta(app: &mut App, delta: i32) {
    let moved = if delta >= 0 {
        app.cal_cursor.checked_add_months(Months::new(delta as u32))
    } else {
        app.cal_cursor.checked_sub_months(Months::new((-delta) as u32))
    };
    if let Some(date) = moved {
        app.cal_cursor = date;
    }
}

fn nav_left(app: &mut App) {
    match app.view {
        ViewKind::Kanban => {
            app.kanban_col = app.kanban_col.saturating_sub(1);
            app.clamp_cursors();
        }
        ViewKind::List => {}
        ViewKind::Calendar => app.cal_cursor -= Duration::days(1),
    }
}

fn nav_right(app: &mut App) {
    match app.view {
        ViewKind::Kanban => {
            app.kanban_col = (app.kanban_col + 1).min(Status::ALL.len() - 1);
            app.clamp_cursors();
        }
        ViewKind::List => {}
        ViewKind::Calendar => app.cal_cursor += Duration::days(1),
    }
}

fn nav_down(app: &mut App) {
    match app.view {
        ViewKind::Kanban => {
            let len = app.board().columns[app.kanban_col].cards.len();
            if app.kanban_row + 1 < len {
                app.kanban_row += 1;
            }
        }
        ViewKind::List => {
            let rows = app.list_rows().len();
            if app.list_cursor + 1 < rows {
                app.list_cursor += 1;
            }
        }
        ViewKind::Calendar => {
            let step = match app.cal_scale {
                CalendarScale::Day => 1,
                _ => 7,
            };
            app.cal_cursor += Duration::days(step);
        }
    }
}

fn nav_up(app: &mut App) {
    match app.view {
        ViewKind::Kanban => app.kanban_row = app.kanban_row.saturating_sub(1),
        ViewKind::List => app.list_cursor = app.list_cursor.saturating_sub(1),
        ViewKind::Calendar => {
            let step = match app.cal_scale {
                CalendarScale::Day => 1,
                _ => 7,
            };
            app.cal_cursor -= Duration::days(step);
        }
    }
}
