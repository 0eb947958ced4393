use crossterm::event::{KeyCode, KeyEvent};

use crate::model::ThemeKind;
use crate::tui::app::{App, Mode, RefList, SettingsRow, ToastKind};
use crate::tui::theme::Theme;

/// Settings overlay: theme, default views, and the project/assignee
/// reference lists. Settings changes persist with an immediate save since
/// they are rare and cheap.
pub(super) fn handle_settings(app: &mut App, key: KeyEvent) {
    let Some(mut settings) = app.settings.take() else {
        app.mode = Mode::Normal;
        return;
    };

    // Typing a new reference name
    if let Some((list, buffer)) = &mut settings.adding {
        match key.code {
            KeyCode::Esc => settings.adding = None,
            KeyCode::Enter => {
                let list = *list;
                let name = buffer.trim().to_string();
                settings.adding = None;
                if !name.is_empty() {
                    let added = match list {
                        RefList::Projects => app.store.add_project(name),
                        RefList::Assignees => app.store.add_assignee(name),
                    };
                    if added {
                        app.save(true);
                    }
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        app.settings = Some(settings);
        return;
    }

    let rows = app.settings_rows();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
            app.mode = Mode::Normal;
            app.refresh_visible();
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            settings.cursor = (settings.cursor + 1).min(rows.len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            settings.cursor = settings.cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('h')
        | KeyCode::Left => {
            activate(app, &mut settings, &rows);
        }
        KeyCode::Char('d') | KeyCode::Backspace => {
            delete_reference(app, &mut settings, &rows);
        }
        _ => {}
    }
    app.settings = Some(settings);
}

fn activate(app: &mut App, settings: &mut crate::tui::app::SettingsState, rows: &[SettingsRow]) {
    match rows.get(settings.cursor) {
        Some(SettingsRow::Theme) => {
            let kind = match app.store.settings.theme {
                ThemeKind::Dark => ThemeKind::Light,
                ThemeKind::Light => ThemeKind::Dark,
            };
            app.store.set_theme(kind);
            app.theme = Theme::for_kind(kind);
            app.save(true);
        }
        Some(SettingsRow::DefaultView) => {
            let next = app.store.settings.default_view.cycle();
            app.store.set_default_view(next);
            app.save(true);
        }
        Some(SettingsRow::DefaultCalendarView) => {
            let next = app.store.settings.default_calendar_view.cycle();
            app.store.set_default_calendar_view(next);
            app.save(true);
        }
        Some(SettingsRow::AddProject) => {
            settings.adding = Some((RefList::Projects, String::new()));
        }
        Some(SettingsRow::AddAssignee) => {
            settings.adding = Some((RefList::Assignees, String::new()));
        }
        _ => {}
    }
}

fn delete_reference(
    app: &mut App,
    settings: &mut crate::tui::app::SettingsState,
    rows: &[SettingsRow],
) {
    let removed = match rows.get(settings.cursor) {
        Some(SettingsRow::Project(i)) => {
            let name = app.store.projects.get_index(*i).cloned();
            name.map(|n| (app.store.remove_project(&n), n))
        }
        Some(SettingsRow::Assignee(i)) => {
            let name = app.store.assignees.get_index(*i).cloned();
            name.map(|n| (app.store.remove_assignee(&n), n))
        }
        _ => None,
    };

    // Tasks referencing the removed name keep it as a dangling reference
    if let Some((true, name)) = removed {
        app.save(true);
        app.refresh_visible();
        app.show_toast(format!("removed \"{name}\""), ToastKind::Info);
        let rows = app.settings_rows();
        settings.cursor = settings.cursor.min(rows.len() - 1);
    }
}
