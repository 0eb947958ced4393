use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Priority;
use crate::tui::app::{App, Mode};

/// Filter bar: three dropdown-style fields (assignee, project, priority).
/// h/l moves between fields, j/k cycles the options, `c` clears everything.
/// The visible set updates on every change.
pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            app.filter_field = app.filter_field.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
            app.filter_field = (app.filter_field + 1).min(2);
        }
        KeyCode::Char('j') | KeyCode::Down => cycle_current(app, 1),
        KeyCode::Char('k') | KeyCode::Up => cycle_current(app, -1),
        KeyCode::Char('c') => {
            app.filters.clear();
            app.refresh_visible();
        }
        _ => {}
    }
}

fn cycle_current(app: &mut App, dir: isize) {
    match app.filter_field {
        0 => {
            let options: Vec<Option<String>> = std::iter::once(None)
                .chain(app.store.assignees.iter().cloned().map(Some))
                .collect();
            app.filters.assignee = step(&options, &app.filters.assignee, dir);
        }
        1 => {
            let options: Vec<Option<String>> = std::iter::once(None)
                .chain(app.store.projects.iter().cloned().map(Some))
                .collect();
            app.filters.project = step(&options, &app.filters.project, dir);
        }
        _ => {
            let options: Vec<Option<Priority>> = std::iter::once(None)
                .chain(Priority::ALL.iter().copied().map(Some))
                .collect();
            app.filters.priority = step(&options, &app.filters.priority, dir);
        }
    }
    app.refresh_visible();
}

/// Advance within an option list, wrapping at both ends. The first slot is
/// always None ("any").
fn step<T: Clone + PartialEq>(options: &[Option<T>], current: &Option<T>, dir: isize) -> Option<T> {
    let pos = options.iter().position(|o| o == current).unwrap_or(0);
    let len = options.len() as isize;
    let next = (pos as isize + dir).rem_euclid(len) as usize;
    options[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn step_wraps_both_directions() {
        let options = vec![None, Some("a"), Some("b")];
        assert_eq!(step(&options, &None, 1), Some("a"));
        assert_eq!(step(&options, &None, -1), Some("b"));
        assert_eq!(step(&options, &Some("b"), 1), None);
    }

    #[test]
    fn step_with_stale_value_restarts_from_any() {
        // A selection whose option disappeared (deleted assignee) falls
        // back to the head of the list
        let options = vec![None, Some("a")];
        assert_eq!(step(&options, &Some("gone"), 1), Some("a"));
    }
}
