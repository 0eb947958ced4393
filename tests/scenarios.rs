use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskdeck::model::{NewTask, Priority, Status, TaskEdit, TaskStore};
use taskdeck::ops::{self, FilterSet};
use taskdeck::sync::{Bridge, FlushOutcome, LoadSource, read_cache};
use taskdeck::view;

// Nothing listens on this port; connections are refused immediately
const DEAD_URL: &str = "http://127.0.0.1:9";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn workspace() -> TaskStore {
    let mut store = TaskStore::default();
    store.add_project("Launch");
    store.add_assignee("Dana Reyes");

    let mut review = NewTask::titled("Design review");
    review.project = "Launch".to_string();
    review.assignee = "Dana Reyes".to_string();
    review.status = Some(Status::Doing);
    review.priority = Some(Priority::P1);
    review.deadline = Some(date(2026, 9, 12));
    store.add_task(review);

    let mut chore = NewTask::titled("Water the plants");
    chore.priority = Some(Priority::P3);
    store.add_task(chore);

    store
}

#[test]
fn one_task_appears_consistently_across_all_three_views() {
    let store = workspace();
    let visible: Vec<usize> = (0..store.tasks.len()).collect();
    let today = date(2026, 9, 1);

    // Kanban: in the doing column
    let board = view::project_kanban(&store, &visible, None);
    assert_eq!(board.column(Status::Doing).cards, vec![0]);

    // List: grouped under its project
    let groups = view::project_grouped(&store, &visible);
    assert_eq!(groups[0].project, "Launch");
    assert_eq!(groups[0].rows, vec![0]);

    // Calendar: on its deadline cell, and nowhere else
    let grid = view::project_month(&store, &visible, date(2026, 9, 12), today);
    let placed: Vec<NaiveDate> = grid
        .weeks
        .iter()
        .flatten()
        .filter(|c| c.tasks.contains(&0))
        .map(|c| c.date)
        .collect();
    assert_eq!(placed, vec![date(2026, 9, 12)]);

    // The undated chore never reaches the calendar
    assert!(!grid.weeks.iter().flatten().any(|c| c.tasks.contains(&1)));
}

#[test]
fn moving_a_card_to_done_pins_progress() {
    let mut store = workspace();
    let id = store.tasks[0].id.clone();
    store
        .update_task(&id, TaskEdit::Progress(40))
        .unwrap();
    store
        .update_task(&id, TaskEdit::Status(Status::Done))
        .unwrap();

    let task = store.task(&id).unwrap();
    assert_eq!(task.progress, 100);

    // Progress edits while done stay pinned
    store.update_task(&id, TaskEdit::Progress(10)).unwrap();
    assert_eq!(store.task(&id).unwrap().progress, 100);

    // Leaving done releases the pin at 100, not the old value
    store
        .update_task(&id, TaskEdit::Status(Status::Review))
        .unwrap();
    store.update_task(&id, TaskEdit::Progress(60)).unwrap();
    assert_eq!(store.task(&id).unwrap().progress, 60);
}

#[test]
fn search_overrides_filters_and_clearing_restores_them() {
    let store = workspace();

    let filters = FilterSet {
        assignee: None,
        project: Some("Launch".to_string()),
        priority: None,
    };
    let filtered = ops::apply_filters(&store, &filters);
    assert_eq!(filtered, vec![0]);

    // Search ignores the filter selection entirely
    let searched = ops::search(&store, "plants");
    assert_eq!(searched, vec![1]);

    // Clearing the query reapplies the kept filter selection
    let restored = ops::apply_filters(&store, &filters);
    assert_eq!(restored, filtered);
}

#[test]
fn outage_keeps_edits_in_the_offline_cache() {
    let dir = TempDir::new().unwrap();
    let mut bridge = Bridge::new(dir.path().to_path_buf(), Some(DEAD_URL)).unwrap();
    let mut store = workspace();

    // Every push fails, but the cache write is synchronous and unconditional
    let outcome = bridge.flush_blocking(&mut store);
    assert!(matches!(outcome, FlushOutcome::LocalOnly { .. }));
    assert!(store.meta.last_sync.is_none());
    assert_eq!(read_cache(dir.path()).unwrap(), store);

    // Next launch with the remote still down recovers the full document
    let reopened = Bridge::new(dir.path().to_path_buf(), Some(DEAD_URL)).unwrap();
    let loaded = reopened.load();
    assert_eq!(loaded.source, LoadSource::Cache);
    assert_eq!(loaded.store, store);
    assert!(loaded.warning.is_some());
}

#[test]
fn duplicate_lands_next_to_the_original_everywhere() {
    let mut store = workspace();
    let id = store.tasks[0].id.clone();
    store.duplicate_task(&id).unwrap();

    let copy = store.tasks.last().unwrap();
    assert_eq!(copy.title, "Design review (Copy)");
    assert_ne!(copy.id, id);
    assert_eq!(copy.status, Status::Doing);
    assert_eq!(copy.deadline, Some(date(2026, 9, 12)));

    // Same column on the board, same group in the list
    let visible: Vec<usize> = (0..store.tasks.len()).collect();
    let board = view::project_kanban(&store, &visible, None);
    assert_eq!(board.column(Status::Doing).cards, vec![0, 2]);
    let groups = view::project_grouped(&store, &visible);
    assert_eq!(groups[0].rows, vec![0, 2]);
}
