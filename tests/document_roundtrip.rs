use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use taskdeck::model::{
    CalendarScale, NewTask, Priority, Status, TaskEdit, TaskStore, ThemeKind, ViewKind,
};
use taskdeck::sync::{read_cache, write_cache};

fn populated_store() -> TaskStore {
    let mut store = TaskStore::default();
    store.add_project("Launch");
    store.add_project("Platform");
    store.add_assignee("Dana Reyes");
    store.set_theme(ThemeKind::Light);
    store.set_default_view(ViewKind::List);
    store.set_default_calendar_view(CalendarScale::Week);

    let mut draft = NewTask::titled("Design review");
    draft.project = "Launch".to_string();
    draft.assignee = "Dana Reyes".to_string();
    draft.priority = Some(Priority::P1);
    draft.deadline = NaiveDate::from_ymd_opt(2026, 9, 12);
    draft.next_action = "schedule the meeting".to_string();
    draft.notes = "bring the latest mockups".to_string();
    store.add_task(draft);

    let mut done = NewTask::titled("Ship beta");
    done.status = Some(Status::Done);
    store.add_task(done);

    store
}

#[test]
fn cache_round_trip_preserves_the_document() {
    let dir = TempDir::new().unwrap();
    let store = populated_store();

    write_cache(dir.path(), &store).unwrap();
    let loaded = read_cache(dir.path()).expect("cache should be readable");

    assert_eq!(loaded, store);
}

#[test]
fn wire_format_uses_camel_case_keys_and_lowercase_enums() {
    let store = populated_store();
    let value = serde_json::to_value(&store).unwrap();

    // Top-level document shape
    assert!(value.get("meta").is_some());
    assert!(value["meta"].get("lastSync").is_some());
    assert_eq!(value["settings"]["theme"], "light");
    assert_eq!(value["settings"]["defaultView"], "list");
    assert_eq!(value["settings"]["defaultCalendarView"], "week");
    assert_eq!(value["projects"], json!(["Launch", "Platform"]));

    // Task field names
    let task = &value["tasks"][0];
    assert_eq!(task["title"], "Design review");
    assert_eq!(task["status"], "todo");
    assert_eq!(task["priority"], "p1");
    assert_eq!(task["effort"], "medium");
    assert_eq!(task["deadline"], "2026-09-12");
    assert_eq!(task["nextAction"], "schedule the meeting");
    assert!(task.get("createdAt").is_some());
    assert!(task.get("updatedAt").is_some());
    // No snake_case leakage
    assert!(task.get("next_action").is_none());
    assert!(task.get("created_at").is_none());
}

#[test]
fn minimal_document_fills_defaults() {
    // A document written by an older client may omit optional fields
    let value = json!({
        "tasks": [{
            "id": "1",
            "title": "bare minimum",
            "status": "doing",
            "priority": "p2",
            "createdAt": "2026-08-01T10:00:00Z",
            "updatedAt": "2026-08-01T10:00:00Z"
        }]
    });

    let store: TaskStore = serde_json::from_value(value).unwrap();
    assert_eq!(store.tasks.len(), 1);
    let task = &store.tasks[0];
    assert_eq!(task.status, Status::Doing);
    assert_eq!(task.project, "");
    assert_eq!(task.deadline, None);
    assert_eq!(task.progress, 0);
    assert!(task.tags.is_empty());
    assert_eq!(store.settings.theme, ThemeKind::Dark);
    assert!(store.meta.last_sync.is_none());
    assert!(store.projects.is_empty());
}

#[test]
fn corrupt_cache_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cache.json"), "{ not json").unwrap();
    assert!(read_cache(dir.path()).is_none());
}

#[test]
fn edits_survive_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = populated_store();
    let id = store.tasks[0].id.clone();

    store
        .update_task(&id, TaskEdit::Status(Status::Done))
        .unwrap();
    write_cache(dir.path(), &store).unwrap();

    let loaded = read_cache(dir.path()).unwrap();
    let task = loaded.task(&id).unwrap();
    assert_eq!(task.status, Status::Done);
    // Done pins progress at 100, and the pin persists
    assert_eq!(task.progress, 100);
}
