use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::task::{Effort, NewTask, Priority, Status, Task};

/// Error type for store mutations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(String),
}

/// UI theme selection, persisted in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

/// Which view opens on startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Kanban,
    List,
    Calendar,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Kanban => "kanban",
            ViewKind::List => "list",
            ViewKind::Calendar => "calendar",
        }
    }

    pub fn cycle(self) -> ViewKind {
        match self {
            ViewKind::Kanban => ViewKind::List,
            ViewKind::List => ViewKind::Calendar,
            ViewKind::Calendar => ViewKind::Kanban,
        }
    }
}

/// Calendar view granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarScale {
    #[default]
    Month,
    Week,
    Day,
}

impl CalendarScale {
    pub fn label(self) -> &'static str {
        match self {
            CalendarScale::Month => "month",
            CalendarScale::Week => "week",
            CalendarScale::Day => "day",
        }
    }

    pub fn cycle(self) -> CalendarScale {
        match self {
            CalendarScale::Month => CalendarScale::Week,
            CalendarScale::Week => CalendarScale::Day,
            CalendarScale::Day => CalendarScale::Month,
        }
    }
}

/// Session settings, persisted inside the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeKind,
    #[serde(default)]
    pub default_view: ViewKind,
    #[serde(default)]
    pub default_calendar_view: CalendarScale,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Timestamp of the last confirmed remote write
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

/// One editable field of a task. The interaction layer issues these
/// commands instead of poking at fields directly.
#[derive(Debug, Clone)]
pub enum TaskEdit {
    Title(String),
    Project(String),
    Assignee(String),
    Status(Status),
    Priority(Priority),
    Deadline(Option<NaiveDate>),
    Progress(u8),
    Effort(Effort),
    NextAction(String),
    Notes(String),
    Tags(Vec<String>),
}

/// The authoritative in-memory task collection. This struct *is* the
/// persisted document: serializing it yields the wire format the remote
/// store serves, and its mutation methods are the only write surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaskStore {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub settings: Settings,
    /// Insertion-ordered reference list; tasks point into it by name
    #[serde(default)]
    pub projects: IndexSet<String>,
    #[serde(default)]
    pub assignees: IndexSet<String>,
    /// Insertion order, stable across renders
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskStore {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Generate a fresh id: millisecond clock, bumped past any collision
    /// within the current store. Cross-session collisions are a non-concern
    /// under the single-writer assumption.
    fn fresh_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.tasks.iter().any(|t| t.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Create a task from a draft and append it. Stamps both timestamps,
    /// defaults progress to 0 (100 when created directly in done).
    pub fn add_task(&mut self, draft: NewTask) -> &Task {
        let now = Utc::now();
        let status = draft.status.unwrap_or(Status::Todo);
        let task = Task {
            id: self.fresh_id(),
            title: draft.title,
            project: draft.project,
            assignee: draft.assignee,
            status,
            priority: draft.priority.unwrap_or(Priority::P2),
            deadline: draft.deadline,
            progress: if status == Status::Done { 100 } else { 0 },
            effort: draft.effort.unwrap_or_default(),
            next_action: draft.next_action,
            notes: draft.notes,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task);
        self.tasks.last().expect("just pushed")
    }

    /// Apply one field edit and re-stamp `updated_at`. While the resulting
    /// status is done, progress is pinned at 100.
    pub fn update_task(&mut self, id: &str, edit: TaskEdit) -> Result<&Task, StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let task = &mut self.tasks[idx];
        match edit {
            TaskEdit::Title(title) => task.title = title,
            TaskEdit::Project(project) => task.project = project,
            TaskEdit::Assignee(assignee) => task.assignee = assignee,
            TaskEdit::Status(status) => task.status = status,
            TaskEdit::Priority(priority) => task.priority = priority,
            TaskEdit::Deadline(deadline) => task.deadline = deadline,
            TaskEdit::Progress(progress) => task.progress = progress.min(100),
            TaskEdit::Effort(effort) => task.effort = effort,
            TaskEdit::NextAction(text) => task.next_action = text,
            TaskEdit::Notes(text) => task.notes = text,
            TaskEdit::Tags(tags) => task.tags = tags,
        }
        if task.status == Status::Done {
            task.progress = 100;
        }
        task.updated_at = Utc::now();
        Ok(&self.tasks[idx])
    }

    /// Remove a task. Unknown ids are a no-op, not an error.
    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let idx = self.position(id)?;
        Some(self.tasks.remove(idx))
    }

    /// Clone a task with a fresh id and a " (Copy)" title suffix
    pub fn duplicate_task(&mut self, id: &str) -> Result<&Task, StoreError> {
        let source = self
            .task(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut copy = source.clone();
        copy.id = self.fresh_id();
        copy.title.push_str(" (Copy)");
        self.tasks.push(copy);
        Ok(self.tasks.last().expect("just pushed"))
    }

    // -----------------------------------------------------------------------
    // Reference lists and settings
    // -----------------------------------------------------------------------

    /// Returns false if the project was already present
    pub fn add_project(&mut self, name: impl Into<String>) -> bool {
        self.projects.insert(name.into())
    }

    /// Removal does not cascade: tasks referencing the name keep it
    pub fn remove_project(&mut self, name: &str) -> bool {
        self.projects.shift_remove(name)
    }

    pub fn add_assignee(&mut self, name: impl Into<String>) -> bool {
        self.assignees.insert(name.into())
    }

    pub fn remove_assignee(&mut self, name: &str) -> bool {
        self.assignees.shift_remove(name)
    }

    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.settings.theme = theme;
    }

    pub fn set_default_view(&mut self, view: ViewKind) {
        self.settings.default_view = view;
    }

    pub fn set_default_calendar_view(&mut self, scale: CalendarScale) {
        self.settings.default_calendar_view = scale;
    }

    /// Record a confirmed remote write
    pub fn mark_synced(&mut self, ts: DateTime<Utc>) {
        self.meta.last_sync = Some(ts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(titles: &[&str]) -> TaskStore {
        let mut store = TaskStore::default();
        for title in titles {
            store.add_task(NewTask::titled(*title));
        }
        store
    }

    #[test]
    fn add_task_defaults() {
        let mut store = TaskStore::default();
        let task = store.add_task(NewTask::titled("Write brief"));
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::P2);
        assert_eq!(task.progress, 0);
        assert!(task.tags.is_empty());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn add_task_ids_unique() {
        let store = store_with(&["a", "b", "c", "d"]);
        let mut ids: Vec<_> = store.tasks.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn add_task_directly_done_gets_full_progress() {
        let mut store = TaskStore::default();
        let mut draft = NewTask::titled("Already shipped");
        draft.status = Some(Status::Done);
        let task = store.add_task(draft);
        assert_eq!(task.progress, 100);
    }

    #[test]
    fn update_status_to_done_forces_progress() {
        let mut store = store_with(&["a"]);
        let id = store.tasks[0].id.clone();
        store.update_task(&id, TaskEdit::Progress(40)).unwrap();
        let task = store.update_task(&id, TaskEdit::Status(Status::Done)).unwrap();
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.progress, 100);
    }

    #[test]
    fn progress_pinned_while_done() {
        let mut store = store_with(&["a"]);
        let id = store.tasks[0].id.clone();
        store.update_task(&id, TaskEdit::Status(Status::Done)).unwrap();
        let task = store.update_task(&id, TaskEdit::Progress(10)).unwrap();
        assert_eq!(task.progress, 100);
    }

    #[test]
    fn update_refreshes_updated_at() {
        let mut store = store_with(&["a"]);
        let id = store.tasks[0].id.clone();
        let before = store.tasks[0].updated_at;
        let task = store
            .update_task(&id, TaskEdit::Title("renamed".into()))
            .unwrap();
        assert!(task.updated_at >= before);
        assert_eq!(task.title, "renamed");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = store_with(&["a"]);
        let result = store.update_task("nope", TaskEdit::Progress(5));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn remove_task_returns_none_for_unknown() {
        let mut store = store_with(&["a"]);
        assert!(store.remove_task("nope").is_none());
        assert_eq!(store.tasks.len(), 1);
        let id = store.tasks[0].id.clone();
        assert!(store.remove_task(&id).is_some());
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn duplicate_clones_all_but_id_and_title() {
        let mut store = TaskStore::default();
        let mut draft = NewTask::titled("Design review");
        draft.project = "Launch".into();
        draft.priority = Some(Priority::P1);
        store.add_task(draft);
        let id = store.tasks[0].id.clone();

        let copy = store.duplicate_task(&id).unwrap();
        assert_eq!(copy.title, "Design review (Copy)");
        assert_eq!(copy.project, "Launch");
        assert_eq!(copy.priority, Priority::P1);
        assert_ne!(copy.id, id);
        assert_eq!(store.tasks.len(), 2);
    }

    #[test]
    fn reference_removal_does_not_cascade() {
        let mut store = TaskStore::default();
        store.add_project("Launch");
        let mut draft = NewTask::titled("Design review");
        draft.project = "Launch".into();
        store.add_task(draft);

        assert!(store.remove_project("Launch"));
        // Dangling reference is tolerated
        assert_eq!(store.tasks[0].project, "Launch");
    }

    #[test]
    fn reference_lists_keep_insertion_order() {
        let mut store = TaskStore::default();
        store.add_project("Zeta");
        store.add_project("Alpha");
        store.add_project("Zeta");
        let names: Vec<_> = store.projects.iter().cloned().collect();
        assert_eq!(names, vec!["Zeta".to_string(), "Alpha".to_string()]);
    }
}
