use serde::Serialize;

use crate::model::Task;
use crate::ops::Stats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub backlog: usize,
    pub todo: usize,
    pub doing: usize,
    pub review: usize,
    pub done: usize,
    pub overdue: usize,
    pub done_today: usize,
}

pub fn stats_to_json(stats: &Stats) -> StatsJson {
    StatsJson {
        total: stats.total,
        backlog: stats.backlog,
        todo: stats.todo,
        doing: stats.doing,
        review: stats.review,
        done: stats.done,
        overdue: stats.overdue,
        done_today: stats.done_today,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary:
/// `p1 [todo] Design review  Launch / Dana  due 2025-06-01  (1718000000000)`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "{} [{}] {}",
        task.priority.label(),
        task.status.label(),
        task.title
    );
    match (task.project.is_empty(), task.assignee.is_empty()) {
        (false, false) => line.push_str(&format!("  {} / {}", task.project, task.assignee)),
        (false, true) => line.push_str(&format!("  {}", task.project)),
        (true, false) => line.push_str(&format!("  {}", task.assignee)),
        (true, true) => {}
    }
    if let Some(deadline) = task.deadline {
        line.push_str(&format!("  due {}", deadline));
    }
    if task.progress > 0 {
        line.push_str(&format!("  {}%", task.progress));
    }
    line.push_str(&format!("  ({})", task.id));
    line
}

/// Format the stats block, one line per row
pub fn format_stats(stats: &Stats) -> Vec<String> {
    vec![
        format!("tasks:      {}", stats.total),
        format!("backlog:    {}", stats.backlog),
        format!("todo:       {}", stats.todo),
        format!("doing:      {}", stats.doing),
        format!("review:     {}", stats.review),
        format!("done:       {}", stats.done),
        format!("overdue:    {}", stats.overdue),
        format!("done today: {}", stats.done_today),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use crate::model::TaskStore;
    use chrono::NaiveDate;

    #[test]
    fn task_line_includes_set_fields_only() {
        let mut store = TaskStore::default();
        let mut draft = NewTask::titled("Design review");
        draft.project = "Launch".into();
        draft.deadline = NaiveDate::from_ymd_opt(2025, 6, 1);
        store.add_task(draft);

        let line = format_task_line(&store.tasks[0]);
        assert!(line.starts_with("p2 [todo] Design review  Launch  due 2025-06-01"));
        assert!(!line.contains('%'));
    }

    #[test]
    fn bare_task_line_has_no_trailing_clutter() {
        let mut store = TaskStore::default();
        store.add_task(NewTask::titled("Tidy desk"));
        let line = format_task_line(&store.tasks[0]);
        let id = &store.tasks[0].id;
        assert_eq!(line, format!("p2 [todo] Tidy desk  ({id})"));
    }
}
