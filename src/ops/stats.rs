use chrono::{Local, NaiveDate};

use crate::model::{Status, TaskStore};

use super::deadline::{self, DeadlineClass};

/// Header statistics, recomputed from the store each render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub backlog: usize,
    pub todo: usize,
    pub doing: usize,
    pub review: usize,
    pub done: usize,
    /// Not-done tasks whose deadline is in the past
    pub overdue: usize,
    /// Done tasks last touched today (local time)
    pub done_today: usize,
}

impl Stats {
    pub fn compute(store: &TaskStore, today: NaiveDate) -> Stats {
        let mut stats = Stats {
            total: store.tasks.len(),
            ..Stats::default()
        };
        for task in &store.tasks {
            match task.status {
                Status::Backlog => stats.backlog += 1,
                Status::Todo => stats.todo += 1,
                Status::Doing => stats.doing += 1,
                Status::Review => stats.review += 1,
                Status::Done => stats.done += 1,
            }
            if task.status != Status::Done
                && let Some(deadline) = task.deadline
                && deadline::classify(deadline, today) == DeadlineClass::Overdue
            {
                stats.overdue += 1;
            }
            if task.status == Status::Done
                && task.updated_at.with_timezone(&Local).date_naive() == today
            {
                stats.done_today += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, TaskEdit};
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_per_status() {
        let mut store = TaskStore::default();
        for status in [Status::Todo, Status::Todo, Status::Doing, Status::Done] {
            let mut draft = NewTask::titled("t");
            draft.status = Some(status);
            store.add_task(draft);
        }
        let stats = Stats::compute(&store, Local::now().date_naive());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.todo, 2);
        assert_eq!(stats.doing, 1);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.backlog, 0);
    }

    #[test]
    fn overdue_ignores_done_and_undated() {
        let today = Local::now().date_naive();
        let mut store = TaskStore::default();

        let mut overdue = NewTask::titled("late");
        overdue.deadline = Some(today - Duration::days(3));
        store.add_task(overdue);

        let mut finished = NewTask::titled("late but done");
        finished.deadline = Some(today - Duration::days(3));
        store.add_task(finished);
        let id = store.tasks[1].id.clone();
        store.update_task(&id, TaskEdit::Status(Status::Done)).unwrap();

        store.add_task(NewTask::titled("no deadline"));

        let stats = Stats::compute(&store, today);
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn done_today_uses_updated_at() {
        let today = Local::now().date_naive();
        let mut store = TaskStore::default();
        store.add_task(NewTask::titled("ship it"));
        let id = store.tasks[0].id.clone();
        store.update_task(&id, TaskEdit::Status(Status::Done)).unwrap();

        let stats = Stats::compute(&store, today);
        assert_eq!(stats.done_today, 1);
        // Evaluated against a different day, the same task no longer counts
        let stats = Stats::compute(&store, today - Duration::days(1));
        assert_eq!(stats.done_today, 0);
    }
}
