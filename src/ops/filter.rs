use crate::model::{Priority, Task, TaskStore};

/// Active filter predicates. `None` means "all" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub assignee: Option<String>,
    pub project: Option<String>,
    pub priority: Option<Priority>,
}

impl FilterSet {
    pub fn is_active(&self) -> bool {
        self.assignee.is_some() || self.project.is_some() || self.priority.is_some()
    }

    pub fn clear(&mut self) {
        *self = FilterSet::default();
    }

    /// Conjunctive match: every non-None predicate must hold exactly
    /// (string equality, case-sensitive on raw values).
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = &self.assignee
            && task.assignee != *assignee
        {
            return false;
        }
        if let Some(project) = &self.project
            && task.project != *project
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        true
    }
}

/// Derive the visible set: indices into `store.tasks` of every task
/// matching all active filters, in insertion order. O(n) per call —
/// no indexing at these dataset sizes.
pub fn apply_filters(store: &TaskStore, filters: &FilterSet) -> Vec<usize> {
    store
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filters.matches(task))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use pretty_assertions::assert_eq;

    fn fixture() -> TaskStore {
        let mut store = TaskStore::default();
        for (title, project, assignee, priority) in [
            ("Design review", "Launch", "Dana", Priority::P1),
            ("Write changelog", "Launch", "Miri", Priority::P2),
            ("Fix login bug", "Platform", "Dana", Priority::P0),
            ("Retro notes", "", "", Priority::P3),
        ] {
            let mut draft = NewTask::titled(title);
            draft.project = project.into();
            draft.assignee = assignee.into();
            draft.priority = Some(priority);
            store.add_task(draft);
        }
        store
    }

    #[test]
    fn no_filters_yields_full_set() {
        let store = fixture();
        assert_eq!(apply_filters(&store, &FilterSet::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_filter() {
        let store = fixture();
        let filters = FilterSet {
            assignee: Some("Dana".into()),
            ..FilterSet::default()
        };
        assert_eq!(apply_filters(&store, &filters), vec![0, 2]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let store = fixture();
        let filters = FilterSet {
            assignee: Some("Dana".into()),
            project: Some("Launch".into()),
            priority: None,
        };
        assert_eq!(apply_filters(&store, &filters), vec![0]);

        let filters = FilterSet {
            assignee: Some("Dana".into()),
            project: Some("Launch".into()),
            priority: Some(Priority::P0),
        };
        assert!(apply_filters(&store, &filters).is_empty());
    }

    #[test]
    fn match_is_case_sensitive() {
        let store = fixture();
        let filters = FilterSet {
            project: Some("launch".into()),
            ..FilterSet::default()
        };
        assert!(apply_filters(&store, &filters).is_empty());
    }

    #[test]
    fn output_is_subset_satisfying_predicates() {
        let store = fixture();
        let filters = FilterSet {
            priority: Some(Priority::P2),
            ..FilterSet::default()
        };
        for idx in apply_filters(&store, &filters) {
            assert!(idx < store.tasks.len());
            assert!(filters.matches(&store.tasks[idx]));
        }
    }
}
