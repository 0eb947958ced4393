use crate::model::TaskStore;

/// One project group in the grouped list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGroup {
    /// Project name; empty string = the "No project" bucket
    pub project: String,
    /// Indices into `store.tasks`, insertion order within the group
    pub rows: Vec<usize>,
}

/// Group the visible set by project, in order of each project's first
/// appearance among the visible tasks.
pub fn project_grouped(store: &TaskStore, visible: &[usize]) -> Vec<ListGroup> {
    let mut groups: Vec<ListGroup> = Vec::new();
    for &idx in visible {
        let task = match store.tasks.get(idx) {
            Some(t) => t,
            None => continue,
        };
        match groups.iter_mut().find(|g| g.project == task.project) {
            Some(group) => group.rows.push(idx),
            None => groups.push(ListGroup {
                project: task.project.clone(),
                rows: vec![idx],
            }),
        }
    }
    groups
}

/// Flat table variant: one row per visible task, insertion order
pub fn project_table(_store: &TaskStore, visible: &[usize]) -> Vec<usize> {
    visible.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use pretty_assertions::assert_eq;

    fn fixture() -> TaskStore {
        let mut store = TaskStore::default();
        for (title, project) in [
            ("Design review", "Launch"),
            ("Fix login bug", "Platform"),
            ("Write changelog", "Launch"),
            ("Tidy desk", ""),
        ] {
            let mut draft = NewTask::titled(title);
            draft.project = project.into();
            store.add_task(draft);
        }
        store
    }

    #[test]
    fn groups_by_first_appearance() {
        let store = fixture();
        let visible: Vec<usize> = (0..store.tasks.len()).collect();
        let groups = project_grouped(&store, &visible);

        let names: Vec<&str> = groups.iter().map(|g| g.project.as_str()).collect();
        assert_eq!(names, vec!["Launch", "Platform", ""]);
        assert_eq!(groups[0].rows, vec![0, 2]);
        assert_eq!(groups[1].rows, vec![1]);
        assert_eq!(groups[2].rows, vec![3]);
    }

    #[test]
    fn grouping_follows_visible_order() {
        let store = fixture();
        // Platform task first in the visible set, so its group leads
        let groups = project_grouped(&store, &[1, 0, 2]);
        let names: Vec<&str> = groups.iter().map(|g| g.project.as_str()).collect();
        assert_eq!(names, vec!["Platform", "Launch"]);
    }

    #[test]
    fn table_preserves_insertion_order() {
        let store = fixture();
        assert_eq!(project_table(&store, &[0, 1, 3]), vec![0, 1, 3]);
    }
}
