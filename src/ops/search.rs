use regex::Regex;

use crate::model::TaskStore;

/// Compile the case-insensitive matcher for a query. The query is escaped,
/// so it behaves as a plain substring match; the TUI reuses the same regex
/// for highlight spans. Returns None for an empty query.
pub fn search_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

/// Free-text search over the store: disjunctive, case-insensitive substring
/// match across title, notes, and project. An empty query matches everything
/// (the caller treats that as "search cleared" and falls back to filters).
pub fn search(store: &TaskStore, query: &str) -> Vec<usize> {
    let re = match search_regex(query) {
        Some(re) => re,
        None => return (0..store.tasks.len()).collect(),
    };
    store
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| {
            re.is_match(&task.title) || re.is_match(&task.notes) || re.is_match(&task.project)
        })
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
        for (title, project, notes) in [
            ("Design review", "Launch", ""),
            ("Write changelog", "Launch", "mention the new login flow"),
            ("Fix login bug", "Platform", ""),
        ] {
            let mut draft = NewTask::titled(title);
            draft.project = project.into();
            draft.notes = notes.into();
            store.add_task(draft);
        }
        store
    }

    #[test]
    fn matches_title_notes_and_project_disjunctively() {
        let store = fixture();
        // "login" appears in one title and one note
        assert_eq!(search(&store, "login"), vec![1, 2]);
        // project match
        assert_eq!(search(&store, "Platform"), vec![2]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let store = fixture();
        assert_eq!(search(&store, "LAUNCH"), vec![0, 1]);
    }

    #[test]
    fn search_is_idempotent() {
        let store = fixture();
        assert_eq!(search(&store, "login"), search(&store, "login"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let store = fixture();
        assert_eq!(search(&store, ""), vec![0, 1, 2]);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let mut store = TaskStore::default();
        store.add_task(NewTask::titled("Cost (Q3) estimate"));
        store.add_task(NewTask::titled("Cost estimate"));
        assert_eq!(search(&store, "(Q3)"), vec![0]);
    }
}
