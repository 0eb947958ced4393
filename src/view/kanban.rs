use crate::model::{Status, TaskStore};

/// A picked-up card being previewed in a different column. Move mode sets
/// this so the board shows the card at its drop target before the drop
/// commits; nothing in the store changes until then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carry {
    pub task_id: String,
    pub target: Status,
}

/// One status column of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanColumn {
    pub status: Status,
    /// Indices into `store.tasks`, insertion order (no secondary sort)
    pub cards: Vec<usize>,
}

/// The projected board: five columns in `Status::ALL` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanBoard {
    pub columns: [KanbanColumn; 5],
}

impl KanbanBoard {
    pub fn column(&self, status: Status) -> &KanbanColumn {
        &self.columns[status.column()]
    }

    /// Locate a card on the board by store index
    pub fn position_of(&self, task_idx: usize) -> Option<(usize, usize)> {
        for (col, column) in self.columns.iter().enumerate() {
            if let Some(row) = column.cards.iter().position(|&idx| idx == task_idx) {
                return Some((col, row));
            }
        }
        None
    }
}

/// Partition the visible set into status buckets. A carried card lands in
/// its target column instead of its own.
pub fn project_kanban(store: &TaskStore, visible: &[usize], carry: Option<&Carry>) -> KanbanBoard {
    let mut columns = Status::ALL.map(|status| KanbanColumn {
        status,
        cards: Vec::new(),
    });
    for &idx in visible {
        let task = match store.tasks.get(idx) {
            Some(t) => t,
            None => continue,
        };
        let bucket = match carry {
            Some(c) if c.task_id == task.id => c.target,
            _ => task.status,
        };
        columns[bucket.column()].cards.push(idx);
    }
    KanbanBoard { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use pretty_assertions::assert_eq;

    fn fixture() -> TaskStore {
        let mut store = TaskStore::default();
        for (title, status) in [
            ("first todo", Status::Todo),
            ("in flight", Status::Doing),
            ("second todo", Status::Todo),
            ("shipped", Status::Done),
        ] {
            let mut draft = NewTask::titled(title);
            draft.status = Some(status);
            store.add_task(draft);
        }
        store
    }

    #[test]
    fn partitions_by_status_keeping_insertion_order() {
        let store = fixture();
        let visible: Vec<usize> = (0..store.tasks.len()).collect();
        let board = project_kanban(&store, &visible, None);

        assert_eq!(board.column(Status::Todo).cards, vec![0, 2]);
        assert_eq!(board.column(Status::Doing).cards, vec![1]);
        assert_eq!(board.column(Status::Done).cards, vec![3]);
        assert!(board.column(Status::Backlog).cards.is_empty());
    }

    #[test]
    fn respects_visible_subset() {
        let store = fixture();
        let board = project_kanban(&store, &[0, 1], None);
        assert_eq!(board.column(Status::Todo).cards, vec![0]);
        assert!(board.column(Status::Done).cards.is_empty());
    }

    #[test]
    fn carry_previews_card_in_target_column() {
        let store = fixture();
        let visible: Vec<usize> = (0..store.tasks.len()).collect();
        let carry = Carry {
            task_id: store.tasks[0].id.clone(),
            target: Status::Done,
        };
        let board = project_kanban(&store, &visible, Some(&carry));

        assert_eq!(board.column(Status::Todo).cards, vec![2]);
        assert_eq!(board.column(Status::Done).cards, vec![0, 3]);
        // Preview only: the store itself is untouched
        assert_eq!(store.tasks[0].status, Status::Todo);
    }

    #[test]
    fn position_of_finds_cards() {
        let store = fixture();
        let visible: Vec<usize> = (0..store.tasks.len()).collect();
        let board = project_kanban(&store, &visible, None);
        assert_eq!(board.position_of(2), Some((Status::Todo.column(), 1)));
        assert_eq!(board.position_of(99), None);
    }
}
