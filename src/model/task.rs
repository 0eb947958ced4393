use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task workflow status — drives the kanban column and list badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Backlog,
    Todo,
    Doing,
    Review,
    Done,
}

impl Status {
    /// All statuses in kanban column order
    pub const ALL: [Status; 5] = [
        Status::Backlog,
        Status::Todo,
        Status::Doing,
        Status::Review,
        Status::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Review => "review",
            Status::Done => "done",
        }
    }

    /// Parse a status name (as used on the wire and in the CLI)
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "backlog" => Some(Status::Backlog),
            "todo" => Some(Status::Todo),
            "doing" => Some(Status::Doing),
            "review" => Some(Status::Review),
            "done" => Some(Status::Done),
            _ => None,
        }
    }

    /// Column index in `Status::ALL`
    pub fn column(self) -> usize {
        Status::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Task priority, ordered by severity (p0 most urgent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::P0, Priority::P1, Priority::P2, Priority::P3];

    pub fn label(self) -> &'static str {
        match self {
            Priority::P0 => "p0",
            Priority::P1 => "p1",
            Priority::P2 => "p2",
            Priority::P3 => "p3",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "p0" => Some(Priority::P0),
            "p1" => Some(Priority::P1),
            "p2" => Some(Priority::P2),
            "p3" => Some(Priority::P3),
            _ => None,
        }
    }

    /// Next priority in severity order, wrapping p3 → p0
    pub fn cycle(self) -> Priority {
        match self {
            Priority::P0 => Priority::P1,
            Priority::P1 => Priority::P2,
            Priority::P2 => Priority::P3,
            Priority::P3 => Priority::P0,
        }
    }
}

/// Rough effort tag. Descriptive only — nothing schedules on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Small,
    #[default]
    Medium,
    Large,
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Small, Effort::Medium, Effort::Large];

    pub fn label(self) -> &'static str {
        match self {
            Effort::Small => "small",
            Effort::Medium => "medium",
            Effort::Large => "large",
        }
    }

    pub fn cycle(self) -> Effort {
        match self {
            Effort::Small => Effort::Medium,
            Effort::Medium => Effort::Large,
            Effort::Large => Effort::Small,
        }
    }
}

/// A single task record. Field names are camelCase on the wire to stay
/// compatible with the document the remote store serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id, assigned at creation, immutable
    pub id: String,
    pub title: String,
    /// Reference into the store's project list; empty = none.
    /// Not foreign-key enforced — a dangling reference is tolerated.
    #[serde(default)]
    pub project: String,
    /// Reference into the store's assignee list; empty = none
    #[serde(default)]
    pub assignee: String,
    pub status: Status,
    pub priority: Priority,
    /// Calendar date only; absence means "no deadline", never overdue
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// 0–100; pinned to 100 while status is done
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub effort: Effort,
    #[serde(default)]
    pub next_action: String,
    #[serde(default)]
    pub notes: String,
    /// Reserved for future filtering; unused by the current views
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Uppercase initials of the assignee ("Dana Reyes" → "DR"), for kanban cards
    pub fn assignee_initials(&self) -> String {
        self.assignee
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .take(2)
            .collect()
    }
}

/// Draft fields for a new task; the store assigns id and timestamps
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub project: String,
    pub assignee: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
    pub effort: Option<Effort>,
    pub next_action: String,
    pub notes: String,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            ..NewTask::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_round_trips_labels() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.label()), Some(status));
        }
        assert_eq!(Status::parse("active"), None);
    }

    #[test]
    fn status_column_matches_board_order() {
        assert_eq!(Status::Backlog.column(), 0);
        assert_eq!(Status::Done.column(), 4);
    }

    #[test]
    fn priority_ordering_by_severity() {
        assert!(Priority::P0 < Priority::P1);
        assert!(Priority::P2 < Priority::P3);
    }

    #[test]
    fn priority_cycle_wraps() {
        assert_eq!(Priority::P3.cycle(), Priority::P0);
    }

    #[test]
    fn assignee_initials() {
        let mut task = sample_task();
        task.assignee = "Dana Reyes".into();
        assert_eq!(task.assignee_initials(), "DR");
        task.assignee = "dana".into();
        assert_eq!(task.assignee_initials(), "D");
        task.assignee = String::new();
        assert_eq!(task.assignee_initials(), "");
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Doing).unwrap(), "\"doing\"");
        assert_eq!(serde_json::to_string(&Priority::P1).unwrap(), "\"p1\"");
        assert_eq!(serde_json::to_string(&Effort::Large).unwrap(), "\"large\"");
    }

    pub(crate) fn sample_task() -> Task {
        Task {
            id: "1718000000000".into(),
            title: "Design review".into(),
            project: "Launch".into(),
            assignee: "Dana".into(),
            status: Status::Todo,
            priority: Priority::P1,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 1),
            progress: 0,
            effort: Effort::Medium,
            next_action: String::new(),
            notes: String::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
