use chrono::NaiveDate;

/// Deadline badge classification, shared by the kanban and list renderers
/// and the calendar markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineClass {
    Overdue,
    Today,
    Future,
}

impl DeadlineClass {
    pub fn label(self) -> &'static str {
        match self {
            DeadlineClass::Overdue => "overdue",
            DeadlineClass::Today => "today",
            DeadlineClass::Future => "future",
        }
    }
}

/// Classify a deadline against today's calendar date. Both sides are
/// date-only, so time-of-day never leaks into the comparison.
pub fn classify(deadline: NaiveDate, today: NaiveDate) -> DeadlineClass {
    let diff = (deadline - today).num_days();
    if diff < 0 {
        DeadlineClass::Overdue
    } else if diff == 0 {
        DeadlineClass::Today
    } else {
        DeadlineClass::Future
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn yesterday_is_overdue() {
        assert_eq!(
            classify(date(2025, 1, 1), date(2025, 1, 2)),
            DeadlineClass::Overdue
        );
    }

    #[test]
    fn same_day_is_today() {
        assert_eq!(
            classify(date(2025, 1, 2), date(2025, 1, 2)),
            DeadlineClass::Today
        );
    }

    #[test]
    fn tomorrow_is_future() {
        assert_eq!(
            classify(date(2025, 1, 3), date(2025, 1, 2)),
            DeadlineClass::Future
        );
    }

    #[test]
    fn classification_crosses_month_and_year_boundaries() {
        assert_eq!(
            classify(date(2024, 12, 31), date(2025, 1, 1)),
            DeadlineClass::Overdue
        );
        assert_eq!(
            classify(date(2026, 1, 1), date(2025, 12, 31)),
            DeadlineClass::Future
        );
    }
}
