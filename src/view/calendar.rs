use chrono::{Datelike, Duration, NaiveDate};

use crate::model::TaskStore;

/// One day cell, annotated with the visible tasks due that day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing cells borrowed from adjacent months
    pub in_month: bool,
    /// Calendar-date comparison, never timestamps
    pub is_today: bool,
    /// Indices into `store.tasks` whose deadline equals this date
    pub tasks: Vec<usize>,
}

/// A projected month: full weeks, Sunday-first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[DayCell; 7]>,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is valid")
}

fn day_cell(store: &TaskStore, visible: &[usize], date: NaiveDate, in_month: bool, today: NaiveDate) -> DayCell {
    let tasks = visible
        .iter()
        .copied()
        .filter(|&idx| {
            store
                .tasks
                .get(idx)
                .and_then(|t| t.deadline)
                .is_some_and(|d| d == date)
        })
        .collect();
    DayCell {
        date,
        in_month,
        is_today: date == today,
        tasks,
    }
}

/// Project the month containing `cursor` onto a 7-column grid. Leading
/// cells come from the previous month (count = first-of-month weekday
/// index, Sunday-first); trailing cells complete the final week.
pub fn project_month(
    store: &TaskStore,
    visible: &[usize],
    cursor: NaiveDate,
    today: NaiveDate,
) -> MonthGrid {
    let first = first_of_month(cursor);
    let lead = first.weekday().num_days_from_sunday() as i64;
    let mut date = first - Duration::days(lead);

    let month = cursor.month();
    let mut weeks = Vec::new();
    loop {
        let week: [DayCell; 7] = std::array::from_fn(|_| {
            let cell = day_cell(store, visible, date, date.month() == month, today);
            date += Duration::days(1);
            cell
        });
        weeks.push(week);
        // Stop once the next week starts past the end of the month
        if date.month() != month || date.year() != cursor.year() {
            break;
        }
    }
    MonthGrid {
        year: cursor.year(),
        month,
        weeks,
    }
}

/// Sunday-first strip of the week containing `cursor`
pub fn project_week(
    store: &TaskStore,
    visible: &[usize],
    cursor: NaiveDate,
    today: NaiveDate,
) -> [DayCell; 7] {
    let lead = cursor.weekday().num_days_from_sunday() as i64;
    let mut date = cursor - Duration::days(lead);
    std::array::from_fn(|_| {
        let cell = day_cell(store, visible, date, true, today);
        date += Duration::days(1);
        cell
    })
}

/// Single-day cell for the day scale
pub fn project_day(
    store: &TaskStore,
    visible: &[usize],
    cursor: NaiveDate,
    today: NaiveDate,
) -> DayCell {
    day_cell(store, visible, cursor, true, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_deadlines(deadlines: &[Option<NaiveDate>]) -> TaskStore {
        let mut store = TaskStore::default();
        for deadline in deadlines {
            let mut draft = NewTask::titled("t");
            draft.deadline = *deadline;
            store.add_task(draft);
        }
        store
    }

    #[test]
    fn june_2025_grid_geometry() {
        // June 1 2025 is a Sunday: no leading cells, 5 full weeks
        let store = TaskStore::default();
        let grid = project_month(&store, &[], date(2025, 6, 15), date(2025, 6, 15));
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0].date, date(2025, 6, 1));
        assert!(grid.weeks[0][0].in_month);
        assert_eq!(grid.weeks[4][6].date, date(2025, 7, 5));
        assert!(!grid.weeks[4][6].in_month);
    }

    #[test]
    fn leading_cells_from_previous_month() {
        // May 1 2025 is a Thursday: 4 leading cells from April
        let store = TaskStore::default();
        let grid = project_month(&store, &[], date(2025, 5, 1), date(2025, 5, 1));
        assert_eq!(grid.weeks[0][0].date, date(2025, 4, 27));
        assert!(!grid.weeks[0][3].in_month);
        assert_eq!(grid.weeks[0][4].date, date(2025, 5, 1));
        assert!(grid.weeks[0][4].in_month);
    }

    #[test]
    fn tasks_land_on_their_deadline_cell() {
        let due = date(2025, 6, 1);
        let store = store_with_deadlines(&[Some(due), Some(date(2025, 6, 2)), None]);
        let grid = project_month(&store, &[0, 1, 2], due, due);
        assert_eq!(grid.weeks[0][0].tasks, vec![0]);
        assert_eq!(grid.weeks[0][1].tasks, vec![1]);
        // Undated tasks never appear
        for week in &grid.weeks {
            for cell in week {
                assert!(!cell.tasks.contains(&2));
            }
        }
    }

    #[test]
    fn hidden_tasks_are_excluded() {
        let due = date(2025, 6, 1);
        let store = store_with_deadlines(&[Some(due), Some(due)]);
        let grid = project_month(&store, &[1], due, due);
        assert_eq!(grid.weeks[0][0].tasks, vec![1]);
    }

    #[test]
    fn today_flag_compares_calendar_dates() {
        let store = TaskStore::default();
        let grid = project_month(&store, &[], date(2025, 6, 10), date(2025, 6, 10));
        let flagged: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flatten()
            .filter(|c| c.is_today)
            .map(|c| c.date)
            .collect();
        assert_eq!(flagged, vec![date(2025, 6, 10)]);
    }

    #[test]
    fn week_strip_is_sunday_first() {
        let store = store_with_deadlines(&[Some(date(2025, 6, 4))]);
        // June 4 2025 is a Wednesday
        let week = project_week(&store, &[0], date(2025, 6, 4), date(2025, 6, 4));
        assert_eq!(week[0].date, date(2025, 6, 1));
        assert_eq!(week[6].date, date(2025, 6, 7));
        assert_eq!(week[3].tasks, vec![0]);
    }

    #[test]
    fn day_cell_annotates_single_date() {
        let due = date(2025, 6, 4);
        let store = store_with_deadlines(&[Some(due), Some(date(2025, 6, 5))]);
        let cell = project_day(&store, &[0, 1], due, due);
        assert_eq!(cell.tasks, vec![0]);
        assert!(cell.is_today);
    }
}
