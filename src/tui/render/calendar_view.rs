use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::CalendarScale;
use crate::tui::app::App;
use crate::view::{self, DayCell};

use super::truncate_to_width;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Render the calendar view at the current scale
pub fn render_calendar(frame: &mut Frame, app: &App, area: Rect) {
    match app.cal_scale {
        CalendarScale::Month => render_month(frame, app, area),
        CalendarScale::Week => render_week(frame, app, area),
        CalendarScale::Day => render_day(frame, app, area),
    }
}

fn render_month(frame: &mut Frame, app: &App, area: Rect) {
    let grid = view::project_month(&app.store, &app.visible, app.cal_cursor, app.today);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            std::iter::once(Constraint::Length(2))
                .chain(grid.weeks.iter().map(|_| Constraint::Min(3)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    render_month_header(frame, app, &grid, rows[0]);

    for (week_idx, week) in grid.weeks.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(rows[week_idx + 1]);
        for (day_idx, cell) in week.iter().enumerate() {
            render_day_cell(frame, app, cell, cells[day_idx]);
        }
    }
}

fn render_month_header(
    frame: &mut Frame,
    app: &App,
    grid: &view::MonthGrid,
    area: Rect,
) {
    let bg = app.theme.background;
    let title = format!(
        " {} {}",
        MONTH_NAMES[(grid.month - 1) as usize],
        grid.year
    );
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))];

    let cell_width = (area.width / 7) as usize;
    let weekdays: String = WEEKDAY_NAMES
        .iter()
        .map(|name| format!("{name:<cell_width$}"))
        .collect();
    lines.push(Line::from(Span::styled(
        weekdays,
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// One cell of the month grid: day number plus as many task lines as fit
fn render_day_cell(frame: &mut Frame, app: &App, cell: &DayCell, area: Rect) {
    let is_cursor = cell.date == app.cal_cursor;
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let width = area.width as usize;

    let day_color = if cell.is_today {
        app.theme.highlight
    } else if cell.in_month {
        app.theme.text
    } else {
        app.theme.dim
    };
    let mut day_style = Style::default().fg(day_color).bg(bg);
    if cell.is_today {
        day_style = day_style.add_modifier(Modifier::BOLD);
    }

    let mut lines = vec![Line::from(Span::styled(
        format!("{:<width$}", cell.date.day()),
        day_style,
    ))];

    let task_rows = area.height.saturating_sub(1) as usize;
    let (shown, hidden) = if cell.tasks.len() > task_rows && task_rows > 0 {
        (task_rows - 1, cell.tasks.len() - (task_rows - 1))
    } else {
        (cell.tasks.len(), 0)
    };

    for &task_idx in cell.tasks.iter().take(shown) {
        let Some(task) = app.store.tasks.get(task_idx) else {
            continue;
        };
        lines.push(Line::from(vec![
            Span::styled(
                "\u{2022}",
                Style::default().fg(app.theme.priority_color(task.priority)).bg(bg),
            ),
            Span::styled(
                format!(
                    "{:<pad$}",
                    truncate_to_width(&task.title, width.saturating_sub(1)),
                    pad = width.saturating_sub(1)
                ),
                Style::default().fg(app.theme.text).bg(bg),
            ),
        ]));
    }
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("{:<width$}", format!("+{hidden} more")),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }
    // Fill the rest of the cell so the selection background is solid
    while lines.len() < area.height as usize {
        lines.push(Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_week(frame: &mut Frame, app: &App, area: Rect) {
    let week = view::project_week(&app.store, &app.visible, app.cal_cursor, app.today);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let first = week[0].date;
    let last = week[6].date;
    let title = format!(
        " week of {} \u{2013} {}",
        first.format("%b %-d"),
        last.format("%b %-d %Y")
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(app.theme.background)),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(rows[1]);
    for (day_idx, cell) in week.iter().enumerate() {
        render_week_column(frame, app, cell, columns[day_idx]);
    }
}

fn render_week_column(frame: &mut Frame, app: &App, cell: &DayCell, area: Rect) {
    let is_cursor = cell.date == app.cal_cursor;
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let width = area.width as usize;

    let day_color = if cell.is_today {
        app.theme.highlight
    } else {
        app.theme.text
    };
    let header = format!(
        "{:<width$}",
        format!(
            "{} {}",
            WEEKDAY_NAMES[cell.date.weekday().num_days_from_sunday() as usize],
            cell.date.day()
        )
    );
    let mut lines = vec![Line::from(Span::styled(
        header,
        Style::default().fg(day_color).bg(bg).add_modifier(Modifier::BOLD),
    ))];

    for &task_idx in &cell.tasks {
        let Some(task) = app.store.tasks.get(task_idx) else {
            continue;
        };
        lines.push(Line::from(vec![
            Span::styled(
                "\u{2022}",
                Style::default().fg(app.theme.priority_color(task.priority)).bg(bg),
            ),
            Span::styled(
                format!(
                    "{:<pad$}",
                    truncate_to_width(&task.title, width.saturating_sub(1)),
                    pad = width.saturating_sub(1)
                ),
                Style::default().fg(app.theme.text).bg(bg),
            ),
        ]));
    }
    while lines.len() < area.height as usize {
        lines.push(Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_day(frame: &mut Frame, app: &App, area: Rect) {
    let cell = view::project_day(&app.store, &app.visible, app.cal_cursor, app.today);
    let bg = app.theme.background;

    let mut title = format!(" {}", cell.date.format("%A, %B %-d %Y"));
    if cell.is_today {
        title.push_str("  (today)");
    }
    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if cell.tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            " nothing due",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }
    for &task_idx in &cell.tasks {
        let Some(task) = app.store.tasks.get(task_idx) else {
            continue;
        };
        let mut spans = vec![
            Span::styled(
                format!(" {} ", task.priority.label()),
                Style::default().fg(app.theme.priority_color(task.priority)).bg(bg),
            ),
            Span::styled(
                format!("{:<8} ", task.status.label()),
                Style::default().fg(app.theme.status_color(task.status)).bg(bg),
            ),
            Span::styled(
                task.title.clone(),
                Style::default().fg(app.theme.text).bg(bg),
            ),
        ];
        if !task.assignee.is_empty() {
            spans.push(Span::styled(
                format!("  {}", task.assignee),
                Style::default().fg(app.theme.cyan).bg(bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}
