use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops;
use crate::tui::app::{App, Mode};

use super::{push_highlighted_spans, truncate_to_width};

/// Render the kanban board: five status columns of cards
pub fn render_kanban(frame: &mut Frame, app: &App, area: Rect) {
    let board = app.board();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (col_idx, column_area) in columns.iter().enumerate() {
        render_column(frame, app, &board.columns[col_idx], col_idx, *column_area);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    column: &crate::view::KanbanColumn,
    col_idx: usize,
    area: Rect,
) {
    let bg = app.theme.background;
    let is_cursor_col = app.kanban_col == col_idx;
    let width = area.width.saturating_sub(1) as usize;

    let mut lines: Vec<Line> = Vec::new();

    // Column header: status name + card count
    let header_color = app.theme.status_color(column.status);
    let mut header_style = Style::default().fg(header_color).bg(bg);
    if is_cursor_col {
        header_style = header_style.add_modifier(Modifier::BOLD);
    }
    lines.push(Line::from(Span::styled(
        format!(" {} {}", column.status.label(), column.cards.len()),
        header_style,
    )));
    lines.push(Line::from(Span::styled(
        format!(" {}", "\u{2500}".repeat(width.saturating_sub(1))),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let search_re = app.active_search_re();
    for (row, &task_idx) in column.cards.iter().enumerate() {
        let Some(task) = app.store.tasks.get(task_idx) else {
            continue;
        };
        let selected = is_cursor_col && app.kanban_row == row;
        let carried = app
            .carry
            .as_ref()
            .is_some_and(|c| c.task_id == task.id);
        lines.extend(card_lines(app, task, width, selected, carried, search_re.as_ref()));
    }

    // Keep the selected card in view
    let mut scroll = 0u16;
    if is_cursor_col {
        let card_top = 2 + app.kanban_row * 3;
        let visible_rows = area.height.saturating_sub(2) as usize;
        if visible_rows > 0 && card_top + 3 > 2 + visible_rows {
            scroll = (card_top + 3 - (2 + visible_rows)) as u16;
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Three lines per card: title, metadata, spacer
fn card_lines<'a>(
    app: &App,
    task: &Task,
    width: usize,
    selected: bool,
    carried: bool,
    search_re: Option<&regex::Regex>,
) -> Vec<Line<'a>> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let marker_color = if carried && app.mode == Mode::Move {
        app.theme.selection_border
    } else {
        app.theme.priority_color(task.priority)
    };

    // Title line with the priority bar on the left
    let mut title_spans = vec![Span::styled(
        " \u{258E}",
        Style::default().fg(marker_color).bg(bg),
    )];
    let title_style = Style::default()
        .fg(if selected {
            app.theme.text_bright
        } else {
            app.theme.text
        })
        .bg(bg);
    let highlight_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    push_highlighted_spans(
        &mut title_spans,
        &truncate_to_width(&task.title, width.saturating_sub(3)),
        title_style,
        highlight_style,
        search_re,
    );
    pad_line(&mut title_spans, width, bg);

    // Metadata line: priority, assignee initials, deadline badge, progress
    let mut meta_spans = vec![Span::styled(
        format!("   {}", task.priority.label()),
        Style::default().fg(app.theme.priority_color(task.priority)).bg(bg),
    )];
    let initials = task.assignee_initials();
    if !initials.is_empty() {
        meta_spans.push(Span::styled(
            format!(" {initials}"),
            Style::default().fg(app.theme.cyan).bg(bg),
        ));
    }
    if let Some(deadline) = task.deadline {
        let class = ops::classify(deadline, app.today);
        meta_spans.push(Span::styled(
            format!(" {}", deadline.format("%-m/%-d")),
            Style::default().fg(app.theme.deadline_color(class)).bg(bg),
        ));
    }
    if task.progress > 0 {
        meta_spans.push(Span::styled(
            format!(" {}%", task.progress),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    pad_line(&mut meta_spans, width, bg);

    vec![
        Line::from(title_spans),
        Line::from(meta_spans),
        Line::from(Span::styled(
            " ".repeat(width),
            Style::default().bg(app.theme.background),
        )),
    ]
}

/// Extend the line's background to the full column width
fn pad_line(spans: &mut Vec<Span>, width: usize, bg: ratatui::style::Color) {
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }
}
