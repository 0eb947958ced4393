use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops;
use crate::tui::app::App;
use crate::view;

use super::{push_highlighted_spans, truncate_to_width};

/// Render the list view: project-grouped rows, or the flat table variant
pub fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let search_re = app.active_search_re();

    let mut lines: Vec<Line> = Vec::new();
    // Terminal line index of the selected row, for scrolling
    let mut selected_line = 0usize;
    let mut row_counter = 0usize;

    if app.list_table {
        lines.push(header_line(app, width));
        for &task_idx in &app.list_rows() {
            let Some(task) = app.store.tasks.get(task_idx) else {
                continue;
            };
            let selected = row_counter == app.list_cursor;
            if selected {
                selected_line = lines.len();
            }
            lines.push(task_line(app, task, width, selected, true, search_re.as_ref()));
            row_counter += 1;
        }
    } else {
        for group in view::project_grouped(&app.store, &app.visible) {
            let name = if group.project.is_empty() {
                "No project"
            } else {
                group.project.as_str()
            };
            lines.push(Line::from(Span::styled(
                format!(" {} ({})", name, group.rows.len()),
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )));
            for task_idx in group.rows {
                let Some(task) = app.store.tasks.get(task_idx) else {
                    continue;
                };
                let selected = row_counter == app.list_cursor;
                if selected {
                    selected_line = lines.len();
                }
                lines.push(task_line(app, task, width, selected, false, search_re.as_ref()));
                row_counter += 1;
            }
            lines.push(Line::default());
        }
    }

    if row_counter == 0 {
        lines.push(Line::from(Span::styled(
            " no tasks match",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    // Keep the selected row in view
    let visible_rows = area.height as usize;
    let scroll = if visible_rows > 0 && selected_line + 1 > visible_rows {
        (selected_line + 1 - visible_rows) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn header_line(app: &App, width: usize) -> Line<'static> {
    let text = format!(
        " {:<3} {:<8} {:<34} {:<14} {:<14} {:>10} {:>5}",
        "", "status", "title", "project", "assignee", "deadline", "%"
    );
    Line::from(Span::styled(
        truncate_to_width(&text, width),
        Style::default()
            .fg(app.theme.dim)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

fn task_line<'a>(
    app: &App,
    task: &Task,
    width: usize,
    selected: bool,
    with_project: bool,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let text_color = if selected {
        app.theme.text_bright
    } else {
        app.theme.text
    };
    let highlight_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", task.priority.label()),
            Style::default().fg(app.theme.priority_color(task.priority)).bg(bg),
        ),
        Span::styled(
            format!("{:<8} ", task.status.label()),
            Style::default().fg(app.theme.status_color(task.status)).bg(bg),
        ),
    ];

    push_highlighted_spans(
        &mut spans,
        &format!("{:<34} ", truncate_to_width(&task.title, 33)),
        Style::default().fg(text_color).bg(bg),
        highlight_style,
        search_re,
    );

    if with_project {
        spans.push(Span::styled(
            format!("{:<14} ", truncate_to_width(&task.project, 13)),
            Style::default().fg(text_color).bg(bg),
        ));
    }
    spans.push(Span::styled(
        format!("{:<14} ", truncate_to_width(&task.assignee, 13)),
        Style::default().fg(app.theme.cyan).bg(bg),
    ));

    match task.deadline {
        Some(deadline) => {
            let class = ops::classify(deadline, app.today);
            spans.push(Span::styled(
                format!("{:>10} ", deadline.format("%Y-%m-%d")),
                Style::default().fg(app.theme.deadline_color(class)).bg(bg),
            ));
        }
        None => spans.push(Span::styled(
            format!("{:>10} ", ""),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    }

    spans.push(Span::styled(
        format!("{:>4}%", task.progress),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    // Extend the selection background to the edge
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }

    Line::from(spans)
}
