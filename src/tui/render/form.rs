use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FORM_FIELDS, FormState};

use super::{centered_rect, truncate_to_width};

/// New-task form overlay. The quick variant is a single title prompt.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let bg = app.theme.background;

    let height = if form.quick { 5 } else { FORM_FIELDS.len() as u16 + 5 };
    let overlay_area = centered_rect(56.min(area.width), height.min(area.height), area);
    frame.render_widget(Clear, overlay_area);

    let inner_width = overlay_area.width.saturating_sub(2) as usize;
    let value_width = inner_width.saturating_sub(13);

    let title = if form.quick { " Quick add" } else { " New task" };
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    if form.quick {
        lines.push(field_line(app, "title", &form.title, true, true, inner_width, value_width));
    } else {
        for (i, name) in FORM_FIELDS.iter().enumerate() {
            let selected = i == form.field;
            let value = field_value(form, name);
            lines.push(field_line(app, name, &value, selected, selected, inner_width, value_width));
        }
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn field_value(form: &FormState, name: &str) -> String {
    match name {
        "title" => form.title.clone(),
        "project" => form.project.clone(),
        "assignee" => form.assignee.clone(),
        "priority" => format!("\u{2039} {} \u{203A}", form.priority.label()),
        "deadline" => form.deadline.clone(),
        "notes" => form.notes.clone(),
        _ => String::new(),
    }
}

fn field_line<'a>(
    app: &App,
    label: &str,
    value: &str,
    selected: bool,
    with_cursor: bool,
    inner_width: usize,
    value_width: usize,
) -> Line<'a> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let label_style = Style::default()
        .fg(if selected {
            app.theme.highlight
        } else {
            app.theme.dim
        })
        .bg(row_bg);

    let mut spans = vec![
        Span::styled(format!(" {label:<10}"), label_style),
        Span::styled(
            truncate_to_width(value, value_width),
            Style::default().fg(app.theme.text_bright).bg(row_bg),
        ),
    ];
    if with_cursor && label != "priority" {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(row_bg),
        ));
    }
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if used < inner_width {
        spans.push(Span::styled(
            " ".repeat(inner_width - used),
            Style::default().bg(row_bg),
        ));
    }
    Line::from(spans)
}
