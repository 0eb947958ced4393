use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, DetailField};

use super::{centered_rect, truncate_to_width};

/// Detail editor overlay: one row per field, the selected row editable
pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = &app.detail else {
        return;
    };
    let Some(task) = app.store.task(&detail.task_id) else {
        return;
    };

    let bg = app.theme.background;
    let height = (DetailField::ALL.len() as u16 + 4).min(area.height);
    let overlay_area = centered_rect(64.min(area.width), height, area);
    frame.render_widget(Clear, overlay_area);

    let inner_width = overlay_area.width.saturating_sub(2) as usize;
    let value_width = inner_width.saturating_sub(16);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(&task.title, inner_width.saturating_sub(1))),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (i, field) in DetailField::ALL.iter().enumerate() {
        let selected = i == detail.field;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let label_style = Style::default()
            .fg(if selected {
                app.theme.highlight
            } else {
                app.theme.dim
            })
            .bg(row_bg);

        let mut spans = vec![Span::styled(format!(" {:<12}", field.label()), label_style)];

        let editing = selected && detail.edit.is_some();
        if editing {
            let buffer = detail.edit.as_deref().unwrap_or_default();
            spans.push(Span::styled(
                truncate_to_width(buffer, value_width),
                Style::default().fg(app.theme.text_bright).bg(row_bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ));
        } else {
            let value = field.value(task);
            let value_color = match field {
                DetailField::Status => app.theme.status_color(task.status),
                DetailField::Priority => app.theme.priority_color(task.priority),
                DetailField::Deadline if task.deadline.is_some() => {
                    let class = crate::ops::classify(
                        task.deadline.unwrap_or(app.today),
                        app.today,
                    );
                    app.theme.deadline_color(class)
                }
                _ => app.theme.text,
            };
            spans.push(Span::styled(
                truncate_to_width(&value, value_width),
                Style::default().fg(value_color).bg(row_bg),
            ));
        }

        // Solid selection background across the row
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if used < inner_width {
            spans.push(Span::styled(
                " ".repeat(inner_width - used),
                Style::default().bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
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
