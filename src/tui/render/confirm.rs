use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::{centered_rect, truncate_to_width};

/// Confirmation popup for destructive actions
pub fn render_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let bg = app.theme.background;
    let width = (confirm.message.chars().count() as u16 + 6).clamp(30, area.width);
    let overlay_area = centered_rect(width, 5, area);
    frame.render_widget(Clear, overlay_area);

    let inner_width = overlay_area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(&confirm.message, inner_width)),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " y",
                Style::default().fg(app.theme.red).bg(bg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" delete   ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled(
                "n",
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" cancel", Style::default().fg(app.theme.text).bg(bg)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}
