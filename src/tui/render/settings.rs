use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, RefList, SettingsRow};

use super::{centered_rect, truncate_to_width};

/// Settings overlay: theme, default views, and the reference lists
pub fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let Some(settings) = &app.settings else {
        return;
    };
    let bg = app.theme.background;
    let rows = app.settings_rows();

    let height = (rows.len() as u16 + 6).min(area.height);
    let overlay_area = centered_rect(52.min(area.width), height, area);
    frame.render_widget(Clear, overlay_area);

    let inner_width = overlay_area.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        " Settings",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (i, row) in rows.iter().enumerate() {
        let selected = i == settings.cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let (label, value): (String, String) = match row {
            SettingsRow::Theme => (
                "theme".to_string(),
                format!("\u{2039} {} \u{203A}", match app.store.settings.theme {
                    crate::model::ThemeKind::Dark => "dark",
                    crate::model::ThemeKind::Light => "light",
                }),
            ),
            SettingsRow::DefaultView => (
                "default view".to_string(),
                format!("\u{2039} {} \u{203A}", app.store.settings.default_view.label()),
            ),
            SettingsRow::DefaultCalendarView => (
                "calendar scale".to_string(),
                format!(
                    "\u{2039} {} \u{203A}",
                    app.store.settings.default_calendar_view.label()
                ),
            ),
            SettingsRow::Project(idx) => (
                "  project".to_string(),
                app.store
                    .projects
                    .get_index(*idx)
                    .cloned()
                    .unwrap_or_default(),
            ),
            SettingsRow::AddProject => ("  + add project".to_string(), String::new()),
            SettingsRow::Assignee(idx) => (
                "  assignee".to_string(),
                app.store
                    .assignees
                    .get_index(*idx)
                    .cloned()
                    .unwrap_or_default(),
            ),
            SettingsRow::AddAssignee => ("  + add assignee".to_string(), String::new()),
        };

        let label_style = Style::default()
            .fg(if selected {
                app.theme.highlight
            } else {
                app.theme.dim
            })
            .bg(row_bg);
        let mut spans = vec![
            Span::styled(format!(" {label:<18}"), label_style),
            Span::styled(
                truncate_to_width(&value, inner_width.saturating_sub(20)),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
        ];
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if used < inner_width {
            spans.push(Span::styled(
                " ".repeat(inner_width - used),
                Style::default().bg(row_bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    // Name prompt while adding a reference
    if let Some((list, buffer)) = &settings.adding {
        let what = match list {
            RefList::Projects => "new project",
            RefList::Assignees => "new assignee",
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {what}: "),
                Style::default().fg(app.theme.highlight).bg(bg),
            ),
            Span::styled(
                buffer.clone(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        ]));
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
