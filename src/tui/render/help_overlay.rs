use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::ViewKind;
use crate::tui::app::App;

use super::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(52, area.height.saturating_sub(4).min(30), area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Views", header_style)));
    add_binding(&mut lines, " 1/2/3", "Board / list / calendar", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Next view", key_style, desc_style);

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    match app.view {
        ViewKind::Kanban => {
            add_binding(&mut lines, " h/l", "Previous / next column", key_style, desc_style);
            add_binding(&mut lines, " j/k", "Card down / up", key_style, desc_style);
            add_binding(&mut lines, " m", "Move card (h/l, Enter drops)", key_style, desc_style);
        }
        ViewKind::List => {
            add_binding(&mut lines, " j/k", "Row down / up", key_style, desc_style);
            add_binding(&mut lines, " t", "Toggle grouped / flat table", key_style, desc_style);
        }
        ViewKind::Calendar => {
            add_binding(&mut lines, " h/l", "Previous / next day", key_style, desc_style);
            add_binding(&mut lines, " j/k", "Next / previous week", key_style, desc_style);
            add_binding(&mut lines, " [ ]", "Previous / next month", key_style, desc_style);
            add_binding(&mut lines, " v", "Cycle month / week / day", key_style, desc_style);
            add_binding(&mut lines, " t", "Jump to today", key_style, desc_style);
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " n", "New task", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+K", "Quick add (title only)", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Open detail editor", key_style, desc_style);
    add_binding(&mut lines, " D", "Duplicate task", key_style, desc_style);
    add_binding(&mut lines, " d", "Delete task (confirms)", key_style, desc_style);

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " /", "Search (live)", key_style, desc_style);
    add_binding(&mut lines, " f", "Filter bar", key_style, desc_style);
    add_binding(&mut lines, " s", "Settings", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{key:<12}");
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
