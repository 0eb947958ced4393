use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ViewKind;
use crate::tui::app::{App, Mode, SyncStatus};

/// Render the tab bar: one tab per view plus the sync indicator, with the
/// separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    // Leading icon
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25A6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(" ", bg_style));

    for (key, view) in [
        ('1', ViewKind::Kanban),
        ('2', ViewKind::List),
        ('3', ViewKind::Calendar),
    ] {
        let is_current = app.view == view;
        let style = tab_style(app, is_current);
        spans.push(Span::styled(format!(" {} {} ", key, view.label()), style));
        sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
        spans.push(sep.clone());
    }

    // Sync indicator, right-aligned
    let (symbol, label, color) = match app.sync_status {
        SyncStatus::Offline => ("\u{25CB}", "offline", app.theme.dim),
        SyncStatus::Synced => ("\u{25CF}", "synced", app.theme.green),
        SyncStatus::Pending => ("\u{25CF}", "syncing", app.theme.yellow),
        SyncStatus::LocalOnly => ("\u{25CF}", "local only", app.theme.red),
    };
    let indicator = format!("{symbol} {label} ");
    let width = area.width as usize;
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let indicator_width = indicator.chars().count();
    if used + indicator_width < width {
        spans.push(Span::styled(" ".repeat(width - used - indicator_width), bg_style));
        spans.push(Span::styled(indicator, Style::default().fg(color).bg(bg)));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    // Right-aligned indicator for the active search or filter selection
    let mut indicator_spans: Vec<Span> = Vec::new();
    if let Some(query) = &app.active_query {
        indicator_spans.push(Span::styled(
            "search: ",
            Style::default().fg(app.theme.purple).bg(bg),
        ));
        indicator_spans.push(Span::styled(
            query.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    } else if app.filters.is_active() || app.mode == Mode::Filter {
        indicator_spans.push(Span::styled(
            "filter: ",
            Style::default().fg(app.theme.purple).bg(bg),
        ));
        let mut parts: Vec<String> = Vec::new();
        if let Some(assignee) = &app.filters.assignee {
            parts.push(format!("@{assignee}"));
        }
        if let Some(project) = &app.filters.project {
            parts.push(project.clone());
        }
        if let Some(priority) = app.filters.priority {
            parts.push(priority.label().to_string());
        }
        let text = if parts.is_empty() {
            "any".to_string()
        } else {
            parts.join(" ")
        };
        indicator_spans.push(Span::styled(
            text,
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    if indicator_spans.is_empty() {
        let mut line = String::with_capacity(width * 3);
        for col in 0..width {
            if sep_cols.contains(&col) {
                line.push('\u{2534}');
            } else {
                line.push('\u{2500}');
            }
        }
        let sep_widget = Paragraph::new(line).style(Style::default().fg(dim).bg(bg));
        frame.render_widget(sep_widget, area);
        return;
    }

    let indicator_width: usize = indicator_spans.iter().map(|s| s.content.chars().count()).sum();
    // +2: one space before the indicator, one space of right edge buffer
    let separator_end = width.saturating_sub(indicator_width + 2);

    let mut spans: Vec<Span> = Vec::new();
    let mut sep_text = String::with_capacity(separator_end * 3);
    for col in 0..separator_end {
        if sep_cols.contains(&col) {
            sep_text.push('\u{2534}');
        } else {
            sep_text.push('\u{2500}');
        }
    }
    spans.push(Span::styled(sep_text, Style::default().fg(dim).bg(bg)));
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.extend(indicator_spans);
    let current_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if current_width < width {
        spans.push(Span::styled(
            " ".repeat(width - current_width),
            Style::default().bg(bg),
        ));
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
