use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::Stats;
use crate::tui::app::{App, Mode, ToastKind};

/// Render the status row (bottom of screen): toast if one is live,
/// otherwise the summary line plus the key hints for the current mode
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    if let Some(toast) = &app.toast {
        let color = match toast.kind {
            ToastKind::Info => app.theme.text,
            ToastKind::Success => app.theme.green,
            ToastKind::Error => app.theme.red,
        };
        let line = Line::from(Span::styled(
            format!(" {}", toast.text),
            Style::default().fg(color).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let mut spans: Vec<Span> = Vec::new();
    let hint: &str = match app.mode {
        Mode::Normal => {
            let stats = Stats::compute(&app.store, app.today);
            let mut summary = format!(" {} tasks", stats.total);
            if stats.doing > 0 {
                summary.push_str(&format!(" \u{00B7} {} doing", stats.doing));
            }
            if stats.overdue > 0 {
                summary.push_str(&format!(" \u{00B7} {} overdue", stats.overdue));
            }
            if stats.done_today > 0 {
                summary.push_str(&format!(" \u{00B7} {} done today", stats.done_today));
            }
            spans.push(Span::styled(summary, Style::default().fg(app.theme.dim).bg(bg)));
            "n new  / search  f filter  ? help  q quit "
        }
        Mode::Search => {
            spans.push(Span::styled(
                format!(" /{}", app.search_input),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            "Enter commit  Esc cancel "
        }
        Mode::Filter => "h/l field  j/k value  c clear  Esc close ",
        Mode::Move => "h/l column  Enter drop  Esc cancel ",
        Mode::Form => "Tab next field  Enter save  Esc cancel ",
        Mode::Detail => "j/k field  Enter edit  h/l adjust  Esc close ",
        Mode::Confirm => "y confirm  n cancel ",
        Mode::Settings => "j/k row  Enter change  d remove  Esc close ",
    };

    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
