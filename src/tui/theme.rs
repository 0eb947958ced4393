use ratatui::style::Color;

use crate::model::{Priority, Status, ThemeKind};
use crate::ops::DeadlineClass;

/// Color palette for the TUI, selected by the persisted theme setting
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub purple: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x18),
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6A, 0x6A, 0x80),
            highlight: Color::Rgb(0x56, 0xB6, 0xF0),
            red: Color::Rgb(0xF0, 0x50, 0x50),
            yellow: Color::Rgb(0xF0, 0xC0, 0x40),
            green: Color::Rgb(0x58, 0xD8, 0x88),
            cyan: Color::Rgb(0x48, 0xD0, 0xD0),
            blue: Color::Rgb(0x56, 0x86, 0xF0),
            purple: Color::Rgb(0xB0, 0x70, 0xE8),
            selection_bg: Color::Rgb(0x28, 0x30, 0x48),
            selection_border: Color::Rgb(0x56, 0xB6, 0xF0),
            search_match_bg: Color::Rgb(0xF0, 0xC0, 0x40),
            search_match_fg: Color::Rgb(0x10, 0x10, 0x18),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xF8, 0xF8, 0xF4),
            text: Color::Rgb(0x30, 0x30, 0x3A),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            dim: Color::Rgb(0x90, 0x90, 0x9C),
            highlight: Color::Rgb(0x20, 0x70, 0xC0),
            red: Color::Rgb(0xC0, 0x30, 0x30),
            yellow: Color::Rgb(0xB0, 0x80, 0x10),
            green: Color::Rgb(0x20, 0x90, 0x50),
            cyan: Color::Rgb(0x10, 0x88, 0x88),
            blue: Color::Rgb(0x30, 0x50, 0xC0),
            purple: Color::Rgb(0x80, 0x40, 0xB0),
            selection_bg: Color::Rgb(0xDC, 0xE6, 0xF4),
            selection_border: Color::Rgb(0x20, 0x70, 0xC0),
            search_match_bg: Color::Rgb(0xF0, 0xC0, 0x40),
            search_match_fg: Color::Rgb(0x30, 0x30, 0x3A),
        }
    }

    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }

    /// Priority color coding: the same color drives the kanban marker,
    /// the list column, and the calendar dot
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::P0 => self.red,
            Priority::P1 => self.yellow,
            Priority::P2 => self.blue,
            Priority::P3 => self.dim,
        }
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Backlog => self.dim,
            Status::Todo => self.text,
            Status::Doing => self.highlight,
            Status::Review => self.purple,
            Status::Done => self.green,
        }
    }

    pub fn deadline_color(&self, class: DeadlineClass) -> Color {
        match class {
            DeadlineClass::Overdue => self.red,
            DeadlineClass::Today => self.yellow,
            DeadlineClass::Future => self.dim,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_follows_settings_kind() {
        let dark = Theme::for_kind(ThemeKind::Dark);
        let light = Theme::for_kind(ThemeKind::Light);
        assert_ne!(dark.background, light.background);
    }

    #[test]
    fn priority_colors_distinguish_urgent_from_low() {
        let theme = Theme::dark();
        assert_eq!(theme.priority_color(Priority::P0), theme.red);
        assert_eq!(theme.priority_color(Priority::P3), theme.dim);
    }

    #[test]
    fn deadline_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.deadline_color(DeadlineClass::Overdue), theme.red);
        assert_eq!(theme.deadline_color(DeadlineClass::Today), theme.yellow);
    }
}
