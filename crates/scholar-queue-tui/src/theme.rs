use ratatui::style::{Color, Modifier, Style};

use crate::model::activity::LogLevel;

/// Color theme for the TUI.
pub struct Theme {
    pub saved: Color,
    pub warn: Color,
    pub highlight_border: Color,
    pub highlight_bg: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub active: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            saved: Color::Rgb(0, 210, 0),
            warn: Color::Yellow,
            highlight_border: Color::Red,
            highlight_bg: Color::Rgb(80, 70, 20),

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            active: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, Scholar-blue accents.
    pub fn modern() -> Self {
        Self {
            saved: Color::Rgb(0, 200, 80),
            warn: Color::Rgb(255, 200, 0),
            highlight_border: Color::Rgb(255, 60, 60),
            highlight_bg: Color::Rgb(255, 243, 205),

            header_fg: Color::White,
            header_bg: Color::Rgb(66, 133, 244),
            border: Color::Rgb(66, 133, 244),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            active: Color::Rgb(60, 140, 255),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn log_color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Info => self.text,
            LogLevel::Success => self.saved,
            LogLevel::Warn => self.warn,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.active).add_modifier(Modifier::BOLD)
    }

    /// Save button after the page finished loading.
    pub fn save_highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_border)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
