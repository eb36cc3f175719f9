//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const CPU_COLOR: Color = Color::Cyan;
    pub const DISK_COLOR: Color = Color::Yellow;
    pub const STATUS_COLOR: Color = Color::Green;
    pub const PROMPT_COLOR: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Sorted column header.
    pub fn sorted_header() -> Style {
        Self::table_header().add_modifier(Modifier::UNDERLINED)
    }

    pub fn cpu() -> Style {
        Style::default().fg(Theme::CPU_COLOR)
    }

    pub fn disk() -> Style {
        Style::default().fg(Theme::DISK_COLOR)
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn status() -> Style {
        Style::default()
            .fg(Theme::STATUS_COLOR)
            .add_modifier(Modifier::BOLD)
    }

    /// Prompt input style.
    pub fn prompt() -> Style {
        Style::default()
            .fg(Theme::PROMPT_COLOR)
            .add_modifier(Modifier::UNDERLINED)
    }
}
