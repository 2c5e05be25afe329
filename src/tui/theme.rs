//! Theme and Styling
//!
//! Colors and styles for the terminal dashboard.

use crate::view::{BannerState, Severity};
use ratatui::style::{Color, Modifier, Style};

/// Application theme
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Dashboard accent (the page's indigo)
    pub const ACCENT: Color = Color::Rgb(102, 126, 234);

    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);
    pub const WARNING: Color = Color::Rgb(251, 191, 36);
    pub const ERROR: Color = Color::Rgb(239, 68, 68);
    pub const INFO: Color = Color::Rgb(0, 212, 255);

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 229, 229);
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 161);
    pub const TEXT_DIM: Color = Color::Rgb(82, 82, 82);

    // === Border Colors ===

    pub const BORDER: Color = Color::Rgb(51, 51, 51);
    pub const BORDER_FOCUSED: Color = Color::Rgb(118, 75, 162);

    // === Styles ===

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Selected tab / highlighted value
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Enabled button
    pub fn button() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled button while a request is pending
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY).bg(Self::BORDER)
    }

    pub fn severity_color(severity: Severity) -> Color {
        match severity {
            Severity::Info => Self::INFO,
            Severity::Success => Self::SUCCESS,
            Severity::Warning => Self::WARNING,
            Severity::Error => Self::ERROR,
        }
    }

    pub fn severity(severity: Severity) -> Style {
        Style::default().fg(Self::severity_color(severity))
    }

    pub fn banner(state: BannerState) -> Style {
        match state {
            BannerState::Hit => Style::default().fg(Self::SUCCESS),
            BannerState::Miss | BannerState::Bypass => Style::default().fg(Self::WARNING),
        }
    }

    /// Badge style for the cache source ("REDIS", "DATABASE")
    pub fn badge(state: BannerState) -> Style {
        let bg = match state {
            BannerState::Hit => Self::SUCCESS,
            BannerState::Miss | BannerState::Bypass => Self::WARNING,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Parse a `#rrggbb` chart color; anything else falls back to the accent.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Theme::ACCENT;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Theme::ACCENT,
    }
}

/// Status and toast icons
pub struct Icons;

impl Icons {
    pub const SUCCESS: &'static str = "✓";
    pub const INFO: &'static str = "●";
    pub const WARNING: &'static str = "!";
    pub const ERROR: &'static str = "✗";
    pub const ARROW_LEFT: &'static str = "◀";
    pub const ARROW_RIGHT: &'static str = "▶";

    pub fn severity(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => Self::INFO,
            Severity::Success => Self::SUCCESS,
            Severity::Warning => Self::WARNING,
            Severity::Error => Self::ERROR,
        }
    }
}
