//! SynthBrute theme and color utilities.

use crate::notifications::NotificationLevel;
use datagrid_core::{Alignment, RowAction, SelectionPhase, SortDirection};
use ratatui::layout::Alignment as TextAlignment;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthBruteTheme {
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            text_muted: Color::Rgb(68, 68, 68),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }

    /// Theme by config name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "synthbrute" => Some(Self::synthbrute()),
            _ => None,
        }
    }

    pub fn border_color(&self, focused: bool) -> Color {
        if focused {
            self.border_focus
        } else {
            self.border
        }
    }
}

impl Default for SynthBruteTheme {
    fn default() -> Self {
        Self::synthbrute()
    }
}

pub fn notification_color(level: NotificationLevel, theme: &SynthBruteTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

pub fn row_action_color(action: RowAction, theme: &SynthBruteTheme) -> Color {
    if action.is_destructive() {
        theme.error
    } else {
        theme.text
    }
}

/// Chips with an applied value stand out from idle ones.
pub fn filter_chip_color(active: bool, theme: &SynthBruteTheme) -> Color {
    if active {
        theme.secondary
    } else {
        theme.text_dim
    }
}

pub fn selection_color(phase: SelectionPhase, theme: &SynthBruteTheme) -> Color {
    match phase {
        SelectionPhase::NoRowsSelected => theme.text_dim,
        SelectionPhase::SomeRowsSelected => theme.tertiary,
    }
}

pub fn sort_glyph(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "",
    }
}

pub fn text_alignment(align: Option<Alignment>) -> TextAlignment {
    match align.unwrap_or_default() {
        Alignment::Left => TextAlignment::Left,
        Alignment::Center => TextAlignment::Center,
        Alignment::Right => TextAlignment::Right,
    }
}
