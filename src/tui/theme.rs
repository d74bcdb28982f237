//! Theme support for the TUI.

use ratatui::style::Color;

use crate::model::{Priority, SocialPostStatus, TaskStatus};

/// A complete color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary accent color (headers, selected items, active elements)
    pub primary: Color,
    /// Secondary accent color (labels, success indicators)
    pub secondary: Color,
    /// Tertiary accent color (highlights, warnings)
    pub accent: Color,
    /// Main text color
    pub text: Color,
    /// Dimmed text color (descriptions, secondary info)
    pub text_dim: Color,
    /// Muted text color (placeholders, hints)
    pub text_muted: Color,
    /// Background color (Reset uses terminal default)
    pub background: Color,
    /// Selected item background
    pub selected_bg: Color,
    /// Border color
    pub border: Color,
    /// Success indicator color
    pub success: Color,
    /// Warning indicator color
    pub warning: Color,
    /// Error indicator color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(250, 204, 21),     // Brand yellow
            secondary: Color::Rgb(16, 185, 129),   // Emerald
            accent: Color::Rgb(99, 102, 241),      // Indigo
            text: Color::White,
            text_dim: Color::Rgb(156, 163, 175),   // Gray-400
            text_muted: Color::Rgb(107, 114, 128), // Gray-500
            background: Color::Reset,
            selected_bg: Color::Rgb(55, 65, 81),   // Gray-700
            border: Color::Rgb(75, 85, 99),        // Gray-600
            success: Color::Rgb(34, 197, 94),      // Green
            warning: Color::Rgb(234, 179, 8),      // Yellow
            error: Color::Rgb(239, 68, 68),        // Red
        }
    }
}

impl Theme {
    /// Badge color for a task priority.
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.error,
            Priority::Medium => self.warning,
            Priority::Low => self.success,
        }
    }

    /// Badge color for a task status.
    pub fn task_status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Todo => self.text_dim,
            TaskStatus::InProgress => self.accent,
            TaskStatus::Done => self.success,
        }
    }

    /// Badge color for a social post status.
    pub fn post_status_color(&self, status: SocialPostStatus) -> Color {
        match status {
            SocialPostStatus::Draft => self.text_dim,
            SocialPostStatus::Scheduled => self.accent,
            SocialPostStatus::Posted => self.success,
            SocialPostStatus::Error => self.error,
        }
    }
}
