//! Neon palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use sentinel_core::NotificationKind;

// ── Colors ─────────────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255);
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234);
pub const CORAL: Color = Color::Rgb(255, 106, 193);
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140);
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123);
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99);

// ── Status colors ──────────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207);
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164);
pub const BG_DARK: Color = Color::Rgb(30, 31, 41);
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253);

// ── Styles ─────────────────────────────────────────────────────────────

/// Panel titles.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Active view tab in the header.
pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Status bar hint labels.
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// The key in a status bar hint.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Row label on a card ("Address", "Players", ...).
pub fn card_label() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn card_value() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Large number inside a stat card.
pub fn stat_value(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn badge_free() -> Style {
    Style::default()
        .fg(SUCCESS_GREEN)
        .add_modifier(Modifier::BOLD)
}

pub fn badge_occupied() -> Style {
    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)
}

pub fn badge_id() -> Style {
    Style::default().fg(LIGHT_BLUE)
}

// ── Notifications ─────────────────────────────────────────────────────

/// Accent color shared by every banner of a kind.
pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => SUCCESS_GREEN,
        NotificationKind::Warning => ELECTRIC_YELLOW,
        NotificationKind::Error => ERROR_RED,
    }
}

pub fn notification_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✓",
        NotificationKind::Warning => "!",
        NotificationKind::Error => "✗",
    }
}
