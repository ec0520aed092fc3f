//! Neon palette and semantic styles for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn text() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected list row.
pub fn selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Input placeholder text.
pub fn placeholder() -> Style {
    Style::default().fg(BORDER_GRAY).add_modifier(Modifier::ITALIC)
}

/// Prices and totals.
pub fn price() -> Style {
    Style::default()
        .fg(SUCCESS_GREEN)
        .add_modifier(Modifier::BOLD)
}

/// Badges such as "Cheapest" or "RETURN".
pub fn badge() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(CORAL)
        .add_modifier(Modifier::BOLD)
}

/// The active sort label.
pub fn sort_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn sort_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Panel mid-transition (opening or closing).
pub fn transitioning() -> Style {
    Style::default().fg(BORDER_GRAY).add_modifier(Modifier::DIM)
}

/// Primary call-to-action button.
pub fn button() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}
