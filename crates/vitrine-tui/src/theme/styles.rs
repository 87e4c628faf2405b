//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Buttons ---
pub fn button_active() -> Style {
    Style::default()
        .fg(palette::TEXT_ON_ACCENT)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn button_inactive() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn button_disabled() -> Style {
    Style::default()
        .fg(palette::TEXT_MUTED)
        .add_modifier(Modifier::CROSSED_OUT)
}

// --- Status ---
pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::ACCENT)
}

// --- Blocks ---
/// Rounded container; accent border when focused
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}
