//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Black; // Card and header backgrounds
pub const POPUP_BG: Color = Color::Rgb(28, 28, 32); // Modal background
pub const IMAGE_BG: Color = Color::Rgb(40, 36, 34); // Image frames

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray; // Inactive borders
pub const BORDER_ACTIVE: Color = Color::Rgb(212, 163, 115); // Focused borders

// --- Accent ---
pub const ACCENT: Color = Color::Rgb(212, 163, 115); // Warm sand
pub const ACCENT_DIM: Color = Color::Rgb(140, 110, 80);

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const TEXT_ON_ACCENT: Color = Color::Black;

// --- Status ---
pub const STATUS_RED: Color = Color::Red;

// --- Effects ---
pub const SHADOW: Color = Color::Black;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_is_distinct_from_background() {
        assert_ne!(ACCENT, DEEPEST_BG);
        assert_ne!(BORDER_ACTIVE, BORDER_DIM);
    }
}
