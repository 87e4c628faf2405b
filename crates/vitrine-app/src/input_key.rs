//! Abstract input events, independent of terminal library.
//!
//! `InputKey` and `PointerEvent` are converted from crossterm events at the
//! TUI boundary so the controllers in this crate never see terminal types.

/// Abstract input key event, independent of terminal library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Tab,
    /// Shift+Tab (BackTab)
    BackTab,
    Backspace,
}

/// Kind of pointer activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary button pressed
    Click,
    /// Pointer moved without buttons
    Move,
    /// Wheel scrolled up
    ScrollUp,
    /// Wheel scrolled down
    ScrollDown,
}

/// Pointer event in terminal cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    pub fn click(column: u16, row: u16) -> Self {
        Self {
            kind: PointerKind::Click,
            column,
            row,
        }
    }

    pub fn moved(column: u16, row: u16) -> Self {
        Self {
            kind: PointerKind::Move,
            column,
            row,
        }
    }
}
