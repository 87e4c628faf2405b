//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, product count and hover indicator
    pub header: Rect,

    /// Filter buttons (one row)
    pub filter_bar: Rect,

    /// Product grid
    pub grid: Rect,

    /// Key hints
    pub footer: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Length(1), // Filter bar
        Constraint::Min(1),    // Grid
        Constraint::Length(1), // Footer
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        filter_bar: chunks[1],
        grid: chunks[2],
        footer: chunks[3],
    }
}
