//! Footer with key hints for the current mode

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

const GRID_HINTS: &[(&str, &str)] = &[
    ("←↓↑→", "move"),
    ("Enter", "details"),
    ("1-9", "filter"),
    ("r", "reload"),
    ("q", "quit"),
];

const MODAL_HINTS: &[(&str, &str)] = &[
    ("←→", "slide"),
    ("1-9", "jump"),
    ("b", "buy"),
    ("Esc", "close"),
];

/// Single-row hint bar
pub struct Footer {
    modal_open: bool,
}

impl Footer {
    pub fn new(modal_open: bool) -> Self {
        Self { modal_open }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        let hints = if self.modal_open {
            MODAL_HINTS
        } else {
            GRID_HINTS
        };
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", styles::text_muted()));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {action}"), styles::text_muted()));
        }
        Line::from(spans).render(area, buf);
    }
}
