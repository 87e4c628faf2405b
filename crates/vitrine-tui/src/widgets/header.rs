//! Header bar: title, catalog size and the hover indicator

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

/// Main header
pub struct MainHeader {
    /// `None` while the catalog is loading or failed
    product_count: Option<usize>,
    /// Pointer is over a card
    hovered: bool,
}

impl MainHeader {
    pub fn new(product_count: Option<usize>) -> Self {
        Self {
            product_count,
            hovered: false,
        }
    }

    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }
}

impl Widget for MainHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![
            Span::styled(" ◆ ", styles::accent()),
            Span::styled("Vitrine", styles::accent_bold()),
        ];
        if let Some(count) = self.product_count {
            let noun = if count == 1 { "product" } else { "products" };
            spans.push(Span::styled("  │  ", styles::text_muted()));
            spans.push(Span::styled(
                format!("{count} {noun}"),
                styles::text_secondary(),
            ));
        }
        Line::from(spans).render(inner, buf);

        // Cursor indicator, right-aligned
        let (dot, dot_style) = if self.hovered {
            ("●", styles::accent())
        } else {
            ("○", styles::text_muted())
        };
        Line::from(Span::styled(format!("{dot} "), dot_style))
            .right_aligned()
            .render(inner, buf);
    }
}
