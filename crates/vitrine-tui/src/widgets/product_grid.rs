//! Product grid: masonry cards, or the loading and failure states
//!
//! Cards are positioned by the [`LayoutHandle`] in grid coordinates. Each
//! card is drawn into its own scratch buffer and copied onto the screen row
//! by row, so a card scrolled half out of view is clipped instead of
//! re-flowed.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;
use vitrine_app::grid::{Card, GridContent, GridState};
use vitrine_app::layout::{wrap_words, LayoutHandle, Placement, CARD_CHROME_COLS};
use vitrine_core::PLACEHOLDER_IMAGE_URL;

use crate::theme::{palette, styles};

/// Screen regions of visible cards, clipped to `area`.
///
/// Cards scrolled entirely out of view are omitted.
pub fn card_regions(layout: &LayoutHandle, scroll: u16, area: Rect) -> Vec<(usize, Rect)> {
    layout
        .placements()
        .iter()
        .filter_map(|placement| {
            screen_rect(placement, scroll, area).map(|(rect, _)| (placement.card, rect))
        })
        .collect()
}

/// Visible part of a placement on screen, plus the first card row shown
fn screen_rect(placement: &Placement, scroll: u16, area: Rect) -> Option<(Rect, u16)> {
    let top = i32::from(area.y) + i32::from(placement.y) - i32::from(scroll);
    let bottom = top + i32::from(placement.height);
    let visible_top = top.max(i32::from(area.y));
    let visible_bottom = bottom.min(i32::from(area.bottom()));
    if visible_top >= visible_bottom {
        return None;
    }

    let x = area.x.saturating_add(placement.x);
    if x >= area.right() {
        return None;
    }
    let width = placement.width.min(area.right() - x);
    let rect = Rect::new(
        x,
        visible_top as u16,
        width,
        (visible_bottom - visible_top) as u16,
    );
    Some((rect, (visible_top - top) as u16))
}

/// Short label for an image URL: its file name
pub fn image_label(url: &str) -> &str {
    if url == PLACEHOLDER_IMAGE_URL {
        return "no image";
    }
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(url)
}

/// Masonry product grid
pub struct ProductGrid<'a> {
    grid: &'a GridState,
    layout: Option<&'a LayoutHandle>,
    image_rows: u16,
}

impl<'a> ProductGrid<'a> {
    pub fn new(grid: &'a GridState, layout: Option<&'a LayoutHandle>) -> Self {
        Self {
            grid,
            layout,
            image_rows: 0,
        }
    }

    pub fn image_rows(mut self, rows: u16) -> Self {
        self.image_rows = rows;
        self
    }

    fn render_message(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
        if area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.y + area.height / 3, area.width, 1);
        Paragraph::new(Span::styled(text.to_string(), style))
            .alignment(Alignment::Center)
            .render(row, buf);
    }

    fn render_card(&self, card: &Card, placement: &Placement, area: Rect, buf: &mut Buffer) {
        let Some((target, first_row)) = screen_rect(placement, self.grid.scroll, area) else {
            return;
        };

        let local = Rect::new(0, 0, placement.width, placement.height);
        let mut scratch = Buffer::empty(local);
        draw_card(
            card,
            local,
            self.image_rows,
            self.grid.focused == Some(placement.card),
            self.grid.hovered == Some(placement.card),
            &mut scratch,
        );

        for row in 0..target.height {
            for col in 0..target.width {
                let src = &scratch[(col, first_row + row)];
                if let Some(cell) = buf.cell_mut((target.x + col, target.y + row)) {
                    *cell = src.clone();
                }
            }
        }
    }
}

fn draw_card(
    card: &Card,
    area: Rect,
    image_rows: u16,
    focused: bool,
    hovered: bool,
    buf: &mut Buffer,
) {
    let mut block = styles::glass_block(focused).style(Style::default().bg(palette::CARD_BG));
    if hovered && !focused {
        block = block.border_style(Style::default().fg(palette::ACCENT_DIM));
    }
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.is_empty() {
        return;
    }

    // Image frame
    let image = Rect::new(inner.x, inner.y, inner.width, image_rows.min(inner.height));
    buf.set_style(image, Style::default().bg(palette::IMAGE_BG));
    if image.height > 0 {
        let label_row = Rect::new(image.x, image.y + image.height / 2, image.width, 1);
        Paragraph::new(Span::styled(
            image_label(&card.image_url).to_string(),
            styles::text_muted().bg(palette::IMAGE_BG),
        ))
        .alignment(Alignment::Center)
        .render(label_row, buf);
    }

    // Name, wrapped exactly as the layout measured it
    let text_width = area.width.saturating_sub(CARD_CHROME_COLS);
    let name_style = if focused {
        styles::accent_bold()
    } else {
        styles::text_primary()
    };
    let name_top = image.bottom();
    for (i, line) in wrap_words(&card.name, text_width).iter().enumerate() {
        let y = name_top + i as u16;
        if y >= inner.bottom() {
            break;
        }
        buf.set_span(
            inner.x + 1,
            y,
            &Span::styled(line.clone(), name_style),
            text_width,
        );
    }
}

impl Widget for ProductGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let cards = match self.grid.content() {
            GridContent::Loading => {
                Self::render_message(area, buf, "Loading products…", styles::text_muted());
                return;
            }
            GridContent::Failed(message) => {
                Self::render_message(area, buf, message, styles::status_red());
                return;
            }
            GridContent::Cards(cards) => cards,
        };

        let Some(layout) = self.layout else {
            if !cards.is_empty() {
                Self::render_message(area, buf, "Arranging products…", styles::text_muted());
            }
            return;
        };

        if layout.placements().is_empty() {
            let text = if cards.is_empty() {
                "No products yet."
            } else {
                "Nothing matches this filter."
            };
            Self::render_message(area, buf, text, styles::text_muted());
            return;
        }

        for placement in layout.placements() {
            if let Some(card) = cards.get(placement.card) {
                self.render_card(card, placement, area, buf);
            }
        }

        // Scroll position, bottom-right
        let total = layout.total_height();
        if total > area.height {
            let shown = (self.grid.scroll + area.height).min(total);
            let indicator = format!(" {}/{} ", shown, total);
            let width = indicator.width() as u16;
            if width < area.width {
                Paragraph::new(Line::from(Span::styled(indicator, styles::text_secondary())))
                    .render(
                        Rect::new(area.right() - width, area.bottom() - 1, width, 1),
                        buf,
                    );
            }
        }
    }
}
