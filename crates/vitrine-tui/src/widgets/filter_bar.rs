//! Filter bar: caption followed by one button per filter

use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};
use unicode_width::UnicodeWidthStr;
use vitrine_app::filter::{FilterBar, FILTER_CAPTION};

use crate::theme::styles;

/// Columns between two buttons
const BUTTON_GAP: u16 = 1;

fn caption_text() -> String {
    format!(" {FILTER_CAPTION}: ")
}

fn button_text(label: &str) -> String {
    format!(" {label} ")
}

/// Screen regions of the buttons that fit in `area`, in button order.
///
/// Buttons past the right edge are dropped rather than clipped, so index
/// `i` of the result is always button `i`.
pub fn button_regions(bar: &FilterBar, area: Rect) -> Vec<Rect> {
    if area.height == 0 {
        return Vec::new();
    }
    let mut x = area.x.saturating_add(caption_text().width() as u16);
    let mut regions = Vec::new();

    for button in bar.buttons() {
        let width = button_text(&button.label).width() as u16;
        if x.saturating_add(width) > area.right() {
            break;
        }
        regions.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width + BUTTON_GAP);
    }
    regions
}

/// Filter button row
pub struct FilterBarWidget<'a> {
    bar: &'a FilterBar,
}

impl<'a> FilterBarWidget<'a> {
    pub fn new(bar: &'a FilterBar) -> Self {
        Self { bar }
    }
}

impl Widget for FilterBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        buf.set_span(
            area.x,
            area.y,
            &Span::styled(caption_text(), styles::text_muted()),
            area.width,
        );

        for (index, region) in button_regions(self.bar, area).into_iter().enumerate() {
            let Some(button) = self.bar.buttons().get(index) else {
                break;
            };
            let style = if self.bar.active() == Some(index) {
                styles::button_active()
            } else {
                styles::button_inactive()
            };
            buf.set_span(
                region.x,
                region.y,
                &Span::styled(button_text(&button.label), style),
                region.width,
            );
        }
    }
}
