//! Product detail modal: carousel, description, tags and the buy button
//!
//! Geometry lives in [`ModalLayout`] so the renderer and the pointer hit
//! map agree on where every control is.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use vitrine_app::modal::{BuyLink, ModalController};

use super::modal_overlay::{centered_rect, dim_background, render_shadow};
use super::product_grid::image_label;
use crate::theme::{palette, styles};

const MODAL_MAX_WIDTH: u16 = 72;
const MODAL_MAX_HEIGHT: u16 = 26;

/// How far the modal travels during enter and exit transitions
const SLIDE_ROWS: u16 = 4;

const CAROUSEL_MAX_ROWS: u16 = 10;

/// Rows under the carousel: dots, gap, description, gap, tags, gap, buy
const BODY_MIN_ROWS: u16 = 6;

const ARROW_WIDTH: u16 = 3;

const CLOSE_LABEL: &str = "[x]";
const BUY_LABEL: &str = "[ Buy on Vinted ]";

/// Screen geometry of the modal and its controls
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalLayout {
    pub frame: Rect,
    pub close: Rect,
    pub image: Rect,
    pub previous: Rect,
    pub next: Rect,
    pub dots: Vec<Rect>,
    pub description: Rect,
    pub tags: Rect,
    pub buy: Rect,
}

impl ModalLayout {
    /// Lay out a modal with `slides` pagination dots, pushed down by
    /// `offset_rows` and clipped to `area`.
    pub fn compute(area: Rect, slides: usize, offset_rows: u16) -> Self {
        let width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
        let height = area.height.saturating_sub(2).min(MODAL_MAX_HEIGHT);
        let mut frame = centered_rect(width, height, area);
        frame.y = frame.y.saturating_add(offset_rows);
        let frame = frame.intersection(area);

        let inner = Rect::new(
            frame.x.saturating_add(1),
            frame.y.saturating_add(1),
            frame.width.saturating_sub(2),
            frame.height.saturating_sub(2),
        );
        let clip = |rect: Rect| rect.intersection(inner);

        let close = Rect::new(
            frame.right().saturating_sub(CLOSE_LABEL.width() as u16 + 2),
            frame.y,
            CLOSE_LABEL.width() as u16,
            1,
        )
        .intersection(frame);

        let carousel_rows = inner
            .height
            .saturating_sub(BODY_MIN_ROWS)
            .min(CAROUSEL_MAX_ROWS);
        let middle = inner.y + carousel_rows / 2;
        let image = clip(Rect::new(
            inner.x + ARROW_WIDTH,
            inner.y,
            inner.width.saturating_sub(ARROW_WIDTH * 2),
            carousel_rows,
        ));
        let (previous, next) = if carousel_rows == 0 {
            (Rect::default(), Rect::default())
        } else {
            (
                clip(Rect::new(inner.x, middle, ARROW_WIDTH, 1)),
                clip(Rect::new(
                    inner.right().saturating_sub(ARROW_WIDTH),
                    middle,
                    ARROW_WIDTH,
                    1,
                )),
            )
        };

        let dots_y = inner.y + carousel_rows;
        let dots_width = (slides as u16).saturating_mul(2).saturating_sub(1);
        let dots = if slides == 0 || dots_width > inner.width || dots_y >= inner.bottom() {
            Vec::new()
        } else {
            let start = inner.x + (inner.width - dots_width) / 2;
            (0..slides as u16)
                .map(|i| Rect::new(start + i * 2, dots_y, 1, 1))
                .collect()
        };

        let text_x = inner.x.saturating_add(1);
        let text_width = inner.width.saturating_sub(2);
        let buy_y = inner.bottom().saturating_sub(1);
        let tags_y = buy_y.saturating_sub(2);
        let description_y = dots_y + 2;

        let buy = clip(Rect::new(text_x, buy_y, BUY_LABEL.width() as u16, 1));
        let tags = clip(Rect::new(text_x, tags_y, text_width, 1));
        let description = clip(Rect::new(
            text_x,
            description_y,
            text_width,
            tags_y.saturating_sub(1).saturating_sub(description_y),
        ));

        Self {
            frame,
            close,
            image,
            previous,
            next,
            dots,
            description,
            tags,
            buy,
        }
    }

    /// Layout for the modal as it should appear at `now`, or `None` when
    /// nothing is shown.
    pub fn for_modal(area: Rect, modal: &ModalController, now: Instant) -> Option<Self> {
        if !modal.is_visible() {
            return None;
        }
        let slides = modal.carousel().map_or(0, |c| c.len());
        let offset = modal
            .transition()
            .map_or(0, |t| t.offset_rows(now, SLIDE_ROWS));
        Some(Self::compute(area, slides, offset))
    }
}

/// Detail modal over the dimmed grid
pub struct ProductModal<'a> {
    modal: &'a ModalController,
    layout: &'a ModalLayout,
}

impl<'a> ProductModal<'a> {
    pub fn new(modal: &'a ModalController, layout: &'a ModalLayout) -> Self {
        Self { modal, layout }
    }

    fn render_carousel(&self, buf: &mut Buffer) {
        let Some(carousel) = self.modal.carousel() else {
            return;
        };
        let image = self.layout.image;
        if image.is_empty() {
            return;
        }

        buf.set_style(image, Style::default().bg(palette::IMAGE_BG));
        if let Some(slide) = carousel.current() {
            let label_row = Rect::new(image.x, image.y + image.height / 2, image.width, 1);
            Paragraph::new(Span::styled(
                image_label(&slide.image_url).to_string(),
                styles::text_secondary().bg(palette::IMAGE_BG),
            ))
            .alignment(Alignment::Center)
            .render(label_row, buf);

            if image.height > 2 {
                let caption_row = Rect::new(image.x, image.bottom() - 1, image.width, 1);
                Paragraph::new(Span::styled(
                    format!("{} · {}/{}", slide.alt, carousel.index() + 1, carousel.len()),
                    styles::text_muted().bg(palette::IMAGE_BG),
                ))
                .alignment(Alignment::Center)
                .render(caption_row, buf);
            }
        }

        for (rect, arrow) in [(self.layout.previous, " ‹ "), (self.layout.next, " › ")] {
            if !rect.is_empty() {
                buf.set_span(rect.x, rect.y, &Span::styled(arrow, styles::accent_bold()), rect.width);
            }
        }

        for (i, dot) in self.layout.dots.iter().enumerate() {
            let (symbol, style) = if i == carousel.index() {
                ("●", styles::accent())
            } else {
                ("○", styles::text_muted())
            };
            buf.set_span(dot.x, dot.y, &Span::styled(symbol, style), 1);
        }
    }
}

impl Widget for ProductModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(detail) = self.modal.detail() else {
            return;
        };
        dim_background(buf, area);

        let frame = self.layout.frame;
        if frame.is_empty() {
            return;
        }
        Clear.render(frame, buf);
        render_shadow(buf, frame);

        let block = styles::glass_block(true)
            .title(Line::from(Span::styled(
                format!(" {} ", detail.title),
                styles::accent_bold(),
            )))
            .style(Style::default().bg(palette::POPUP_BG));
        block.render(frame, buf);

        let close = self.layout.close;
        if !close.is_empty() {
            buf.set_span(close.x, close.y, &Span::styled(CLOSE_LABEL, styles::accent()), close.width);
        }

        self.render_carousel(buf);

        if !self.layout.description.is_empty() {
            Paragraph::new(detail.description.as_str())
                .style(styles::text_primary())
                .wrap(Wrap { trim: true })
                .render(self.layout.description, buf);
        }

        let tags = self.layout.tags;
        if !tags.is_empty() && !detail.tags.is_empty() {
            let spans: Vec<Span> = detail
                .tags
                .iter()
                .flat_map(|tag| {
                    [
                        Span::styled(format!("#{tag}"), styles::accent()),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans).render(tags, buf);
        }

        let buy = self.layout.buy;
        if !buy.is_empty() {
            let style = match detail.buy_link {
                BuyLink::Url(_) => styles::button_active(),
                BuyLink::Disabled => styles::button_disabled(),
            };
            buf.set_span(buy.x, buy.y, &Span::styled(BUY_LABEL, style), buy.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use std::time::Duration;
    use vitrine_core::{AssetBase, Product};

    fn product(images: &[&str], link: Option<&str>) -> Product {
        Product {
            name: "Scarf".into(),
            description: Some("Hand knitted from merino wool.".into()),
            material: Some("wool".into()),
            style: vec!["boho".into()],
            images: images.iter().map(|i| i.to_string()).collect(),
            link_vinted: link.map(str::to_string),
            ..Default::default()
        }
    }

    fn open_modal(product: &Product) -> ModalController {
        let assets = AssetBase::parse("https://cdn.test").unwrap();
        let mut modal = ModalController::new();
        modal.open(0, product, &assets, Instant::now(), Duration::ZERO);
        modal
    }

    fn draw(modal: &ModalController) -> (TestTerminal, ModalLayout) {
        let mut term = TestTerminal::new();
        let area = term.area();
        let layout = ModalLayout::for_modal(area, modal, Instant::now()).unwrap();
        term.render_widget(ProductModal::new(modal, &layout), area);
        (term, layout)
    }

    #[test]
    fn test_layout_fits_standard_terminal() {
        let layout = ModalLayout::compute(Rect::new(0, 0, 80, 24), 3, 0);

        assert_eq!(layout.frame, Rect::new(4, 1, 72, 22));
        assert_eq!(layout.close, Rect::new(71, 1, 3, 1));
        assert_eq!(layout.image.height, 10);
        assert_eq!(layout.dots.len(), 3);
        assert_eq!(layout.dots[1].x, layout.dots[0].x + 2);
        assert_eq!(layout.buy.y, 21);
        assert_eq!(layout.tags.y, 19);
        assert!(layout.description.height > 0);
        assert!(layout.previous.y == layout.next.y && layout.previous.x < layout.next.x);
    }

    #[test]
    fn test_layout_offset_moves_frame_down() {
        let area = Rect::new(0, 0, 80, 24);
        let resting = ModalLayout::compute(area, 1, 0);
        let sliding = ModalLayout::compute(area, 1, 2);

        assert_eq!(sliding.frame.y, resting.frame.y + 2);
        assert!(sliding.frame.bottom() <= area.bottom());
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let layout = ModalLayout::compute(Rect::new(0, 0, 6, 3), 5, 3);
        assert!(layout.dots.is_empty());

        let modal = open_modal(&product(&["img/a.jpg"], None));
        let mut term = TestTerminal::with_size(6, 3);
        term.render_widget(ProductModal::new(&modal, &layout), term.area());
    }

    #[test]
    fn test_closed_modal_has_no_layout() {
        let modal = ModalController::new();
        assert!(ModalLayout::for_modal(Rect::new(0, 0, 80, 24), &modal, Instant::now()).is_none());
    }

    #[test]
    fn test_renders_detail() {
        let modal = open_modal(&product(&["img/a.jpg", "img/b.jpg"], Some("https://vinted.test/1")));
        let (term, _) = draw(&modal);

        assert!(term.buffer_contains(" Scarf "));
        assert!(term.buffer_contains("[x]"));
        assert!(term.buffer_contains("a.jpg"));
        assert!(term.buffer_contains("Scarf · 1/2"));
        assert!(term.buffer_contains("Hand knitted from merino wool."));
        assert!(term.buffer_contains("#wool #boho"));
        assert!(term.buffer_contains("Buy on Vinted"));
    }

    #[test]
    fn test_current_dot_is_highlighted() {
        let product = product(&["img/a.jpg", "img/b.jpg"], None);
        let mut modal = open_modal(&product);
        modal.handle(
            vitrine_app::modal::ModalEvent::NextSlide,
            Instant::now(),
            Duration::ZERO,
        );
        let (term, layout) = draw(&modal);

        assert_eq!(term.cell_at(layout.dots[0].x, layout.dots[0].y), Some("○"));
        assert_eq!(term.cell_at(layout.dots[1].x, layout.dots[1].y), Some("●"));
        assert!(term.buffer_contains("b.jpg"));
    }

    #[test]
    fn test_disabled_buy_button_is_struck_through() {
        let modal = open_modal(&product(&[], None));
        let (term, layout) = draw(&modal);

        let cell = &term.buffer()[(layout.buy.x, layout.buy.y)];
        assert!(cell.modifier.contains(ratatui::style::Modifier::CROSSED_OUT));
        assert!(term.buffer_contains("no image"));
    }
}
