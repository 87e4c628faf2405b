//! Screen regions recorded by the renderer for pointer hit-testing
//!
//! The TUI writes a fresh [`HitMap`] into state on every frame. Pointer
//! handlers only look regions up; they never compute geometry themselves.

use crate::filter::FilterTarget;

/// Rectangle in terminal cell coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

/// What a pointer position lands on inside the open modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Close,
    Buy,
    PreviousSlide,
    NextSlide,
    Dot(usize),
    /// Inside the modal but on nothing interactive
    Body,
    /// The dimmed backdrop
    Backdrop,
}

/// Regions drawn in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub filter_bar: Option<Region>,
    /// One region per filter button, by button index
    pub filters: Vec<Region>,
    pub grid: Option<Region>,
    /// Visible (clipped) card regions, keyed by card index
    pub cards: Vec<(usize, Region)>,
    pub modal: Option<Region>,
    pub close: Option<Region>,
    pub buy: Option<Region>,
    pub previous_slide: Option<Region>,
    pub next_slide: Option<Region>,
    pub dots: Vec<Region>,
}

impl HitMap {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Filter target under the pointer; `None` outside the filter bar
    pub fn filter_at(&self, column: u16, row: u16) -> Option<FilterTarget> {
        let bar = self.filter_bar?;
        if !bar.contains(column, row) {
            return None;
        }
        let target = self
            .filters
            .iter()
            .position(|r| r.contains(column, row))
            .map_or(FilterTarget::Other, FilterTarget::Button);
        Some(target)
    }

    /// Card under the pointer
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        if let Some(grid) = self.grid {
            if !grid.contains(column, row) {
                return None;
            }
        }
        self.cards
            .iter()
            .find(|(_, r)| r.contains(column, row))
            .map(|(card, _)| *card)
    }

    /// Modal control under the pointer; `None` when no modal is drawn
    pub fn modal_at(&self, column: u16, row: u16) -> Option<ModalTarget> {
        let modal = self.modal?;
        if !modal.contains(column, row) {
            return Some(ModalTarget::Backdrop);
        }
        let hit = |r: &Option<Region>| r.is_some_and(|r| r.contains(column, row));

        let target = if hit(&self.close) {
            ModalTarget::Close
        } else if hit(&self.buy) {
            ModalTarget::Buy
        } else if hit(&self.previous_slide) {
            ModalTarget::PreviousSlide
        } else if hit(&self.next_slide) {
            ModalTarget::NextSlide
        } else if let Some(dot) = self.dots.iter().position(|r| r.contains(column, row)) {
            ModalTarget::Dot(dot)
        } else {
            ModalTarget::Body
        };
        Some(target)
    }
}
