//! Layout engine adapter: masonry packing of rendered cards
//!
//! The adapter owns no product data. It takes the rendered cards once at
//! [`LayoutEngine::init`] and from then on works on its own item list, so
//! [`LayoutEngine::arrange`] always evaluates a predicate against the full
//! set and can bring back items hidden by an earlier filter.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitrine_core::FilterPredicate;

use crate::config::LayoutSettings;
use crate::grid::Card;

/// Rows taken by a card's top and bottom border
pub const CARD_BORDER_ROWS: u16 = 2;

/// Columns taken by a card's borders and inner padding
pub const CARD_CHROME_COLS: u16 = 4;

/// Tallest image area a card may reserve
pub const MAX_IMAGE_ROWS: u16 = 200;

/// Viewport and masonry parameters, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Width available to the grid
    pub width: u16,
    pub column_width: u16,
    pub min_columns: u16,
    pub image_rows: u16,
    pub gutter: u16,
}

impl Geometry {
    pub fn from_settings(width: u16, settings: &LayoutSettings) -> Self {
        Self {
            width,
            column_width: settings.column_width.max(CARD_CHROME_COLS + 1),
            min_columns: settings.min_columns.max(1),
            image_rows: settings.image_rows.min(MAX_IMAGE_ROWS),
            gutter: settings.gutter,
        }
    }

    /// Number of columns that fit, never below `min_columns`
    pub fn columns(&self) -> u16 {
        let per_column = self.column_width.saturating_add(self.gutter).max(1);
        let fit = self.width.saturating_add(self.gutter) / per_column;
        fit.max(self.min_columns)
    }

    /// Actual width of one column after distributing gutters
    pub fn resolved_column_width(&self) -> u16 {
        let columns = self.columns();
        let gutters = self.gutter.saturating_mul(columns.saturating_sub(1));
        let width = self.width.saturating_sub(gutters) / columns;
        width.max(CARD_CHROME_COLS + 1)
    }
}

/// Where one visible card sits, relative to the top-left of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the card list given to `init`
    pub card: usize,
    pub column: u16,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone)]
struct LayoutItem {
    name: String,
    /// Base class plus filter tags
    classes: Vec<String>,
    visible: bool,
}

/// Layout state for one rendered grid
#[derive(Debug, Clone)]
pub struct LayoutHandle {
    items: Vec<LayoutItem>,
    predicate: FilterPredicate,
    geometry: Geometry,
    placements: Vec<Placement>,
    total_height: u16,
}

impl LayoutHandle {
    /// Placements of visible cards, in card order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement_of(&self, card: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.card == card)
    }

    pub fn is_visible(&self, card: usize) -> bool {
        self.items.get(card).is_some_and(|item| item.visible)
    }

    /// Card indices currently shown, in card order
    pub fn visible_cards(&self) -> Vec<usize> {
        self.placements.iter().map(|p| p.card).collect()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Height of the tallest column
    pub fn total_height(&self) -> u16 {
        self.total_height
    }
}

/// Layout algorithm behind the grid
pub trait LayoutEngine: Send + Sync {
    /// Take every card and compute positions with everything visible
    fn init(&self, cards: &[Card], geometry: Geometry) -> LayoutHandle;

    /// Hide cards that do not match and re-flow the rest
    fn arrange(&self, handle: &mut LayoutHandle, predicate: &FilterPredicate);

    /// Re-flow for a new viewport, keeping the current predicate
    fn relayout(&self, handle: &mut LayoutHandle, geometry: Geometry);
}

/// Shortest-column masonry
#[derive(Debug, Clone, Copy, Default)]
pub struct Masonry;

impl Masonry {
    fn card_height(name: &str, inner_width: u16, image_rows: u16) -> u16 {
        let name_rows = wrapped_line_count(name, inner_width);
        CARD_BORDER_ROWS
            .saturating_add(image_rows)
            .saturating_add(name_rows)
    }

    fn flow(handle: &mut LayoutHandle) {
        let geometry = handle.geometry;
        let columns = geometry.columns() as usize;
        let column_width = geometry.resolved_column_width();
        let inner_width = column_width.saturating_sub(CARD_CHROME_COLS).max(1);

        let mut heights = vec![0u16; columns];
        let mut placements = Vec::new();

        for (card, item) in handle.items.iter().enumerate() {
            if !item.visible {
                continue;
            }
            // Leftmost column wins ties
            let column = heights
                .iter()
                .enumerate()
                .min_by_key(|(i, h)| (**h, *i))
                .map(|(i, _)| i)
                .unwrap_or(0);

            let height = Self::card_height(&item.name, inner_width, geometry.image_rows);
            let x = (column as u16).saturating_mul(column_width.saturating_add(geometry.gutter));
            let y = heights[column];

            placements.push(Placement {
                card,
                column: column as u16,
                x,
                y,
                width: column_width,
                height,
            });
            heights[column] = y.saturating_add(height).saturating_add(geometry.gutter);
        }

        handle.total_height = heights
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .saturating_sub(if placements.is_empty() { 0 } else { geometry.gutter });
        handle.placements = placements;
    }
}

impl LayoutEngine for Masonry {
    fn init(&self, cards: &[Card], geometry: Geometry) -> LayoutHandle {
        let items = cards
            .iter()
            .map(|card| LayoutItem {
                name: card.name.clone(),
                classes: card.classes().map(String::from).collect(),
                visible: true,
            })
            .collect();

        let mut handle = LayoutHandle {
            items,
            predicate: FilterPredicate::All,
            geometry,
            placements: Vec::new(),
            total_height: 0,
        };
        Self::flow(&mut handle);
        handle
    }

    fn arrange(&self, handle: &mut LayoutHandle, predicate: &FilterPredicate) {
        for item in &mut handle.items {
            item.visible = predicate.matches(&item.classes);
        }
        handle.predicate = predicate.clone();
        Self::flow(handle);
    }

    fn relayout(&self, handle: &mut LayoutHandle, geometry: Geometry) {
        handle.geometry = geometry;
        Self::flow(handle);
    }
}

/// Word-wrap `text` to `width` display columns. Words longer than a line
/// are hard-broken between characters.
pub fn wrap_words(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for c in word.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width > 0 && current_width + char_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += char_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Number of lines `text` takes when word-wrapped to `width` columns
pub fn wrapped_line_count(text: &str, width: u16) -> u16 {
    u16::try_from(wrap_words(text, width).len())
        .unwrap_or(u16::MAX)
        .max(1)
}
