//! Grid renderer: products to tagged cards
//!
//! Each product becomes a [`Card`] carrying the `product-item` class plus one
//! tag per category token and color. Tags double as filter predicates
//! downstream. Rendering always starts from an empty grid.
//!
//! Layout is deferred until the card images have settled: every distinct
//! image URL is tracked as pending and each probe result, success or
//! failure, settles one URL. A deadline bounds the wait.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use vitrine_core::{AssetBase, Catalog, FilterPredicate};

/// Base class carried by every card
pub const ITEM_CLASS: &str = "product-item";

/// Text shown in place of the grid when the catalog cannot be loaded
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load products.";

/// A rendered product card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Index of the product in the catalog
    pub product_index: usize,
    /// Display name
    pub name: String,
    /// Filter tags (category tokens then colors)
    pub tags: Vec<String>,
    /// Resolved display image
    pub image_url: String,
}

impl Card {
    /// The base class followed by the filter tags
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ITEM_CLASS).chain(self.tags.iter().map(String::as_str))
    }

    /// Class list as it would appear on the item element
    pub fn class_attr(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    /// Selectors match against the full class list, so the base class
    /// selects every card
    pub fn matches(&self, predicate: &FilterPredicate) -> bool {
        predicate.matches(&self.classes().collect::<Vec<_>>())
    }
}

/// Build one card per product, in catalog order
pub fn render_cards(catalog: &Catalog, assets: &AssetBase) -> Vec<Card> {
    catalog
        .iter()
        .enumerate()
        .map(|(product_index, product)| Card {
            product_index,
            name: product.name.clone(),
            tags: product.filter_tags(),
            image_url: assets.display_image(product),
        })
        .collect()
}

/// What the grid container currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GridContent {
    /// Catalog fetch in flight
    #[default]
    Loading,
    /// Rendered cards
    Cards(Vec<Card>),
    /// Load failure message, no cards
    Failed(String),
}

/// Grid container state
#[derive(Debug, Default)]
pub struct GridState {
    content: GridContent,

    /// Incremented on every render; stale probe results carry an old value
    generation: u64,

    /// Image URLs not yet settled
    pending_images: HashSet<String>,

    /// Layout proceeds regardless once this passes
    settle_deadline: Option<Instant>,

    /// Card under the pointer
    pub hovered: Option<usize>,

    /// Card with keyboard focus
    pub focused: Option<usize>,

    /// Vertical scroll offset in rows
    pub scroll: u16,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &GridContent {
        &self.content
    }

    pub fn cards(&self) -> &[Card] {
        match &self.content {
            GridContent::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear the grid and render the catalog into it.
    ///
    /// Returns the distinct image URLs that must settle before layout.
    pub fn render(&mut self, catalog: &Catalog, assets: &AssetBase) -> Vec<String> {
        self.clear();
        let cards = render_cards(catalog, assets);

        let mut urls = Vec::new();
        for card in &cards {
            if self.pending_images.insert(card.image_url.clone()) {
                urls.push(card.image_url.clone());
            }
        }

        self.content = GridContent::Cards(cards);
        urls
    }

    /// Replace everything with the load failure message
    pub fn show_failure(&mut self) {
        self.clear();
        self.content = GridContent::Failed(LOAD_FAILURE_MESSAGE.to_string());
    }

    /// Back to the loading placeholder (manual reload)
    pub fn show_loading(&mut self) {
        self.clear();
        self.content = GridContent::Loading;
    }

    fn clear(&mut self) {
        self.generation += 1;
        self.content = GridContent::Cards(Vec::new());
        self.pending_images.clear();
        self.settle_deadline = None;
        self.hovered = None;
        self.focused = None;
        self.scroll = 0;
    }

    /// Start waiting for images; `now + timeout` bounds the wait
    pub fn begin_settling(&mut self, now: Instant, timeout: Duration) {
        self.settle_deadline = Some(now + timeout);
    }

    /// Skip waiting entirely
    pub fn settle_all(&mut self) {
        self.pending_images.clear();
        self.settle_deadline = None;
    }

    /// Record a probe result. Returns `true` when this settles the last
    /// pending image of the current render.
    pub fn image_settled(&mut self, generation: u64, url: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        let removed = self.pending_images.remove(url);
        if removed && self.pending_images.is_empty() {
            self.settle_deadline = None;
            return true;
        }
        false
    }

    /// Returns `true` once when the settle deadline passes with images
    /// still pending.
    pub fn settle_timed_out(&mut self, now: Instant) -> bool {
        match self.settle_deadline {
            Some(deadline) if now >= deadline => {
                self.pending_images.clear();
                self.settle_deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending_image_count(&self) -> usize {
        self.pending_images.len()
    }

    pub fn is_settling(&self) -> bool {
        !self.pending_images.is_empty()
    }
}
