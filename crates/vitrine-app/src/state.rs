//! Application state (Model in TEA pattern)

use std::time::Duration;

use vitrine_core::prelude::*;
use vitrine_core::{AssetBase, Catalog, FilterPredicate};

use crate::config::Settings;
use crate::filter::FilterBar;
use crate::grid::{Card, GridState};
use crate::hit_map::HitMap;
use crate::layout::{Geometry, LayoutEngine, LayoutHandle, Masonry, Placement};
use crate::message::FocusMove;
use crate::modal::ModalController;

/// Grid size used until the first frame reports the real one
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 20,
};

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Size of the grid area in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Complete application state (the Model in TEA)
pub struct AppState {
    pub phase: AppPhase,

    /// Loaded settings
    pub settings: Settings,

    /// Resolves catalog and image URLs
    pub assets: AssetBase,

    /// The catalog currently shown; replaced wholesale on reload
    pub catalog: Catalog,

    /// Bumped per fetch; results from older fetches are dropped
    pub load_generation: u64,

    /// Grid container
    pub grid: GridState,

    /// Present once the first layout pass ran for the current render
    pub layout: Option<LayoutHandle>,

    layout_engine: Box<dyn LayoutEngine>,

    pub filters: FilterBar,

    pub modal: ModalController,

    /// Pointer is over a card
    pub cursor_hovered: bool,

    /// Grid area from the last frame
    pub viewport: Viewport,

    /// Interactive regions from the last frame
    pub hit_map: HitMap,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("phase", &self.phase)
            .field("products", &self.catalog.len())
            .field("layout", &self.layout.is_some())
            .field("modal", &self.modal.phase())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state from settings with the masonry layout engine
    pub fn with_settings(settings: Settings) -> Result<Self> {
        Self::with_layout_engine(settings, Box::new(Masonry))
    }

    pub fn with_layout_engine(
        settings: Settings,
        layout_engine: Box<dyn LayoutEngine>,
    ) -> Result<Self> {
        let assets = AssetBase::parse(&settings.catalog.base_url)?;
        let filters = FilterBar::from_config(&settings.ui.filters);

        Ok(Self {
            phase: AppPhase::Running,
            settings,
            assets,
            catalog: Catalog::default(),
            load_generation: 0,
            grid: GridState::new(),
            layout: None,
            layout_engine,
            filters,
            modal: ModalController::new(),
            cursor_hovered: false,
            viewport: DEFAULT_VIEWPORT,
            hit_map: HitMap::default(),
        })
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn catalog_url(&self) -> String {
        self.assets.catalog_url(&self.settings.catalog.catalog_path)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.settings.ui.modal_transition_ms)
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settings.catalog.settle_timeout_ms)
    }

    fn geometry(&self) -> Geometry {
        Geometry::from_settings(self.viewport.width, &self.settings.layout)
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.grid.cards().get(index)
    }

    /// Run the first layout pass over the rendered cards, applying the
    /// current filter
    pub fn build_layout(&mut self) {
        let mut handle = self.layout_engine.init(self.grid.cards(), self.geometry());
        let predicate = self.filters.predicate();
        if !predicate.is_all() {
            self.layout_engine.arrange(&mut handle, &predicate);
        }
        debug!(
            "Layout ready: {} cards, {} visible, {} columns",
            handle.item_count(),
            handle.placements().len(),
            handle.geometry().columns()
        );
        self.layout = Some(handle);
        self.clamp_scroll();
    }

    /// Drop the layout (new render pending)
    pub fn reset_layout(&mut self) {
        self.layout = None;
        self.cursor_hovered = false;
    }

    /// Re-arrange the grid for `predicate`
    pub fn apply_filter(&mut self, predicate: &FilterPredicate) {
        let Some(handle) = self.layout.as_mut() else {
            return;
        };
        self.layout_engine.arrange(handle, predicate);

        if let Some(focused) = self.grid.focused {
            if !handle.is_visible(focused) {
                self.grid.focused = None;
            }
        }
        if let Some(hovered) = self.grid.hovered {
            if !handle.is_visible(hovered) {
                self.grid.hovered = None;
                self.cursor_hovered = false;
            }
        }
        self.clamp_scroll();
    }

    /// Record the grid area of the current frame. Re-flows the layout when
    /// the width changed. Returns `true` when anything changed.
    pub fn sync_grid_viewport(&mut self, width: u16, height: u16) -> bool {
        let viewport = Viewport { width, height };
        if viewport == self.viewport {
            return false;
        }
        let width_changed = viewport.width != self.viewport.width;
        self.viewport = viewport;

        if width_changed {
            let geometry = self.geometry();
            if let Some(handle) = self.layout.as_mut() {
                self.layout_engine.relayout(handle, geometry);
            }
        }
        self.clamp_scroll();
        true
    }

    fn max_scroll(&self) -> u16 {
        self.layout
            .as_ref()
            .map_or(0, |l| l.total_height().saturating_sub(self.viewport.height))
    }

    fn clamp_scroll(&mut self) {
        self.grid.scroll = self.grid.scroll.min(self.max_scroll());
    }

    /// Scroll the grid. Ignored while the modal holds the scroll lock.
    pub fn scroll_by(&mut self, delta: i32) {
        if self.modal.scroll_locked() {
            return;
        }
        let target = (i32::from(self.grid.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.grid.scroll = target as u16;
    }

    /// Move keyboard focus to a neighbouring card and scroll it into view
    pub fn move_focus(&mut self, direction: FocusMove) {
        let Some(handle) = self.layout.as_ref() else {
            return;
        };
        let placements = handle.placements();
        let (Some(first), Some(last)) = (placements.first(), placements.last()) else {
            return;
        };

        let current = self.grid.focused.and_then(|card| handle.placement_of(card));
        let target = match (current, direction) {
            (_, FocusMove::Last) => Some(*last),
            (_, FocusMove::First) | (None, _) => Some(*first),
            (Some(cur), FocusMove::Up) => placements
                .iter()
                .filter(|p| p.column == cur.column && p.y < cur.y)
                .max_by_key(|p| p.y)
                .copied(),
            (Some(cur), FocusMove::Down) => placements
                .iter()
                .filter(|p| p.column == cur.column && p.y > cur.y)
                .min_by_key(|p| p.y)
                .copied(),
            (Some(cur), FocusMove::Left) => cur
                .column
                .checked_sub(1)
                .and_then(|column| nearest_in_column(placements, column, *cur)),
            (Some(cur), FocusMove::Right) => nearest_in_column(placements, cur.column + 1, *cur),
        };

        if let Some(target) = target {
            self.grid.focused = Some(target.card);
            self.scroll_into_view(&target);
        }
    }

    fn scroll_into_view(&mut self, placement: &Placement) {
        let bottom = placement.y.saturating_add(placement.height);
        if placement.y < self.grid.scroll {
            self.grid.scroll = placement.y;
        } else if bottom > self.grid.scroll.saturating_add(self.viewport.height) {
            self.grid.scroll = bottom.saturating_sub(self.viewport.height);
        }
        self.clamp_scroll();
    }
}

/// Card in `column` whose vertical centre is closest to `from`'s
fn nearest_in_column(placements: &[Placement], column: u16, from: Placement) -> Option<Placement> {
    let centre = |p: &Placement| i32::from(p.y) * 2 + i32::from(p.height);
    let from_centre = centre(&from);
    placements
        .iter()
        .filter(|p| p.column == column)
        .min_by_key(|p| (centre(p) - from_centre).abs())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Product;

    fn product(name: &str, category: &str) -> Product {
        Product {
            name: name.into(),
            category: Some(category.into()),
            ..Default::default()
        }
    }

    fn state_with_cards(count: usize) -> AppState {
        let mut state = AppState::with_settings(Settings::default()).unwrap();
        state.catalog = Catalog::new(
            (0..count)
                .map(|i| product(&format!("Item {i}"), if i % 2 == 0 { "knit" } else { "bag" }))
                .collect(),
        );
        state.grid.render(&state.catalog, &state.assets);
        state.grid.settle_all();
        state.sync_grid_viewport(58, 10);
        state.build_layout();
        state
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut settings = Settings::default();
        settings.catalog.base_url = "not a url".into();
        assert!(AppState::with_settings(settings).is_err());
    }

    #[test]
    fn test_catalog_url_from_settings() {
        let state = AppState::with_settings(Settings::default()).unwrap();
        assert!(state.catalog_url().ends_with("/json/products.json"));
    }

    #[test]
    fn test_build_layout_applies_active_filter() {
        let mut state = AppState::with_settings(Settings::default()).unwrap();
        state.catalog = Catalog::new(vec![product("a", "knit"), product("b", "bag")]);
        state.filters.sync_with_catalog(&state.catalog);
        state
            .filters
            .handle(crate::filter::FilterEvent::Activate(crate::filter::FilterTarget::Button(2)));
        state.grid.render(&state.catalog, &state.assets);

        state.build_layout();

        assert_eq!(state.layout.as_ref().unwrap().visible_cards(), vec![1]);
    }

    #[test]
    fn test_filter_clears_hidden_focus() {
        let mut state = state_with_cards(4);
        state.grid.focused = Some(1);

        state.apply_filter(&FilterPredicate::tag("knit"));

        assert_eq!(state.grid.focused, None);
    }

    #[test]
    fn test_resize_relayouts_with_same_filter() {
        let mut state = state_with_cards(4);
        state.apply_filter(&FilterPredicate::tag("bag"));

        assert!(state.sync_grid_viewport(20, 10));

        let layout = state.layout.as_ref().unwrap();
        assert_eq!(layout.geometry().columns(), 1);
        assert_eq!(layout.visible_cards(), vec![1, 3]);
        assert!(!state.sync_grid_viewport(20, 10));
    }

    #[test]
    fn test_focus_moves_within_and_across_columns() {
        let mut state = state_with_cards(4);
        // 58 cells fit two 28-wide columns: cards 0,2 left and 1,3 right

        state.move_focus(FocusMove::Right);
        assert_eq!(state.grid.focused, Some(0));

        state.move_focus(FocusMove::Down);
        assert_eq!(state.grid.focused, Some(2));

        state.move_focus(FocusMove::Right);
        assert_eq!(state.grid.focused, Some(3));

        state.move_focus(FocusMove::Up);
        assert_eq!(state.grid.focused, Some(1));

        state.move_focus(FocusMove::Up);
        assert_eq!(state.grid.focused, Some(1));
    }

    #[test]
    fn test_focus_scrolls_into_view() {
        let mut state = state_with_cards(6);
        state.move_focus(FocusMove::Last);
        assert_eq!(state.grid.focused, Some(5));
        assert!(state.grid.scroll > 0);

        state.move_focus(FocusMove::First);
        assert_eq!(state.grid.scroll, 0);
    }

    #[test]
    fn test_end_without_focus_picks_last_card() {
        let mut state = state_with_cards(4);
        assert_eq!(state.grid.focused, None);

        state.move_focus(FocusMove::Last);
        assert_eq!(state.grid.focused, Some(3));

        state.grid.focused = None;
        state.move_focus(FocusMove::Down);
        assert_eq!(state.grid.focused, Some(0));
    }

    #[test]
    fn test_scroll_blocked_while_modal_open() {
        let mut state = state_with_cards(6);
        let product = state.catalog.get(0).cloned().unwrap();
        state
            .modal
            .open(0, &product, &state.assets, std::time::Instant::now(), Duration::ZERO);

        state.scroll_by(5);

        assert_eq!(state.grid.scroll, 0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = state_with_cards(6);
        state.scroll_by(-3);
        assert_eq!(state.grid.scroll, 0);

        state.scroll_by(1000);
        let layout = state.layout.as_ref().unwrap();
        assert_eq!(state.grid.scroll, layout.total_height() - state.viewport.height);
    }
}
