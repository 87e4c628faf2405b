//! Main render/view function (View in TEA pattern)


use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use vitrine_app::grid::GridContent;
use vitrine_app::hit_map::{HitMap, Region};
use vitrine_app::state::AppState;

use super::{layout, widgets};
use crate::theme::palette;

fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

fn non_empty(rect: Rect) -> Option<Region> {
    (!rect.is_empty()).then(|| region(rect))
}

/// Render the complete UI (View function in TEA)
///
/// Besides drawing, this records the grid viewport (re-flowing the layout
/// on a width change) and rebuilds the pointer hit map from what was drawn.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    state.sync_grid_viewport(areas.grid.width, areas.grid.height);

    let mut hit_map = HitMap::default();

    let product_count = match state.grid.content() {
        GridContent::Cards(_) => Some(state.catalog.len()),
        _ => None,
    };
    frame.render_widget(
        widgets::MainHeader::new(product_count).hovered(state.cursor_hovered),
        areas.header,
    );

    frame.render_widget(widgets::FilterBarWidget::new(&state.filters), areas.filter_bar);
    hit_map.filter_bar = Some(region(areas.filter_bar));
    hit_map.filters = widgets::button_regions(&state.filters, areas.filter_bar)
        .into_iter()
        .map(region)
        .collect();

    frame.render_widget(
        widgets::ProductGrid::new(&state.grid, state.layout.as_ref())
            .image_rows(state.settings.layout.image_rows),
        areas.grid,
    );
    hit_map.grid = Some(region(areas.grid));
    if let Some(handle) = state.layout.as_ref() {
        hit_map.cards = widgets::card_regions(handle, state.grid.scroll, areas.grid)
            .into_iter()
            .map(|(card, rect)| (card, region(rect)))
            .collect();
    }

    frame.render_widget(widgets::Footer::new(state.modal.is_visible()), areas.footer);

    if let Some(modal_layout) = widgets::ModalLayout::for_modal(area, &state.modal, Instant::now()) {
        frame.render_widget(widgets::ProductModal::new(&state.modal, &modal_layout), area);

        hit_map.modal = non_empty(modal_layout.frame);
        hit_map.close = non_empty(modal_layout.close);
        hit_map.buy = non_empty(modal_layout.buy);
        hit_map.previous_slide = non_empty(modal_layout.previous);
        hit_map.next_slide = non_empty(modal_layout.next);
        hit_map.dots = modal_layout.dots.iter().copied().map(region).collect();
    }

    state.hit_map = hit_map;
}
