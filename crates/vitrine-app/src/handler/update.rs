//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use vitrine_core::Catalog;
use tracing::{debug, error, info, warn};

use crate::message::Message;
use crate::modal::{BuyLink, ModalEvent};
use crate::state::{AppPhase, AppState};

use super::{keys::handle_key, pointer::handle_pointer, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Pointer(event) => match handle_pointer(state, event) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => handle_tick(state, Instant::now()),

        // ─────────────────────────────────────────────────────────
        // Catalog Messages
        // ─────────────────────────────────────────────────────────
        Message::LoadCatalog | Message::Reload => {
            state.grid.show_loading();
            state.reset_layout();
            state.load_generation += 1;
            let url = state.catalog_url();
            info!("Loading catalog from {} (generation {})", url, state.load_generation);
            UpdateResult::action(UpdateAction::LoadCatalog {
                generation: state.load_generation,
                url,
            })
        }

        Message::CatalogLoaded {
            generation,
            catalog,
        } => {
            if generation != state.load_generation {
                debug!("Ignoring catalog from stale load {}", generation);
                return UpdateResult::none();
            }
            handle_catalog_loaded(state, catalog)
        }

        Message::CatalogLoadFailed { generation, error } => {
            if generation != state.load_generation {
                debug!("Ignoring failure from stale load {}: {}", generation, error);
                return UpdateResult::none();
            }
            error!("Catalog load failed: {}", error);
            state.catalog = Catalog::default();
            state.reset_layout();
            state.grid.show_failure();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Grid & Layout Messages
        // ─────────────────────────────────────────────────────────
        Message::ImageSettled {
            generation,
            url,
            ok,
        } => {
            if !ok {
                debug!("Image failed to load: {}", url);
            }
            if state.grid.image_settled(generation, &url) {
                UpdateResult::message(Message::LayoutReady)
            } else {
                UpdateResult::none()
            }
        }

        Message::LayoutReady => {
            state.build_layout();
            UpdateResult::none()
        }

        Message::Filter(event) => {
            if let Some(predicate) = state.filters.handle(event) {
                debug!("Filter: {}", predicate);
                state.apply_filter(&predicate);
            }
            UpdateResult::none()
        }

        Message::MoveFocus(direction) => {
            state.move_focus(direction);
            UpdateResult::none()
        }

        Message::ScrollGrid(delta) => {
            state.scroll_by(delta);
            UpdateResult::none()
        }

        Message::PointerEnterCard(card) => {
            state.grid.hovered = Some(card);
            state.cursor_hovered = true;
            UpdateResult::none()
        }

        Message::PointerLeaveCard => {
            state.grid.hovered = None;
            state.cursor_hovered = false;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Modal Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenCard(card) => {
            open_card(state, card);
            UpdateResult::none()
        }

        Message::OpenFocused => match state.grid.focused {
            Some(card) => UpdateResult::message(Message::OpenCard(card)),
            None => UpdateResult::none(),
        },

        Message::CloseModal => {
            let duration = state.transition_duration();
            let generation = state.modal.close(Instant::now(), duration);
            UpdateResult::action(UpdateAction::StartCloseTransition {
                generation,
                duration_ms: duration.as_millis() as u64,
            })
        }

        Message::ModalCloseFinished { generation } => {
            let effects = state.modal.finish_close(generation);
            if effects.is_empty() {
                debug!("Close transition {} finished with nothing to undo", generation);
            } else {
                debug!("Modal closed: {:?}", effects);
            }
            UpdateResult::none()
        }

        Message::NextSlide => modal_event(state, ModalEvent::NextSlide),
        Message::PreviousSlide => modal_event(state, ModalEvent::PreviousSlide),
        Message::GoToSlide(index) => modal_event(state, ModalEvent::GoToSlide(index)),

        Message::Buy => {
            if !state.modal.is_open() {
                return UpdateResult::none();
            }
            match state.modal.detail().map(|d| &d.buy_link) {
                Some(BuyLink::Url(url)) => UpdateResult::action(UpdateAction::OpenBuyLink {
                    url: url.clone(),
                    browser: state.settings.ui.browser.clone(),
                }),
                _ => UpdateResult::none(),
            }
        }
    }
}

fn handle_tick(state: &mut AppState, now: Instant) -> UpdateResult {
    state.modal.tick(now);

    if state.grid.settle_timed_out(now) {
        warn!("Image settle timeout elapsed, laying out with images still pending");
        return UpdateResult::message(Message::LayoutReady);
    }
    UpdateResult::none()
}

fn handle_catalog_loaded(state: &mut AppState, catalog: Catalog) -> UpdateResult {
    info!("Catalog loaded: {} products", catalog.len());
    state.catalog = catalog;
    state.reset_layout();
    state.filters.sync_with_catalog(&state.catalog);

    let urls = state.grid.render(&state.catalog, &state.assets);
    if !state.settings.catalog.probe_images || urls.is_empty() {
        state.grid.settle_all();
        return UpdateResult::message(Message::LayoutReady);
    }

    let timeout = state.settle_timeout();
    state.grid.begin_settling(Instant::now(), timeout);
    UpdateResult::action(UpdateAction::ProbeImages {
        generation: state.grid.generation(),
        urls,
    })
}

fn open_card(state: &mut AppState, card: usize) {
    let Some(product_index) = state.card(card).map(|c| c.product_index) else {
        warn!("Open requested for unknown card {}", card);
        return;
    };
    let Some(product) = state.catalog.get(product_index) else {
        return;
    };

    state.grid.focused = Some(card);
    let duration = state.transition_duration();
    state
        .modal
        .open(product_index, product, &state.assets, Instant::now(), duration);
    debug!("Opened '{}'", product.name);
}

fn modal_event(state: &mut AppState, event: ModalEvent) -> UpdateResult {
    let duration = state.transition_duration();
    state.modal.handle(event, Instant::now(), duration);
    UpdateResult::none()
}
