//! Pointer event handlers
//!
//! Positions are resolved against the [`HitMap`](crate::hit_map::HitMap)
//! written by the last render.

use crate::filter::FilterEvent;
use crate::hit_map::ModalTarget;
use crate::input_key::{PointerEvent, PointerKind};
use crate::message::Message;
use crate::state::AppState;

/// Rows scrolled per wheel notch
const WHEEL_ROWS: i32 = 3;

/// Convert a pointer event to a message
pub fn handle_pointer(state: &AppState, event: PointerEvent) -> Option<Message> {
    if state.modal.is_visible() {
        handle_pointer_modal(state, event)
    } else {
        handle_pointer_grid(state, event)
    }
}

fn handle_pointer_modal(state: &AppState, event: PointerEvent) -> Option<Message> {
    // Wheel and hover are swallowed: the page behind the modal is locked
    if event.kind != PointerKind::Click {
        return None;
    }
    match state.hit_map.modal_at(event.column, event.row)? {
        ModalTarget::Close => Some(Message::CloseModal),
        ModalTarget::Buy => Some(Message::Buy),
        ModalTarget::PreviousSlide => Some(Message::PreviousSlide),
        ModalTarget::NextSlide => Some(Message::NextSlide),
        ModalTarget::Dot(index) => Some(Message::GoToSlide(index)),
        ModalTarget::Body | ModalTarget::Backdrop => None,
    }
}

fn handle_pointer_grid(state: &AppState, event: PointerEvent) -> Option<Message> {
    let (column, row) = (event.column, event.row);

    match event.kind {
        PointerKind::Click => {
            if let Some(target) = state.hit_map.filter_at(column, row) {
                return Some(Message::Filter(FilterEvent::Activate(target)));
            }
            state.hit_map.card_at(column, row).map(Message::OpenCard)
        }
        PointerKind::Move => match state.hit_map.card_at(column, row) {
            Some(card) if state.grid.hovered != Some(card) => Some(Message::PointerEnterCard(card)),
            None if state.grid.hovered.is_some() => Some(Message::PointerLeaveCard),
            _ => None,
        },
        PointerKind::ScrollUp => Some(Message::ScrollGrid(-WHEEL_ROWS)),
        PointerKind::ScrollDown => Some(Message::ScrollGrid(WHEEL_ROWS)),
    }
}
