//! Key event handlers for the grid and the detail modal

use crate::filter::{FilterEvent, FilterTarget};
use crate::input_key::InputKey;
use crate::message::{FocusMove, Message};
use crate::state::AppState;

/// Convert key events to messages based on what is on screen
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if state.modal.is_visible() {
        handle_key_modal(key)
    } else {
        handle_key_grid(state, key)
    }
}

/// Handle key events while the detail modal is shown
fn handle_key_modal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Backspace | InputKey::Char('x') => {
            Some(Message::CloseModal)
        }

        // Carousel
        InputKey::Left | InputKey::Char('h') => Some(Message::PreviousSlide),
        InputKey::Right | InputKey::Char('l') => Some(Message::NextSlide),
        InputKey::Char(c @ '1'..='9') => Some(Message::GoToSlide(digit_index(c))),

        InputKey::Char('b') => Some(Message::Buy),

        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events on the grid
fn handle_key_grid(state: &AppState, key: InputKey) -> Option<Message> {
    let page = i32::from(state.viewport.height.max(1));

    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('r') => Some(Message::Reload),

        // Filters: 1-9 pick a button, Tab cycles
        InputKey::Char(c @ '1'..='9') => Some(Message::Filter(FilterEvent::Activate(
            FilterTarget::Button(digit_index(c)),
        ))),
        InputKey::Tab => Some(Message::Filter(FilterEvent::Next)),
        InputKey::BackTab => Some(Message::Filter(FilterEvent::Previous)),

        // Focus
        InputKey::Up | InputKey::Char('k') => Some(Message::MoveFocus(FocusMove::Up)),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveFocus(FocusMove::Down)),
        InputKey::Left | InputKey::Char('h') => Some(Message::MoveFocus(FocusMove::Left)),
        InputKey::Right | InputKey::Char('l') => Some(Message::MoveFocus(FocusMove::Right)),
        InputKey::Home | InputKey::Char('g') => Some(Message::MoveFocus(FocusMove::First)),
        InputKey::End | InputKey::Char('G') => Some(Message::MoveFocus(FocusMove::Last)),
        InputKey::Enter => Some(Message::OpenFocused),

        // Scroll
        InputKey::PageUp => Some(Message::ScrollGrid(-page)),
        InputKey::PageDown => Some(Message::ScrollGrid(page)),

        _ => None,
    }
}

fn digit_index(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize - 1)
}
