//! Terminal event polling

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use vitrine_app::input_key::{InputKey, PointerEvent, PointerKind};
use vitrine_app::message::Message;
use vitrine_core::prelude::*;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None, // Unsupported keys ignored
    }
}

/// Convert crossterm MouseEvent to PointerEvent
pub fn mouse_event_to_pointer(mouse: MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Click,
        MouseEventKind::Moved => PointerKind::Move,
        MouseEventKind::ScrollUp => PointerKind::ScrollUp,
        MouseEventKind::ScrollDown => PointerKind::ScrollDown,
        _ => return None,
    };
    Some(PointerEvent {
        kind,
        column: mouse.column,
        row: mouse.row,
    })
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        let event = event::read()?;

        match event {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                Ok(key_event_to_input(key).map(Message::Key))
            }
            Event::Mouse(mouse) => Ok(mouse_event_to_pointer(mouse).map(Message::Pointer)),
            // The next frame picks up the new size
            Event::Resize(..) => Ok(Some(Message::Tick)),
            _ => Ok(None),
        }
    } else {
        // Generate tick on timeout for transitions and the settle deadline
        Ok(Some(Message::Tick))
    }
}
