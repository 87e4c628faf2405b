//! Terminal setup and restoration

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use vitrine_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Start reporting clicks, movement and wheel events
pub fn enable_mouse() -> Result<()> {
    execute!(std::io::stdout(), EnableMouseCapture)
        .map_err(|e| Error::terminal(format!("Failed to enable mouse capture: {}", e)))
}

/// Stop mouse reporting; errors are logged, not returned
pub fn disable_mouse() {
    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
        warn!("Failed to disable mouse capture: {}", e);
    }
}
