//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for the grid and the modal
//! - `pointer`: Mouse hit-testing against the last frame's regions

pub(crate) mod keys;
pub(crate) mod pointer;
pub(crate) mod update;


use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fetch the catalog JSON; the result carries `generation` back
    LoadCatalog { generation: u64, url: String },

    /// HEAD every card image; each result comes back as `ImageSettled`
    ProbeImages { generation: u64, urls: Vec<String> },

    /// Send `ModalCloseFinished { generation }` once the exit transition ends
    StartCloseTransition { generation: u64, duration_ms: u64 },

    /// Open the buy link in the system browser.
    /// An empty `browser` means the platform default.
    OpenBuyLink { url: String, browser: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
