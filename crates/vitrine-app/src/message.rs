//! Message types for the application (TEA pattern)

use vitrine_core::Catalog;

use crate::filter::FilterEvent;
use crate::input_key::{InputKey, PointerEvent};

/// Direction of keyboard focus movement across the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Up,
    Down,
    Left,
    Right,
    First,
    Last,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Mouse event from terminal
    Pointer(PointerEvent),

    /// Tick event for periodic updates
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Catalog Messages
    // ─────────────────────────────────────────────────────────
    /// Fetch the catalog (startup)
    LoadCatalog,

    /// Clear the grid and fetch the catalog again
    Reload,

    /// Catalog fetched and parsed
    CatalogLoaded { generation: u64, catalog: Catalog },

    /// Transport, status or parse failure
    CatalogLoadFailed { generation: u64, error: String },

    // ─────────────────────────────────────────────────────────
    // Grid & Layout Messages
    // ─────────────────────────────────────────────────────────
    /// One card image finished loading or failed
    ImageSettled {
        generation: u64,
        url: String,
        ok: bool,
    },

    /// All images settled (or timed out); build the layout
    LayoutReady,

    /// Filter bar input
    Filter(FilterEvent),

    /// Move keyboard focus between cards
    MoveFocus(FocusMove),

    /// Scroll the grid by rows (negative is up)
    ScrollGrid(i32),

    /// Pointer entered a card
    PointerEnterCard(usize),

    /// Pointer left every card
    PointerLeaveCard,

    // ─────────────────────────────────────────────────────────
    // Modal Messages
    // ─────────────────────────────────────────────────────────
    /// Open the detail modal for a card
    OpenCard(usize),

    /// Open the detail modal for the focused card
    OpenFocused,

    /// Start the close transition
    CloseModal,

    /// Close transition timer fired
    ModalCloseFinished { generation: u64 },

    NextSlide,
    PreviousSlide,
    GoToSlide(usize),

    /// Follow the buy link of the open product
    Buy,
}
