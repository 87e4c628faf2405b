//! vitrine-tui - Terminal UI for Vitrine
//!
//! Creates an [`Engine`](vitrine_app::Engine) from vitrine-app and adds
//! terminal rendering, event polling and the widgets for the grid, filter
//! bar and detail modal.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
