//! vitrine-app - Application state and orchestration for Vitrine
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: the grid renderer, layout adapter, filter and modal
//! controllers, the catalog loader, configuration loading, and the
//! [`Engine`] that ties them together.

pub mod actions;
pub mod config;
pub mod engine;
pub mod filter;
pub mod grid;
pub mod handler;
pub mod hit_map;
pub mod input_key;
pub mod layout;
pub mod loader;
pub mod message;
pub mod modal;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use state::AppState;
