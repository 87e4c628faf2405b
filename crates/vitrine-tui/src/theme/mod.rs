//! Centralized theme for the showcase UI.
//!
//! - `palette`: raw color constants
//! - `styles`: semantic style builder functions

pub mod palette;
pub mod styles;
