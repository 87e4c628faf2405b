//! Configuration file parsing for Vitrine
//!
//! Supports:
//! - `.vitrine/config.toml` - Project-local settings
//! - `~/.config/vitrine/config.toml` - User settings

pub mod settings;
pub mod types;

pub use settings::{find_config_file, init_config_dir, load_settings, load_settings_from};
pub use types::*;
