//! Configuration types for Vitrine
//!
//! Defines:
//! - `Settings` - Global application settings (`.vitrine/config.toml`)
//! - `CatalogSettings`, `LayoutSettings`, `UiSettings` - Per-section settings
//! - `FilterButtonConfig` - A configured filter button

use serde::{Deserialize, Serialize};
use vitrine_core::{DEFAULT_ASSET_BASE_URL, DEFAULT_CATALOG_PATH};

/// Application settings (.vitrine/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the catalog comes from and how images are awaited
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Asset base URL; images and the catalog resolve against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Catalog path relative to `base_url`
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// HTTP request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Probe card images before the first layout pass
    #[serde(default = "default_true")]
    pub probe_images: bool,

    /// Upper bound on waiting for image probes, in milliseconds
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_path: default_catalog_path(),
            timeout_ms: default_timeout_ms(),
            probe_images: true,
            settle_timeout_ms: default_settle_timeout_ms(),
        }
    }
}

/// Masonry geometry, in terminal cells
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Target column width including card borders
    #[serde(default = "default_column_width")]
    pub column_width: u16,

    /// Minimum number of columns regardless of width
    #[serde(default = "default_min_columns")]
    pub min_columns: u16,

    /// Rows reserved for the image frame of each card
    #[serde(default = "default_image_rows")]
    pub image_rows: u16,

    /// Space between columns and between stacked cards
    #[serde(default = "default_gutter")]
    pub gutter: u16,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            min_columns: default_min_columns(),
            image_rows: default_image_rows(),
            gutter: default_gutter(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Duration of the modal enter/exit transition in milliseconds
    #[serde(default = "default_modal_transition_ms")]
    pub modal_transition_ms: u64,

    /// Browser command for the buy link (empty = platform default)
    #[serde(default)]
    pub browser: String,

    /// Filter buttons; derived from the catalog when empty
    #[serde(default)]
    pub filters: Vec<FilterButtonConfig>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            modal_transition_ms: default_modal_transition_ms(),
            browser: String::new(),
            filters: Vec::new(),
        }
    }
}

/// A configured filter button
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterButtonConfig {
    /// Button caption
    pub label: String,

    /// Filter attribute in class-selector syntax (`*`, `.knit`, `.knit.red`)
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_base_url() -> String {
    DEFAULT_ASSET_BASE_URL.to_string()
}

fn default_catalog_path() -> String {
    DEFAULT_CATALOG_PATH.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_settle_timeout_ms() -> u64 {
    3_000
}

fn default_column_width() -> u16 {
    28
}

fn default_min_columns() -> u16 {
    1
}

fn default_image_rows() -> u16 {
    5
}

fn default_gutter() -> u16 {
    1
}

fn default_modal_transition_ms() -> u64 {
    300
}

fn default_filter() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.catalog.base_url, DEFAULT_ASSET_BASE_URL);
        assert_eq!(settings.catalog.catalog_path, "json/products.json");
        assert!(settings.catalog.probe_images);
        assert_eq!(settings.layout.column_width, 28);
        assert_eq!(settings.ui.modal_transition_ms, 300);
        assert!(settings.ui.filters.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[layout]
column_width = 32

[[ui.filters]]
label = "All"

[[ui.filters]]
label = "Knitwear"
filter = ".knit"
"#,
        )
        .unwrap();

        assert_eq!(settings.layout.column_width, 32);
        assert_eq!(settings.layout.gutter, 1);
        assert_eq!(settings.catalog.timeout_ms, 10_000);
        assert_eq!(settings.ui.filters.len(), 2);
        assert_eq!(settings.ui.filters[0].filter, "*");
        assert_eq!(settings.ui.filters[1].filter, ".knit");
    }
}
