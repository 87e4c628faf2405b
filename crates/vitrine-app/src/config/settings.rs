//! Settings parser for .vitrine/config.toml

use super::types::Settings;
use std::path::{Path, PathBuf};
use vitrine_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const VITRINE_DIR: &str = ".vitrine";

/// Locate the config file for a working directory.
///
/// Checks `<dir>/.vitrine/config.toml` first, then the user config
/// directory (`~/.config/vitrine/config.toml` on Linux).
pub fn find_config_file(working_dir: &Path) -> Option<PathBuf> {
    let local = working_dir.join(VITRINE_DIR).join(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }

    let global = dirs::config_dir()?.join("vitrine").join(CONFIG_FILENAME);
    global.exists().then_some(global)
}

/// Load settings for a working directory, falling back to defaults.
pub fn load_settings(working_dir: &Path) -> Settings {
    match find_config_file(working_dir) {
        Some(path) => load_settings_from(&path),
        None => {
            debug!("No config file for {:?}, using defaults", working_dir);
            Settings::default()
        }
    }
}

/// Load settings from an explicit file.
///
/// A missing, unreadable or malformed file logs a warning and yields the
/// defaults; configuration problems never stop the showcase from starting.
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config into `<dir>/.vitrine/config.toml`.
///
/// Existing files are left untouched.
pub fn init_config_dir(working_dir: &Path) -> Result<PathBuf> {
    let vitrine_dir = working_dir.join(VITRINE_DIR);

    if !vitrine_dir.exists() {
        std::fs::create_dir_all(&vitrine_dir)
            .map_err(|e| Error::config(format!("Failed to create .vitrine dir: {}", e)))?;
    }

    let config_path = vitrine_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Vitrine Configuration

[catalog]
# base_url = "https://TriSsSsSsS.github.io/giulia-handmade-assets"
catalog_path = "json/products.json"
timeout_ms = 10000
probe_images = true
settle_timeout_ms = 3000

[layout]
column_width = 28
min_columns = 1
image_rows = 5
gutter = 1

[ui]
modal_transition_ms = 300
browser = ""

# Filter buttons. Leave empty to derive them from the catalog.
# [[ui.filters]]
# label = "All"
# filter = "*"
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_from_missing_file() {
        let temp = tempdir().unwrap();
        let settings = load_settings_from(&temp.path().join("nope.toml"));
        assert_eq!(settings.catalog.timeout_ms, 10_000);
    }

    #[test]
    fn test_load_settings_local_file() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".vitrine");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[catalog]
base_url = "http://localhost:8080/assets"
probe_images = false

[ui]
modal_transition_ms = 150
"#,
        )
        .unwrap();

        let settings = load_settings(temp.path());

        assert_eq!(settings.catalog.base_url, "http://localhost:8080/assets");
        assert!(!settings.catalog.probe_images);
        assert_eq!(settings.ui.modal_transition_ms, 150);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "this is [not valid toml").unwrap();

        let settings = load_settings_from(&path);

        assert_eq!(settings.layout.column_width, 28);
    }

    #[test]
    fn test_init_config_dir_creates_loadable_file() {
        let temp = tempdir().unwrap();
        let path = init_config_dir(temp.path()).unwrap();

        assert!(path.exists());
        let settings = load_settings_from(&path);
        assert_eq!(settings.catalog.catalog_path, "json/products.json");
        assert!(settings.ui.filters.is_empty());
    }

    #[test]
    fn test_init_config_dir_keeps_existing() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".vitrine");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[layout]\ngutter = 3\n").unwrap();

        let path = init_config_dir(temp.path()).unwrap();

        assert_eq!(load_settings_from(&path).layout.gutter, 3);
    }
}
