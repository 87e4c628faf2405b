//! Vitrine - A terminal product showcase
//!
//! Binary entry point: parses flags, sets up logging and configuration,
//! then hands over to the TUI runner.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing::info;
use vitrine_app::config;

/// Vitrine - browse a product catalog in the terminal
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "A terminal product showcase with a filterable masonry grid", long_about = None)]
struct Args {
    /// Asset base URL (overrides `[catalog] base_url`)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Config file to use instead of `.vitrine/config.toml`
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default `.vitrine/config.toml` in the current directory and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if args.init_config {
        let path = config::init_config_dir(&working_dir)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    vitrine_core::logging::init().wrap_err("failed to set up logging")?;

    let mut settings = match &args.config {
        Some(path) => config::load_settings_from(path),
        None => config::load_settings(&working_dir),
    };
    if let Some(base_url) = args.base_url {
        settings.catalog.base_url = base_url;
    }
    info!("Asset base: {}", settings.catalog.base_url);

    let result = vitrine_tui::run(settings).await;
    if result.is_err() {
        if let Ok(log_file) = vitrine_core::logging::get_current_log_file() {
            eprintln!("Details were logged to {}", log_file.display());
        }
    }
    result.wrap_err("vitrine exited with an error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flags() {
        let args = Args::parse_from([
            "vitrine",
            "--base-url",
            "https://cdn.test",
            "--config",
            "/tmp/vitrine.toml",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("https://cdn.test"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/vitrine.toml")));
        assert!(!args.init_config);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["vitrine"]);
        assert!(args.base_url.is_none());
        assert!(args.config.is_none());
    }
}
