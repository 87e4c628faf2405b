//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/vitrine/logs/` because the terminal
/// belongs to the UI. Log level is controlled by the `VITRINE_LOG`
/// environment variable.
///
/// # Examples
/// ```bash
/// VITRINE_LOG=debug cargo run
/// VITRINE_LOG=vitrine_app=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "vitrine.log");

    let env_filter = EnvFilter::try_from_env("VITRINE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("vitrine=info,vitrine_app=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Vitrine starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("vitrine").join("logs"))
}

/// Get the log file path for the current day.
///
/// The daily appender suffixes the file name with the UTC date.
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    let date = chrono::Utc::now().format("%Y-%m-%d");
    Ok(dir.join(format!("vitrine.log.{date}")))
}
