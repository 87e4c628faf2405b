//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Catalog Errors
    // ─────────────────────────────────────────────────────────────
    /// Network failure, non-2xx status or malformed JSON. The UI shows one
    /// message for all three; `reason` only reaches the log file.
    #[error("Failed to load catalog: {reason}")]
    CatalogLoad { reason: String },

    #[error("Invalid asset base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn catalog_load(reason: impl Into<String>) -> Self {
        Self::CatalogLoad {
            reason: reason.into(),
        }
    }

    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
