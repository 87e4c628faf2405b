//! # vitrine-core - Core Domain Types
//!
//! Foundation crate for Vitrine. Provides the product catalog model, asset
//! URL resolution, filter predicates, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, url).
//!
//! ## Public API
//!
//! ### Catalog (`product`)
//! - [`Product`] - A single product record from `products.json`
//! - [`Catalog`] - The ordered product list currently loaded
//!
//! ### Assets (`assets`)
//! - [`AssetBase`] - Validated base URL; resolves image and catalog paths
//! - [`PLACEHOLDER_IMAGE_URL`] - Fallback image for products without images
//!
//! ### Filtering (`filter`)
//! - [`FilterPredicate`] - Tag-membership test in class-selector syntax
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum, one variant per failure the app reports
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use vitrine_core::prelude::*;
//! ```

pub mod assets;
pub mod error;
pub mod filter;
pub mod logging;
pub mod product;

/// Prelude for common imports used throughout all Vitrine crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use assets::{AssetBase, DEFAULT_ASSET_BASE_URL, DEFAULT_CATALOG_PATH, PLACEHOLDER_IMAGE_URL};
pub use error::{Error, Result};
pub use filter::FilterPredicate;
pub use product::{tag_tokens, Catalog, Product};
