//! Asset URL resolution
//!
//! Every image path and the catalog file itself live under a single asset
//! base URL. Paths are joined with exactly one `/`; the base is never
//! written to, only read from.

use crate::error::{Error, Result};
use crate::product::Product;

/// Default remote asset base
pub const DEFAULT_ASSET_BASE_URL: &str = "https://TriSsSsSsS.github.io/giulia-handmade-assets";

/// Catalog location relative to the asset base
pub const DEFAULT_CATALOG_PATH: &str = "json/products.json";

/// Image shown when a product has no images
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x400?text=No+Image";

/// Validated asset base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBase {
    base: String,
}

impl AssetBase {
    /// Parse and validate a base URL. Only `http` and `https` are accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let parsed =
            url::Url::parse(trimmed).map_err(|e| Error::invalid_base_url(raw, e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::invalid_base_url(
                    raw,
                    format!("unsupported scheme '{other}'"),
                ))
            }
        }
        Ok(Self {
            base: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Resolve a relative asset path as `{base}/{path}`
    pub fn resolve(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base, relative_path.trim_start_matches('/'))
    }

    /// URL of the catalog document
    pub fn catalog_url(&self, catalog_path: &str) -> String {
        self.resolve(catalog_path)
    }

    /// Grid image: first product image, else the placeholder
    pub fn display_image(&self, product: &Product) -> String {
        product
            .images
            .first()
            .map(|path| self.resolve(path))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
    }

    /// Carousel images: every product image, else a single placeholder
    pub fn slide_images(&self, product: &Product) -> Vec<String> {
        if product.images.is_empty() {
            vec![PLACEHOLDER_IMAGE_URL.to_string()]
        } else {
            product.images.iter().map(|p| self.resolve(p)).collect()
        }
    }
}

impl Default for AssetBase {
    fn default() -> Self {
        Self {
            base: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}

impl std::fmt::Display for AssetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AssetBase {
        AssetBase::parse("https://example.com/assets").unwrap()
    }

    #[test]
    fn test_resolve_joins_with_single_slash() {
        let with_slash = AssetBase::parse("https://example.com/assets/").unwrap();
        assert_eq!(base().resolve("img/a.jpg"), "https://example.com/assets/img/a.jpg");
        assert_eq!(
            with_slash.resolve("/img/a.jpg"),
            "https://example.com/assets/img/a.jpg"
        );
    }

    #[test]
    fn test_catalog_url() {
        assert_eq!(
            base().catalog_url(DEFAULT_CATALOG_PATH),
            "https://example.com/assets/json/products.json"
        );
    }

    #[test]
    fn test_display_image_uses_first_image() {
        let product = Product {
            name: "x".into(),
            images: vec!["a.jpg".into(), "b.jpg".into()],
            ..Default::default()
        };
        assert_eq!(
            base().display_image(&product),
            "https://example.com/assets/a.jpg"
        );
    }

    #[test]
    fn test_display_image_placeholder_when_empty() {
        let product = Product {
            name: "x".into(),
            ..Default::default()
        };
        assert_eq!(base().display_image(&product), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_slide_images() {
        let product = Product {
            name: "x".into(),
            images: vec!["a.jpg".into(), "b.jpg".into()],
            ..Default::default()
        };
        assert_eq!(base().slide_images(&product).len(), 2);

        let bare = Product {
            name: "y".into(),
            ..Default::default()
        };
        assert_eq!(
            base().slide_images(&bare),
            vec![PLACEHOLDER_IMAGE_URL.to_string()]
        );
    }

    #[test]
    fn test_parse_rejects_non_http() {
        assert!(AssetBase::parse("ftp://example.com").is_err());
        assert!(AssetBase::parse("not a url").is_err());
    }

    #[test]
    fn test_default_base() {
        assert_eq!(AssetBase::default().as_str(), DEFAULT_ASSET_BASE_URL);
    }
}
