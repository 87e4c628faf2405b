//! Product catalog types
//!
//! The catalog is an ordered list of [`Product`] records fetched as a JSON
//! array. Every field but `name` is optional; missing data always maps to an
//! empty default rather than an error.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// A single product record as published in `products.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Display name (required)
    pub name: String,

    /// Long description shown in the detail modal
    #[serde(default)]
    pub description: Option<String>,

    /// Single category tag (may hold several whitespace-separated tokens)
    #[serde(default)]
    pub category: Option<String>,

    /// Color tags in catalog order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub colors: Vec<String>,

    /// Material, shown as the first detail tag
    #[serde(default)]
    pub material: Option<String>,

    /// Style tags, shown after the material
    #[serde(default, deserialize_with = "null_as_empty")]
    pub style: Vec<String>,

    /// Image paths relative to the asset base URL
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,

    /// External shop link for the buy action
    #[serde(default)]
    pub link_vinted: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Split a raw tag value into class-like tokens.
///
/// Mirrors how a `className` list treats whitespace: `"red wool"` becomes
/// two tags and blank values yield none.
pub fn tag_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split_ascii_whitespace()
}

impl Product {
    /// Tags used for filtering: category tokens first, then color tokens.
    ///
    /// A product with neither category nor colors has no tags and therefore
    /// only matches the "show all" filter and the base item class.
    pub fn filter_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        let category = self.category.as_deref().into_iter().flat_map(tag_tokens);
        let colors = self.colors.iter().flat_map(|c| tag_tokens(c));
        for tag in category.chain(colors) {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }

    /// Tags shown in the detail modal: material first, then styles in order.
    pub fn detail_tags(&self) -> Vec<&str> {
        let mut tags = Vec::with_capacity(1 + self.style.len());
        if let Some(material) = non_empty(&self.material) {
            tags.push(material);
        }
        tags.extend(
            self.style
                .iter()
                .map(String::as_str)
                .filter(|s| !s.trim().is_empty()),
        );
        tags
    }

    /// Description text, empty when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Buy link, `None` when absent or blank
    pub fn buy_link(&self) -> Option<&str> {
        non_empty(&self.link_vinted)
    }
}

/// The full ordered list of products currently loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog from the raw `products.json` body
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_slice(bytes)?;
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Distinct category tokens in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for product in &self.products {
            for tag in product.category.as_deref().into_iter().flat_map(tag_tokens) {
                if !seen.iter().any(|s| s == tag) {
                    seen.push(tag.to_string());
                }
            }
        }
        seen
    }

    /// Distinct color tokens in first-seen order
    pub fn colors(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for product in &self.products {
            for tag in product.colors.iter().flat_map(|c| tag_tokens(c)) {
                if !seen.iter().any(|s| s == tag) {
                    seen.push(tag.to_string());
                }
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "name": "Mohair Scarf",
            "description": "Hand knitted",
            "category": "knit",
            "colors": ["red", "blue"],
            "material": "mohair",
            "style": ["boho", "winter"],
            "images": ["img/scarf-1.jpg", "img/scarf-2.jpg"],
            "linkVinted": "https://www.vinted.it/items/1"
        },
        { "name": "Bare", "images": [] },
        { "name": "Nulls", "colors": null, "style": null, "images": null, "price": 12 }
    ]"#;

    #[test]
    fn test_parse_catalog_in_fetch_order() {
        let catalog = Catalog::from_json(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mohair Scarf", "Bare", "Nulls"]);
    }

    #[test]
    fn test_parse_full_record() {
        let catalog = Catalog::from_json(SAMPLE.as_bytes()).unwrap();
        let scarf = catalog.get(0).unwrap();
        assert_eq!(scarf.category.as_deref(), Some("knit"));
        assert_eq!(scarf.colors, vec!["red", "blue"]);
        assert_eq!(scarf.buy_link(), Some("https://www.vinted.it/items/1"));
    }

    #[test]
    fn test_nulls_and_unknown_fields_default() {
        let catalog = Catalog::from_json(SAMPLE.as_bytes()).unwrap();
        let nulls = catalog.get(2).unwrap();
        assert!(nulls.colors.is_empty());
        assert!(nulls.style.is_empty());
        assert!(nulls.images.is_empty());
        assert_eq!(nulls.description_text(), "");
        assert_eq!(nulls.buy_link(), None);
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        assert!(Catalog::from_json(br#"[{"category": "knit"}]"#).is_err());
    }

    #[test]
    fn test_non_array_is_parse_error() {
        assert!(Catalog::from_json(br#"{"products": []}"#).is_err());
        assert!(Catalog::from_json(b"<html>").is_err());
    }

    #[test]
    fn test_filter_tags_category_then_colors() {
        let product = Product {
            name: "x".into(),
            category: Some("knit".into()),
            colors: vec!["red".into(), "blue".into()],
            ..Default::default()
        };
        insta::assert_snapshot!(product.filter_tags().join(" "), @"knit red blue");
    }

    #[test]
    fn test_filter_tags_split_whitespace_and_dedupe() {
        let product = Product {
            name: "x".into(),
            category: Some("  knit  bag ".into()),
            colors: vec!["red".into(), "".into(), "red".into()],
            ..Default::default()
        };
        assert_eq!(product.filter_tags(), vec!["knit", "bag", "red"]);
    }

    #[test]
    fn test_no_category_no_colors_has_no_tags() {
        let product = Product {
            name: "plain".into(),
            ..Default::default()
        };
        assert!(product.filter_tags().is_empty());
    }

    #[test]
    fn test_detail_tags_material_first() {
        let product = Product {
            name: "x".into(),
            material: Some("wool".into()),
            style: vec!["boho".into(), "".into(), "vintage".into()],
            ..Default::default()
        };
        assert_eq!(product.detail_tags(), vec!["wool", "boho", "vintage"]);
    }

    #[test]
    fn test_detail_tags_without_material() {
        let product = Product {
            name: "x".into(),
            material: Some("   ".into()),
            style: vec!["boho".into()],
            ..Default::default()
        };
        assert_eq!(product.detail_tags(), vec!["boho"]);
    }

    #[test]
    fn test_blank_buy_link_is_absent() {
        let product = Product {
            name: "x".into(),
            link_vinted: Some("".into()),
            ..Default::default()
        };
        assert_eq!(product.buy_link(), None);
    }

    #[test]
    fn test_distinct_categories_and_colors() {
        let catalog = Catalog::new(vec![
            Product {
                name: "a".into(),
                category: Some("knit".into()),
                colors: vec!["red".into()],
                ..Default::default()
            },
            Product {
                name: "b".into(),
                category: Some("bag".into()),
                colors: vec!["blue".into(), "red".into()],
                ..Default::default()
            },
            Product {
                name: "c".into(),
                category: Some("knit".into()),
                ..Default::default()
            },
        ]);
        assert_eq!(catalog.categories(), vec!["knit", "bag"]);
        assert_eq!(catalog.colors(), vec!["red", "blue"]);
    }
}
