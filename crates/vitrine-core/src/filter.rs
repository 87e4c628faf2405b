//! Filter predicates
//!
//! A predicate is a tag-membership test written in class-selector syntax:
//! `*` shows everything, `.knit` requires the `knit` tag, `.knit.red`
//! requires both.

use crate::product::tag_tokens;

/// Tag-membership test applied to rendered cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterPredicate {
    /// Show every item
    #[default]
    All,
    /// Show items carrying every listed tag
    Tags(Vec<String>),
}

impl FilterPredicate {
    /// Parse a filter attribute value.
    ///
    /// Blank values and `*` mean "show all". A leading dot is optional, so
    /// `knit` and `.knit` are equivalent.
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        if selector.is_empty() || selector == "*" {
            return Self::All;
        }

        let tags: Vec<String> = selector
            .split('.')
            .flat_map(tag_tokens)
            .map(str::to_string)
            .collect();

        if tags.is_empty() {
            Self::All
        } else {
            Self::Tags(tags)
        }
    }

    /// Predicate for a single tag
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tags(vec![tag.into()])
    }

    /// Test a tag set against this predicate
    pub fn matches<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        match self {
            Self::All => true,
            Self::Tags(required) => required
                .iter()
                .all(|r| tags.iter().any(|t| t.as_ref() == r)),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Tags(tags) => {
                for tag in tags {
                    write!(f, ".{tag}")?;
                }
                Ok(())
            }
        }
    }
}
