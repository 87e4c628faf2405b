//! Filter controller: the filter-button bar
//!
//! Exactly one button is active once the user has interacted. Before that
//! no button is highlighted and the grid shows everything. Activating a
//! target that is not a button (the bar caption, the gaps between buttons)
//! is ignored.

use vitrine_core::{Catalog, FilterPredicate};

use crate::config::FilterButtonConfig;

/// Caption rendered at the start of the bar
pub const FILTER_CAPTION: &str = "Filter";

/// One button in the filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub label: String,
    /// Filter attribute in class-selector syntax
    pub filter: String,
}

impl FilterButton {
    pub fn new(label: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            filter: filter.into(),
        }
    }

    pub fn predicate(&self) -> FilterPredicate {
        FilterPredicate::parse(&self.filter)
    }
}

/// Element of the filter container an activation landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    /// A filter button, by index
    Button(usize),
    /// Anything else inside the container
    Other,
}

/// Input to the filter controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    Activate(FilterTarget),
    /// Activate the button after the active one (wraps)
    Next,
    /// Activate the button before the active one (wraps)
    Previous,
}

/// Filter bar state
#[derive(Debug, Clone, Default)]
pub struct FilterBar {
    buttons: Vec<FilterButton>,
    active: Option<usize>,
    /// Buttons came from configuration and survive catalog reloads
    configured: bool,
}

impl FilterBar {
    pub fn new(buttons: Vec<FilterButton>) -> Self {
        Self {
            buttons,
            active: None,
            configured: false,
        }
    }

    /// Buttons from `[[ui.filters]]`
    pub fn from_config(filters: &[FilterButtonConfig]) -> Self {
        let buttons = filters
            .iter()
            .map(|f| FilterButton::new(&f.label, &f.filter))
            .collect();
        Self {
            buttons,
            active: None,
            configured: !filters.is_empty(),
        }
    }

    /// `All` followed by every distinct category, then every distinct color
    pub fn derive_buttons(catalog: &Catalog) -> Vec<FilterButton> {
        let mut buttons = vec![FilterButton::new("All", "*")];
        for tag in catalog.categories().into_iter().chain(catalog.colors()) {
            if buttons.iter().any(|b| b.filter == format!(".{tag}")) {
                continue;
            }
            buttons.push(FilterButton::new(title_case(&tag), format!(".{tag}")));
        }
        buttons
    }

    /// Rebuild derived buttons for a freshly loaded catalog.
    ///
    /// Configured bars are left alone. The active button is kept when a
    /// button with the same filter still exists.
    pub fn sync_with_catalog(&mut self, catalog: &Catalog) {
        if self.configured {
            return;
        }
        let previous = self.active_button().map(|b| b.filter.clone());
        self.buttons = Self::derive_buttons(catalog);
        self.active = previous.and_then(|filter| self.buttons.iter().position(|b| b.filter == filter));
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_button(&self) -> Option<&FilterButton> {
        self.active.and_then(|i| self.buttons.get(i))
    }

    /// Predicate of the active button, "show all" before any interaction
    pub fn predicate(&self) -> FilterPredicate {
        self.active_button()
            .map(FilterButton::predicate)
            .unwrap_or_default()
    }

    /// Apply an event. Returns the predicate to arrange the grid with, or
    /// `None` when the event was ignored.
    pub fn handle(&mut self, event: FilterEvent) -> Option<FilterPredicate> {
        let index = match event {
            FilterEvent::Activate(FilterTarget::Button(index)) => index,
            FilterEvent::Activate(FilterTarget::Other) => return None,
            FilterEvent::Next => {
                if self.buttons.is_empty() {
                    return None;
                }
                self.active.map_or(0, |i| (i + 1) % self.buttons.len())
            }
            FilterEvent::Previous => {
                let len = self.buttons.len();
                if len == 0 {
                    return None;
                }
                self.active.map_or(len - 1, |i| (i + len - 1) % len)
            }
        };

        let button = self.buttons.get(index)?;
        let predicate = button.predicate();
        self.active = Some(index);
        Some(predicate)
    }
}

fn title_case(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
