//! Filter Criteria Models
//!
//! The combination of search text, facet selections and price bounds that
//! derives the visible product set.

use rust_decimal::Decimal;
use serde::Serialize;

// =============================================================================
// Price Range
// =============================================================================

/// Lowest selectable price
pub const PRICE_FLOOR: Decimal = Decimal::ZERO;
/// Highest selectable price; the default upper bound
pub const PRICE_CEILING: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);
/// Granularity of the price slider
pub const PRICE_STEP: Decimal = Decimal::TEN;

/// Inclusive price bounds, always `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_FLOOR,
            max: PRICE_CEILING,
        }
    }
}

impl PriceRange {
    /// Builds a range; `None` when a bound is negative or `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Option<Self> {
        if min.is_sign_negative() || max.is_sign_negative() || min > max {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }

    /// True for the full `0..=2000` default range.
    pub fn is_full(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// Current search, facet selections and price bounds for the listing.
///
/// Selections keep insertion order and never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_text: String,
    selected_categories: Vec<String>,
    selected_brands: Vec<String>,
    pub price_range: PriceRange,
}

impl FilterCriteria {
    pub fn selected_categories(&self) -> &[String] {
        &self.selected_categories
    }

    pub fn selected_brands(&self) -> &[String] {
        &self.selected_brands
    }

    /// Selects `category` if unselected, deselects it otherwise.
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.selected_categories, category);
    }

    /// Selects `brand` if unselected, deselects it otherwise.
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.selected_brands, brand);
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Moves the lower bound. Ignored when it would pass the upper bound.
    pub fn set_min_price(&mut self, min: Decimal) -> bool {
        match PriceRange::new(min, self.price_range.max) {
            Some(range) => {
                self.price_range = range;
                true
            }
            None => false,
        }
    }

    /// Moves the upper bound. Ignored when it would pass the lower bound.
    pub fn set_max_price(&mut self, max: Decimal) -> bool {
        match PriceRange::new(self.price_range.min, max) {
            Some(range) => {
                self.price_range = range;
                true
            }
            None => false,
        }
    }

    /// No search, no selections and the full price range.
    pub fn is_default(&self) -> bool {
        self.search_text.is_empty()
            && self.selected_categories.is_empty()
            && self.selected_brands.is_empty()
            && self.price_range.is_full()
    }
}

fn toggle(selection: &mut Vec<String>, value: &str) {
    if let Some(pos) = selection.iter().position(|v| v == value) {
        selection.remove(pos);
    } else {
        selection.push(value.to_string());
    }
}
