//! URL Sync
//!
//! Mirrors [`FilterCriteria`] into the listing's query string and back, so a
//! filtered view can be bookmarked, shared or navigated back to.
//!
//! Only one category and one brand survive the round trip even though the
//! criteria hold multi-selections: the first selected value is emitted and the
//! first `category`/`brand` parameter is read back.

use super::models::{FilterCriteria, PriceRange};
use rust_decimal::Decimal;
use url::form_urlencoded;

pub const CATEGORY_PARAM: &str = "category";
pub const PRICE_PARAM: &str = "price";
pub const BRAND_PARAM: &str = "brand";
pub const SEARCH_PARAM: &str = "search";

/// Encodes the non-default parts of `criteria` as a query string (no leading
/// `?`). Default criteria encode to an empty string.
pub fn to_query_string(criteria: &FilterCriteria) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());

    if let Some(category) = criteria.selected_categories().first() {
        params.append_pair(CATEGORY_PARAM, category);
    }

    if !criteria.price_range.is_full() {
        params.append_pair(PRICE_PARAM, &format_price_range(&criteria.price_range));
    }

    if let Some(brand) = criteria.selected_brands().first() {
        params.append_pair(BRAND_PARAM, brand);
    }

    if !criteria.search_text.is_empty() {
        params.append_pair(SEARCH_PARAM, &criteria.search_text);
    }

    params.finish()
}

/// Navigable address for the listing: `/` or `/?<query>`.
pub fn to_location(criteria: &FilterCriteria) -> String {
    let query = to_query_string(criteria);
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    }
}

/// Parses a raw query string back into criteria.
///
/// Unknown keys, repeated keys beyond the first, empty values and malformed
/// price bounds are ignored; the corresponding defaults are kept.
pub fn from_query(query: &str) -> FilterCriteria {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut criteria = FilterCriteria::default();

    let mut category = None;
    let mut price = None;
    let mut brand = None;
    let mut search = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            CATEGORY_PARAM => &mut category,
            PRICE_PARAM => &mut price,
            BRAND_PARAM => &mut brand,
            SEARCH_PARAM => &mut search,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    if let Some(category) = category.filter(|c| !c.is_empty()) {
        criteria.toggle_category(&category);
    }

    if let Some(range) = price.as_deref().and_then(parse_price_range) {
        criteria.price_range = range;
    }

    if let Some(brand) = brand.filter(|b| !b.is_empty()) {
        criteria.toggle_brand(&brand);
    }

    if let Some(search) = search {
        criteria.set_search(search);
    }

    criteria
}

fn format_price_range(range: &PriceRange) -> String {
    format!("{}-{}", range.min().normalize(), range.max().normalize())
}

/// Parses `min-max`. Both bounds must be non-negative numbers with
/// `min <= max`; anything after a second `-` is ignored.
pub fn parse_price_range(raw: &str) -> Option<PriceRange> {
    let mut bounds = raw.split('-');
    let min: Decimal = bounds.next()?.trim().parse().ok()?;
    let max: Decimal = bounds.next()?.trim().parse().ok()?;
    PriceRange::new(min, max)
}
