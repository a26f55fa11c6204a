//! Catalog Helpers
//!
//! Small pure functions shared by the catalog views and the cart view.

use super::models::{Product, ProductId, StarBreakdown};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of stars a rating is drawn against
pub const MAX_STARS: u8 = 5;

/// Finds a product by id.
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Parses a detail-view path segment from its leading integer, so `3abc`
/// resolves to `3`. A segment with no leading digits matches no product.
pub fn parse_product_id(raw: &str) -> Option<ProductId> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['-', '+']));
    let digits_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }
    raw[..sign_len + digits_len].parse().ok()
}

/// Rounds a money amount to currency precision and renders it with exactly two
/// decimal places, e.g. `"20.00"`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Splits a rating into full, half and empty stars.
///
/// Any fractional part renders as one half star. Out-of-range ratings are
/// clamped to `[0, 5]`.
pub fn star_breakdown(rating: f64) -> StarBreakdown {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, f64::from(MAX_STARS))
    } else {
        0.0
    };

    let full = rating.floor() as u8;
    let half = u8::from(rating.fract() != 0.0);
    let empty = MAX_STARS - rating.ceil() as u8;

    StarBreakdown { full, half, empty }
}
