//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart operations, session
//! resolution and formatting.

use super::models::{CartLine, CartLineView, CartResponse};
use super::store::{CartError, CartStore};
use crate::catalog::helpers::format_price;
use crate::catalog::models::ProductId;
use axum::http::{header, HeaderMap};
use uuid::Uuid;

/// Name of the cookie that carries the cart session id
pub const SESSION_COOKIE: &str = "cart_session";

/// Outcome of a quantity change routed through [`apply_quantity_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
}

/// Applies a requested quantity the way the cart page does: zero or less
/// removes the line, anything else overwrites its quantity.
pub fn apply_quantity_change(
    cart: &mut CartStore,
    product_id: ProductId,
    requested: i64,
) -> Result<QuantityChange, CartError> {
    if requested <= 0 {
        cart.remove_from_cart(product_id);
        return Ok(QuantityChange::Removed);
    }

    let quantity = u32::try_from(requested).unwrap_or(u32::MAX);
    let line = cart.update_quantity(product_id, quantity)?;
    Ok(QuantityChange::Updated(line.quantity()))
}

/// Moves a line's quantity by `delta` (the cart page's +/- buttons).
pub fn step_quantity(
    cart: &mut CartStore,
    product_id: ProductId,
    delta: i64,
) -> Result<QuantityChange, CartError> {
    let current = cart
        .line(product_id)
        .map(|l| i64::from(l.quantity()))
        .ok_or(CartError::LineNotFound(product_id))?;

    apply_quantity_change(cart, product_id, current.saturating_add(delta))
}

/// Reads the session id from the `cart_session` cookie, or mints a new one.
///
/// Returns the id and whether it was freshly created (and so still needs to be
/// sent back as a cookie).
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// `Set-Cookie` value for a new session
pub fn session_cookie(session_id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, session_id)
}

/// Builds the cart view from the store's lines and derived totals.
pub fn cart_view(cart: &CartStore, notice: Option<String>) -> CartResponse {
    CartResponse {
        lines: cart.lines().iter().map(CartLineView::from).collect(),
        items_count: cart.cart_items_count(),
        subtotal: format_price(cart.cart_total()),
        tax: format_price(cart.tax()),
        grand_total: format_price(cart.grand_total()),
        notice,
    }
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Laptop, 1x Desk Lamp"`.
pub fn format_item_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity(), l.product.title))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Product;
    use axum::http::HeaderValue;
    use rust_decimal::Decimal;

    fn product(id: ProductId, title: &str, price: Decimal) -> Product {
        Product {
            id,
            title: title.into(),
            description: String::new(),
            category: "Home".into(),
            brand: "Acme".into(),
            price,
            rating: 3.5,
            image: String::new(),
        }
    }

    #[test]
    fn non_positive_quantity_routes_to_removal() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, "Lamp", Decimal::TEN), 2).unwrap();

        assert_eq!(
            apply_quantity_change(&mut cart, 1, 0),
            Ok(QuantityChange::Removed)
        );
        assert!(cart.line(1).is_none());

        cart.add_to_cart(&product(1, "Lamp", Decimal::TEN), 2).unwrap();
        assert_eq!(
            apply_quantity_change(&mut cart, 1, -3),
            Ok(QuantityChange::Removed)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn positive_quantity_updates_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, "Lamp", Decimal::TEN), 2).unwrap();

        assert_eq!(
            apply_quantity_change(&mut cart, 1, 5),
            Ok(QuantityChange::Updated(5))
        );
        assert_eq!(
            apply_quantity_change(&mut cart, 9, 5),
            Err(CartError::LineNotFound(9))
        );
    }

    #[test]
    fn stepping_below_one_removes_the_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, "Lamp", Decimal::TEN), 1).unwrap();

        assert_eq!(step_quantity(&mut cart, 1, 1), Ok(QuantityChange::Updated(2)));
        assert_eq!(step_quantity(&mut cart, 1, -1), Ok(QuantityChange::Updated(1)));
        assert_eq!(step_quantity(&mut cart, 1, -1), Ok(QuantityChange::Removed));
        assert_eq!(step_quantity(&mut cart, 1, 1), Err(CartError::LineNotFound(1)));
    }

    #[test]
    fn session_id_is_read_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cart_session=abc123"),
        );

        assert_eq!(resolve_session_id(&headers), ("abc123".to_string(), false));
    }

    #[test]
    fn missing_cookie_mints_a_session() {
        let (id, is_new) = resolve_session_id(&HeaderMap::new());
        assert!(is_new);
        assert_eq!(id.len(), 32);
        assert_eq!(session_cookie(&id), format!("cart_session={}; Path=/; HttpOnly", id));
    }

    #[test]
    fn view_formats_money_and_summary_lists_lines() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, "Laptop", Decimal::new(99999, 2)), 1).unwrap();
        cart.add_to_cart(&product(2, "Desk Lamp", Decimal::new(1250, 2)), 2).unwrap();

        let view = cart_view(&cart, None);
        assert_eq!(view.items_count, 3);
        assert_eq!(view.subtotal, "1024.99");
        assert_eq!(view.tax, "102.50");
        assert_eq!(view.grand_total, "1127.49");
        assert_eq!(view.lines[1].line_total, "25.00");

        assert_eq!(format_item_summary(cart.lines()), "1x Laptop, 2x Desk Lamp");
    }
}
