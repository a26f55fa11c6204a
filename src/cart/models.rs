//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::catalog::helpers::format_price;
use crate::catalog::models::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart additions
fn default_quantity() -> u32 {
    1
}

/// One product in the cart with how many units of it were added.
///
/// `quantity` is at least 1 for as long as the line exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub(crate) quantity: u32,
}

impl CartLine {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Body of `POST /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub product_id: ProductId,

    /// Units to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Body of `PUT /cart/items/:id`.
///
/// Signed on purpose: zero or less means "take it out of the cart".
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    pub quantity: i64,
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product: line.product.clone(),
            quantity: line.quantity,
            unit_price: format_price(line.product.price),
            line_total: format_price(line.line_total()),
        }
    }
}

/// The cart view: lines plus derived totals, money rounded for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub items_count: u64,
    pub subtotal: String,
    pub tax: String,
    pub grand_total: String,

    /// Transient "added to cart" notice, if one is showing
    pub notice: Option<String>,
}
