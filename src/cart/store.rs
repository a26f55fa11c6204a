//! Cart Store
//!
//! The cart state machine: an ordered set of lines keyed by product id, with
//! totals derived from the lines on every read. Nothing here caches a total,
//! so a total can never disagree with the lines it was computed from.

use super::models::CartLine;
use crate::catalog::models::{Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Flat sales tax applied to the cart subtotal (10%)
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CartError {
    /// Zero is never stored; callers route it to removal instead
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),
}

/// One shopper's cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order products were first added
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` units of `product`, creating the line on first add and
    /// incrementing it afterwards.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<&CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let index = match self.position(product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(quantity);
                index
            }
            None => {
                self.lines.push(CartLine::new(product.clone(), quantity));
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Overwrites the quantity of an existing line.
    ///
    /// Does not remove on zero: a zero quantity is rejected and the cart is
    /// left unchanged. See [`super::helpers::apply_quantity_change`].
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<&CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let index = self
            .position(product_id)
            .ok_or(CartError::LineNotFound(product_id))?;
        let line = &mut self.lines[index];
        line.quantity = quantity;
        Ok(line)
    }

    /// Removes the line for `product_id`. A no-op when absent.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Option<CartLine> {
        self.position(product_id).map(|index| self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` over all lines, unrounded.
    pub fn cart_total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn tax(&self) -> Decimal {
        self.cart_total() * TAX_RATE
    }

    pub fn grand_total(&self) -> Decimal {
        self.cart_total() + self.tax()
    }

    /// Total units across all lines, not the number of distinct lines.
    pub fn cart_items_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price: Decimal) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            category: "Electronics".into(),
            brand: "Acme".into(),
            price,
            rating: 4.5,
            image: String::new(),
        }
    }

    #[test]
    fn add_creates_line_and_totals_follow() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, Decimal::new(1000, 2)), 2).unwrap();

        assert_eq!(cart.cart_total(), Decimal::new(2000, 2));
        assert_eq!(cart.cart_items_count(), 2);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn repeated_adds_sum_quantities_on_one_line() {
        let mut cart = CartStore::new();
        let apple = product(7, Decimal::new(150, 2));

        for qty in [1, 3, 2, 5] {
            cart.add_to_cart(&apple, qty).unwrap();
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(7).map(|l| l.quantity()), Some(11));
    }

    #[test]
    fn items_count_is_units_not_lines() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, Decimal::ONE), 3).unwrap();
        cart.add_to_cart(&product(2, Decimal::ONE), 4).unwrap();
        cart.add_to_cart(&product(3, Decimal::ONE), 1).unwrap();

        let units: u64 = cart.lines().iter().map(|l| u64::from(l.quantity())).sum();
        assert_eq!(cart.cart_items_count(), units);
        assert_eq!(cart.cart_items_count(), 8);
    }

    #[test]
    fn tax_and_grand_total_are_derived_from_subtotal() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, Decimal::new(1999, 2)), 3).unwrap();
        cart.add_to_cart(&product(2, Decimal::new(501, 2)), 1).unwrap();

        let subtotal = Decimal::new(6498, 2);
        assert_eq!(cart.cart_total(), subtotal);
        assert_eq!(cart.tax(), Decimal::new(6498, 3));
        assert_eq!(cart.grand_total(), subtotal * Decimal::new(110, 2));
    }

    #[test]
    fn zero_quantity_is_never_stored() {
        let mut cart = CartStore::new();
        let p = product(1, Decimal::TEN);

        assert_eq!(cart.add_to_cart(&p, 0).unwrap_err(), CartError::InvalidQuantity);
        assert!(cart.is_empty());

        cart.add_to_cart(&p, 2).unwrap();
        assert_eq!(
            cart.update_quantity(1, 0).unwrap_err(),
            CartError::InvalidQuantity
        );
        assert_eq!(cart.line(1).map(|l| l.quantity()), Some(2));
    }

    #[test]
    fn update_overwrites_quantity() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, Decimal::TEN), 2).unwrap();

        cart.update_quantity(1, 9).unwrap();
        assert_eq!(cart.cart_items_count(), 9);
        assert_eq!(cart.cart_total(), Decimal::from(90));

        assert_eq!(
            cart.update_quantity(42, 1).unwrap_err(),
            CartError::LineNotFound(42)
        );
    }

    #[test]
    fn remove_is_a_noop_when_absent() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&product(1, Decimal::TEN), 1).unwrap();
        cart.add_to_cart(&product(2, Decimal::TEN), 1).unwrap();

        assert!(cart.remove_from_cart(3).is_none());
        assert_eq!(cart.lines().len(), 2);

        let removed = cart.remove_from_cart(1).expect("line 1 exists");
        assert_eq!(removed.product.id, 1);
        assert_eq!(cart.lines()[0].product.id, 2);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = CartStore::new();
        assert_eq!(cart.cart_total(), Decimal::ZERO);
        assert_eq!(cart.grand_total(), Decimal::ZERO);
        assert_eq!(cart.cart_items_count(), 0);
    }
}
