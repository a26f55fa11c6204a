//! Shopping Cart Session State
//!
//! One [`CartSession`] per browser session: the cart itself plus the toast
//! that announces additions. Dropping the session tears both down, which also
//! cancels any pending toast timer.

use super::store::CartStore;
use super::toast::{Toast, ADDED_TO_CART};
use crate::catalog::models::Product;
use std::time::Duration;

#[derive(Default)]
pub struct CartSession {
    pub cart: CartStore,
    pub toast: Toast,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to the cart and, on success, raises the "added" notice.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: u32,
        notice_for: Duration,
    ) -> Result<u32, super::store::CartError> {
        let quantity = self.cart.add_to_cart(product, quantity)?.quantity();
        self.toast.show(ADDED_TO_CART, notice_for);
        Ok(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test(start_paused = true)]
    async fn add_raises_notice_only_on_success() {
        let product = Product {
            id: 3,
            title: "Desk Lamp".into(),
            description: "LED lamp".into(),
            category: "Home".into(),
            brand: "Acme".into(),
            price: Decimal::new(2499, 2),
            rating: 4.0,
            image: String::new(),
        };
        let mut session = CartSession::new();

        assert!(session.add(&product, 0, Duration::from_secs(2)).is_err());
        assert_eq!(session.toast.current(), None);

        assert_eq!(session.add(&product, 2, Duration::from_secs(2)), Ok(2));
        assert_eq!(session.toast.current().as_deref(), Some(ADDED_TO_CART));
        assert_eq!(session.cart.cart_items_count(), 2);
    }
}
