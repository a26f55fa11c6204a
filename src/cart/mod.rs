//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartLine, inputs, views)
//! - The cart store and its derived totals
//! - Business logic helpers (quantity routing, sessions, formatting)
//! - Per-session state and transient notices
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;
pub mod store;
pub mod toast;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::CartSession;
pub use store::{CartError, CartStore};
