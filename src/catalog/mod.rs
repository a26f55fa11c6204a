//! Product Catalog Domain Module
//!
//! This module contains everything about the product catalog, including:
//! - Domain models (Product, load state, view payloads)
//! - The catalog loader (file or HTTP source)
//! - Pure helpers (lookup, price formatting, rating stars)
//! - REST API handlers for the listing, detail and facet views

pub mod handlers;
pub mod helpers;
pub mod loader;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use loader::{load_catalog, CatalogError, CatalogSource};
pub use models::{CatalogState, Product, ProductId};
