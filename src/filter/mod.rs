//! Product Filtering Module
//!
//! This module contains the listing's filtering logic, including:
//! - Criteria models (search text, facet selections, price range)
//! - The filter engine (visible product set, facets, result label)
//! - URL sync (criteria <-> query string)

pub mod engine;
pub mod models;
pub mod query;

// Re-export commonly used types and functions
pub use engine::{facets, filter_products, results_label};
pub use models::{FilterCriteria, PriceRange};
pub use query::{from_query, to_location, to_query_string};
