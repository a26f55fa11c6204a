//! Catalog Domain Models
//!
//! Product records as they arrive from the static catalog resource, plus the
//! view payloads built from them.

use crate::filter::models::FilterCriteria;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// Stable product identifier as it appears in the catalog file.
pub type ProductId = i64;

/// A single catalog entry. Never mutated after the catalog has loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub brand: String,

    /// Unit price, kept exact for cart arithmetic. Written back out as a JSON
    /// number, the same shape the catalog file uses.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Average rating in `[0, 5]`
    pub rating: f64,

    /// Image URI
    pub image: String,
}

/// Load state of the catalog.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    /// The one-shot fetch has not resolved yet
    #[default]
    Loading,
    /// Fetch finished; an empty list after a failed fetch
    Ready(Arc<Vec<Product>>),
}

impl CatalogState {
    /// Products when ready, `None` while loading.
    pub fn products(&self) -> Option<Arc<Vec<Product>>> {
        match self {
            CatalogState::Loading => None,
            CatalogState::Ready(products) => Some(Arc::clone(products)),
        }
    }

    pub fn status(&self) -> ViewStatus {
        match self {
            CatalogState::Loading => ViewStatus::Loading,
            CatalogState::Ready(_) => ViewStatus::Ready,
        }
    }
}

/// Whether a catalog-backed view has data to show yet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Loading,
    Ready,
}

/// How many full, half and empty stars a rating renders as (out of five).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

/// Distinct filter dimensions across the whole catalog
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Facets {
    /// Catalog order, de-duplicated
    pub categories: Vec<String>,
    /// Sorted lexicographically
    pub brands: Vec<String>,
}

/// Response for `GET /products`: the home listing
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub status: ViewStatus,
    pub products: Vec<Product>,
    pub count: usize,

    /// e.g. "3 Products Found"
    pub label: String,

    pub facets: Facets,
    pub criteria: FilterCriteria,

    /// Canonical address of this view, defaults omitted
    pub location: String,
}

/// Response for `GET /facets`
#[derive(Serialize)]
pub struct FacetsResponse {
    pub status: ViewStatus,

    #[serde(flatten)]
    pub facets: Facets,
}

/// Response for `GET /products/:id`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: Product,

    /// Price formatted to currency precision
    pub price: String,

    pub stars: StarBreakdown,
}
