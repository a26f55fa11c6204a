//! HTTP-facing errors
//!
//! Every failure a handler can report, mapped onto a status code and a small
//! `{"error": ...}` JSON body.

use crate::cart::store::CartError;
use crate::catalog::models::ProductId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Product not found")]
    ProductNotFound,
    #[error("Product {0} is not in the cart")]
    LineNotFound(ProductId),
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Catalog is still loading")]
    CatalogLoading,
}

impl From<CartError> for StoreError {
    fn from(value: CartError) -> Self {
        match value {
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::LineNotFound(id) => Self::LineNotFound(id),
        }
    }
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ProductNotFound | Self::LineNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidQuantity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CatalogLoading => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
