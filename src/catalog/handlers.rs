//! REST API handlers for the catalog views
//!
//! The home listing (filtered by query parameters), the product detail view
//! and the facet lists.

use super::{helpers::*, models::*};
use crate::errors::StoreError;
use crate::filter::{self, FilterCriteria};
use crate::state::SharedState;
use axum::{
    extract::{Path, RawQuery, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

/// Creates routes for catalog views
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(product_detail))
        .route("/facets", get(list_facets))
}

/// Endpoint: GET /products?category=&brand=&price=min-max&search=
/// Filters the catalog by the criteria encoded in the query string.
async fn list_products(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
) -> Json<ListingResponse> {
    let criteria = filter::from_query(query.as_deref().unwrap_or_default());
    let catalog = state.catalog().await;

    let response = match catalog.products() {
        Some(products) => {
            let visible: Vec<Product> = filter::filter_products(&products, &criteria)
                .into_iter()
                .cloned()
                .collect();
            debug!(
                event_name = "catalog.filtered",
                visible = visible.len(),
                total = products.len(),
                "listing filtered"
            );
            listing(catalog.status(), visible, filter::facets(&products), criteria)
        }
        None => listing(catalog.status(), Vec::new(), Facets::default(), criteria),
    };

    Json(response)
}

fn listing(
    status: ViewStatus,
    products: Vec<Product>,
    facets: Facets,
    criteria: FilterCriteria,
) -> ListingResponse {
    let count = products.len();
    ListingResponse {
        status,
        products,
        count,
        label: filter::results_label(count),
        facets,
        location: filter::to_location(&criteria),
        criteria,
    }
}

/// Endpoint: GET /products/:id
/// Unknown and non-numeric ids both render as "not found".
async fn product_detail(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductDetailResponse>, StoreError> {
    let products = state
        .catalog()
        .await
        .products()
        .ok_or(StoreError::CatalogLoading)?;

    let product = parse_product_id(&raw_id)
        .and_then(|id| find_product(&products, id))
        .ok_or(StoreError::ProductNotFound)?;

    Ok(Json(ProductDetailResponse {
        price: format_price(product.price),
        stars: star_breakdown(product.rating),
        product: product.clone(),
    }))
}

/// Endpoint: GET /facets
async fn list_facets(State(state): State<SharedState>) -> Json<FacetsResponse> {
    let catalog = state.catalog().await;
    let facets = catalog
        .products()
        .map(|products| filter::facets(&products))
        .unwrap_or_default();

    Json(FacetsResponse {
        status: catalog.status(),
        facets,
    })
}
