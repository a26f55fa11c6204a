//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for viewing and changing the cart of
//! the session identified by the `cart_session` cookie.

use super::{helpers::*, models::*, state::CartSession};
use crate::catalog::helpers::find_product;
use crate::catalog::models::ProductId;
use crate::errors::StoreError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(update_item).delete(remove_item))
        .route("/cart/items/:id/increment", post(increment_item))
        .route("/cart/items/:id/decrement", post(decrement_item))
}

/// Endpoint: GET /cart
/// Returns the session's cart with derived totals.
async fn view_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let view = match state.sessions.get(&session_id) {
        Some(session) => cart_view(&session.cart, session.toast.current()),
        None => cart_view(&Default::default(), None),
    };

    with_session_cookie(Json(view), &session_id, is_new_session)
}

/// Endpoint: POST /cart/items
/// Adds a catalog product to the cart, or increments its line.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddToCartInput>,
) -> Result<Response, StoreError> {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let products = state
        .catalog()
        .await
        .products()
        .ok_or(StoreError::CatalogLoading)?;
    let product = find_product(&products, payload.product_id).ok_or(StoreError::ProductNotFound)?;

    // Rejected adds must not register a session nobody holds a cookie for
    if payload.quantity == 0 {
        return Err(StoreError::InvalidQuantity);
    }

    let mut session = state.sessions.entry(session_id.clone()).or_default();
    let quantity = session.add(product, payload.quantity, state.notice_duration())?;

    info!(
        event_name = "cart.item_added",
        session_id = %session_id,
        product_id = product.id,
        added = payload.quantity,
        line_quantity = quantity,
        "added to cart"
    );

    let view = cart_view(&session.cart, session.toast.current());
    Ok(with_session_cookie(Json(view), &session_id, is_new_session))
}

/// Endpoint: PUT /cart/items/:id
/// Sets a line's quantity; zero or less removes the line.
async fn update_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<ProductId>,
    Json(payload): Json<UpdateQuantityInput>,
) -> Result<Response, StoreError> {
    change_quantity(&state, &headers, product_id, |session| {
        apply_quantity_change(&mut session.cart, product_id, payload.quantity)
    })
}

/// Endpoint: POST /cart/items/:id/increment
async fn increment_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<ProductId>,
) -> Result<Response, StoreError> {
    change_quantity(&state, &headers, product_id, |session| {
        step_quantity(&mut session.cart, product_id, 1)
    })
}

/// Endpoint: POST /cart/items/:id/decrement
/// Decrementing a line at quantity 1 removes it.
async fn decrement_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<ProductId>,
) -> Result<Response, StoreError> {
    change_quantity(&state, &headers, product_id, |session| {
        step_quantity(&mut session.cart, product_id, -1)
    })
}

/// Endpoint: DELETE /cart/items/:id
/// Removes a line; removing an absent line is not an error.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<ProductId>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let view = match state.sessions.get_mut(&session_id) {
        Some(mut session) => {
            if session.cart.remove_from_cart(product_id).is_some() {
                info!(
                    event_name = "cart.item_removed",
                    session_id = %session_id,
                    product_id,
                    "removed from cart"
                );
            }
            cart_view(&session.cart, session.toast.current())
        }
        None => cart_view(&Default::default(), None),
    };

    with_session_cookie(Json(view), &session_id, is_new_session)
}

/// Endpoint: DELETE /cart
/// Tears down the session's cart, cancelling any pending notice.
async fn clear_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    if let Some((_, session)) = state.sessions.remove(&session_id) {
        info!(
            event_name = "cart.cleared",
            session_id = %session_id,
            items = %format_item_summary(session.cart.lines()),
            "cart session torn down"
        );
    }

    let view = cart_view(&Default::default(), None);
    with_session_cookie(Json(view), &session_id, is_new_session)
}

fn change_quantity<F>(
    state: &SharedState,
    headers: &HeaderMap,
    product_id: ProductId,
    change: F,
) -> Result<Response, StoreError>
where
    F: FnOnce(&mut CartSession) -> Result<QuantityChange, super::store::CartError>,
{
    let (session_id, is_new_session) = resolve_session_id(headers);

    let (outcome, view) = match state.sessions.get_mut(&session_id) {
        Some(mut session) => {
            let outcome = change(&mut *session)?;
            (outcome, cart_view(&session.cart, session.toast.current()))
        }
        // Sessions are only registered by a successful add
        None => {
            let mut session = CartSession::default();
            (change(&mut session)?, cart_view(&session.cart, None))
        }
    };

    info!(
        event_name = "cart.quantity_changed",
        session_id = %session_id,
        product_id,
        outcome = ?outcome,
        "cart quantity changed"
    );

    Ok(with_session_cookie(Json(view), &session_id, is_new_session))
}

/// Attaches the session cookie to `body` when the session was just created.
fn with_session_cookie(
    body: impl IntoResponse,
    session_id: &str,
    is_new_session: bool,
) -> Response {
    let mut response = body.into_response();

    if is_new_session {
        if let Ok(cookie) = HeaderValue::from_str(&session_cookie(session_id)) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }

    response
}
