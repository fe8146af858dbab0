//! Order route handlers: checkout and retrieval.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use shoplite_core::checkout::{CheckoutRequest, CheckoutResponse};
use shoplite_core::order::Order;
use shoplite_core::types::OrderId;

use crate::checkout;
use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Verify a checkout request and persist the resulting order.
///
/// The request body's total is advisory and ignored; the response carries
/// the authoritative, catalog-derived total. Created orders get 201.
#[instrument(skip(state, request), fields(item_count = request.items.len()))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let order = checkout::place_order(state.pool(), &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: order.id,
            total: order.total,
            message: "Order placed successfully".to_owned(),
        }),
    ))
}

/// Retrieve a persisted order by id.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    // A malformed id cannot name an existing order; treat it as not found.
    let order_id: OrderId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("order {id}")))?;

    let order = OrderRepository::new(state.pool())
        .fetch_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}
