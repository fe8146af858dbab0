//! HTTP route handlers for the verification service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (DB ping)
//!
//! # Catalog
//! GET  /products        - Product listing (?category=&q=&sort=)
//! GET  /products/{id}   - Product detail
//!
//! # Orders
//! POST /orders          - Checkout: verify, re-price, persist (201)
//! GET  /orders/{id}     - Retrieve a persisted order
//! ```

pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
}
