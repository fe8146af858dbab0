//! The checkout verifier.
//!
//! The client's cart is a *request*; the catalog of record is the source of
//! truth. Verification is validate-all-then-commit-once: every line is
//! checked and re-priced against the catalog before anything is written, a
//! single missing product aborts the whole batch, and the order is persisted
//! with one atomic insert only after full success.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;

use shoplite_core::Product;
use shoplite_core::checkout::{CheckoutItem, CheckoutRequest, Customer};
use shoplite_core::order::{Order, OrderCustomer, OrderLine};
use shoplite_core::types::{Email, EmailError, OrderId, OrderStatus};

use crate::db::{CatalogRepository, OrderRepository};
use crate::error::AppError;

/// Validate customer fields before any catalog work happens.
///
/// # Errors
///
/// Returns `AppError::Validation` for a blank name or a missing/invalid
/// email; messages are safe to surface verbatim to the buyer.
pub fn validate_customer(customer: &Customer) -> Result<OrderCustomer, AppError> {
    let name = customer.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Customer name is required".to_owned()));
    }

    let email = Email::parse(&customer.email).map_err(|e| match e {
        EmailError::Empty => AppError::Validation("Customer email is required".to_owned()),
        other => AppError::Validation(format!("Invalid customer email: {other}")),
    })?;

    Ok(OrderCustomer {
        name: name.to_owned(),
        email,
        address: customer
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_owned),
    })
}

/// Re-price every requested line against the fetched catalog products.
///
/// All-or-nothing: the first line whose product is missing from `products`
/// aborts the batch, naming the offending id. Quantities are clamped to
/// >= 1; prices, names, and images come exclusively from the catalog rows.
/// The returned total is rounded half-up at the cent.
///
/// # Errors
///
/// Returns `AppError::UnknownProduct` with the first unresolvable id.
pub fn verify_lines(
    items: &[CheckoutItem],
    products: &[Product],
) -> Result<(Vec<OrderLine>, Decimal), AppError> {
    let by_id: HashMap<&str, &Product> = products
        .iter()
        .map(|product| (product.id.as_str(), product))
        .collect();

    let mut lines = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for item in items {
        let product = by_id
            .get(item.product_id.as_str())
            .ok_or_else(|| AppError::UnknownProduct(item.product_id.clone()))?;

        let quantity = item.normalized_quantity();
        let line = OrderLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image: product.image.clone(),
        };

        total += line.line_total();
        lines.push(line);
    }

    Ok((
        lines,
        total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    ))
}

/// Build a verified order from a request and the fetched catalog products.
///
/// Pure except for the order id and timestamp. The client-supplied total is
/// never consulted; the order's total is derived entirely from catalog
/// prices.
///
/// # Errors
///
/// Returns `AppError::Validation` for an empty cart or bad customer fields,
/// and `AppError::UnknownProduct` for an unresolvable line.
pub fn build_order(request: &CheckoutRequest, products: &[Product]) -> Result<Order, AppError> {
    if request.items.is_empty() {
        return Err(AppError::Validation("Cart is empty".to_owned()));
    }

    let customer = validate_customer(&request.customer)?;
    let (items, total) = verify_lines(&request.items, products)?;

    Ok(Order {
        id: OrderId::generate(),
        customer,
        items,
        total,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    })
}

/// Verify a checkout request end to end and persist the resulting order.
///
/// Validation happens before any catalog lookup; the catalog fetch is one
/// batch query; nothing is written until every line has verified.
///
/// # Errors
///
/// Propagates validation and unknown-product rejections, and
/// `AppError::Database` when the catalog or order store is unavailable (in
/// which case no order state exists and the client keeps its cart).
pub async fn place_order(pool: &PgPool, request: &CheckoutRequest) -> Result<Order, AppError> {
    // Fail fast on malformed payloads; no catalog lookups for these.
    if request.items.is_empty() {
        return Err(AppError::Validation("Cart is empty".to_owned()));
    }
    validate_customer(&request.customer)?;

    let mut ids: Vec<String> = request
        .items
        .iter()
        .map(|item| item.product_id.clone())
        .collect();
    ids.sort();
    ids.dedup();

    let products = CatalogRepository::new(pool).fetch_many(&ids).await?;
    let order = build_order(request, &products)?;

    OrderRepository::new(pool).insert(&order).await?;
    tracing::info!(order_id = %order.id, total = %order.total, "order verified and persisted");

    Ok(order)
}
