//! Catalog product snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A read-only snapshot of a catalog product.
///
/// The catalog of record owns products; the cart embeds a *copy* taken at
/// add-time. The copied price may drift before checkout; the checkout
/// verifier re-prices against the catalog, so staleness here is harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the shop currency, two-decimal precision.
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub description: String,
    /// Average review rating, 0.0–5.0.
    pub rating: f64,
    pub review_count: i32,
    /// Promotional badge shown on listings ("Sale", "New", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}
