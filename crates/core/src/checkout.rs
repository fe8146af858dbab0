//! Checkout wire DTOs shared by the client and the server.
//!
//! The request is deliberately lenient: unknown fields are ignored, the
//! claimed quantity tolerates malformed input, and the client-supplied total
//! is carried but never trusted. The server re-derives every price from the
//! catalog of record.

use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::types::OrderId;

/// Customer details as submitted by the buyer.
///
/// Raw wire form: the server validates the name and normalizes the email
/// before any order is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// One requested order line: a product reference and a claimed quantity.
///
/// Any other client-supplied fields (snapshot price, name, image) are
/// ignored on the wire; the catalog of record supplies those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    /// Claimed quantity, as parsed leniently from the wire. `None` means
    /// the client sent something non-numeric (or nothing).
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<i64>,
}

impl CheckoutItem {
    /// Clamp the claimed quantity to an integer >= 1.
    ///
    /// Non-numeric, missing, zero, and negative quantities all normalize
    /// to 1.
    #[must_use]
    pub fn normalized_quantity(&self) -> u32 {
        match self.quantity {
            Some(q) if q >= 1 => u32::try_from(q).unwrap_or(u32::MAX),
            _ => 1,
        }
    }
}

/// The checkout request body: customer, requested items, advisory total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub items: Vec<CheckoutItem>,
    /// Client-computed total. Accepted in any JSON shape and never trusted;
    /// the authoritative total is recomputed server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<serde_json::Value>,
}

/// Successful checkout response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    /// The authoritative, catalog-derived total.
    pub total: Decimal,
    pub message: String,
}

/// Failure response body for any checkout or catalog error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accept a quantity as a JSON number, a numeric string, or garbage.
///
/// Numbers and numeric strings parse (floats truncate toward zero);
/// anything else becomes `None` for the caller to clamp.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_quantity))
}

#[allow(clippy::cast_possible_truncation)]
fn parse_quantity(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}
