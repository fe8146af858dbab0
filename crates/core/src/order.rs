//! Verified order model.
//!
//! An order only exists after the checkout verifier has re-priced every line
//! against the catalog of record. Every field here is catalog-derived or
//! validated; nothing is copied verbatim from client input except the
//! customer's (validated) details.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, ProductId};

/// Validated customer details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCustomer {
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// One verified order line. Unit price, name, and image are the catalog's
/// values at verification time, never the client's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image: String,
}

impl OrderLine {
    /// Catalog unit price times verified quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A verified, persisted order. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer: OrderCustomer,
    pub items: Vec<OrderLine>,
    /// Authoritative total: sum of line totals, rounded half-up at the cent.
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serde_roundtrip() {
        let order = Order {
            id: OrderId::generate(),
            customer: OrderCustomer {
                name: "Ada Lovelace".to_owned(),
                email: Email::parse("ada@example.com").unwrap(),
                address: Some("12 Analytical Way".to_owned()),
            },
            items: vec![OrderLine {
                product_id: ProductId::new("p1"),
                name: "Walnut Desk Organizer".to_owned(),
                unit_price: "19.99".parse().unwrap(),
                quantity: 2,
                image: "/img/p1.jpg".to_owned(),
            }],
            total: "39.98".parse().unwrap(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            product_id: ProductId::new("p1"),
            name: "Widget".to_owned(),
            unit_price: "5.50".parse().unwrap(),
            quantity: 3,
            image: String::new(),
        };
        assert_eq!(line.line_total(), "16.50".parse().unwrap());
    }
}
