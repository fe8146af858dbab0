//! Newtype IDs for type-safe entity references.
//!
//! Product identifiers are opaque strings owned by the catalog of record;
//! order identifiers are UUIDs minted by the order store. Keeping them as
//! distinct types prevents accidentally mixing IDs from different entities.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque product identifier, as issued by the catalog of record.
///
/// The cart and the checkout protocol treat this as an uninterpreted string;
/// only the catalog assigns meaning to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a persisted, verified order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Mint a fresh random order ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g., read back from the order store).
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<OrderId> for Uuid {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl std::str::FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("p-123");
        assert_eq!(id.to_string(), "p-123");
        assert_eq!(id.as_str(), "p-123");
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new("p-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-42\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_order_id_roundtrip() {
        let id = OrderId::generate();
        let parsed: OrderId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
