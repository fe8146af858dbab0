//! Order status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a persisted order.
///
/// Every verified order is created as `Pending`. Transitions beyond that
/// (fulfillment, cancellation) belong to downstream systems; this crate only
/// ever writes `Pending` and reads back whatever the order store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    /// Database/wire string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the database string form; unknown values map to `Pending`.
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "confirmed" => Self::Confirmed,
            "shipped" => Self::Shipped,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
