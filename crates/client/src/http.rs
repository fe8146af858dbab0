//! Checkout HTTP client.
//!
//! Submits the session cart to the order-verification service and maps
//! failure responses onto [`CheckoutError`]. The cart is cleared only after
//! the server confirms the order; every failure path leaves it intact.

use reqwest::StatusCode;

use shoplite_core::checkout::{CheckoutItem, CheckoutRequest, CheckoutResponse, Customer};
use shoplite_core::{Cart, ErrorResponse};

use crate::error::CheckoutError;
use crate::session::CartSession;

/// Message prefix the server uses when a cart line references a product the
/// catalog no longer has. Kept in sync with the server's verifier.
const UNKNOWN_PRODUCT_PREFIX: &str = "Product not found: ";

/// Client for the checkout endpoint of the verification service.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: reqwest::Client,
    base_url: String,
}

impl CheckoutClient {
    /// Create a client for a service at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build the checkout request body from a cart.
    ///
    /// Only product ids and quantities matter to the server; the advisory
    /// total is included because the wire format carries it, but the server
    /// recomputes it from the catalog of record.
    #[must_use]
    pub fn build_request(cart: &Cart, customer: Customer) -> CheckoutRequest {
        CheckoutRequest {
            customer,
            items: cart
                .lines()
                .iter()
                .map(|line| CheckoutItem {
                    product_id: line.product_id().to_string(),
                    quantity: Some(i64::from(line.quantity)),
                })
                .collect(),
            total: Some(serde_json::Value::String(cart.total().to_string())),
        }
    }

    /// Submit an order for verification.
    ///
    /// # Errors
    ///
    /// Maps the response onto the checkout taxonomy: 4xx validation or
    /// unknown-product rejections, 5xx server failures, and transport
    /// errors for requests that never completed.
    pub async fn place_order(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, CheckoutError> {
        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let reason = serde_json::from_str::<ErrorResponse>(&body)
            .map_or_else(|_| body.clone(), |e| e.error);
        Err(classify_failure(status, reason))
    }

    /// Run the full checkout flow for a session.
    ///
    /// On success the cart is cleared (memory first, then store); on any
    /// failure the cart is left untouched so the buyer can correct and
    /// retry. A persist failure while clearing is logged but does not turn
    /// the confirmed order into an error.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`CheckoutError`] when the server rejects the
    /// order or cannot be reached.
    pub async fn checkout(
        &self,
        session: &mut CartSession,
        customer: Customer,
    ) -> Result<CheckoutResponse, CheckoutError> {
        let request = Self::build_request(session.cart(), customer);
        let response = self.place_order(&request).await?;

        if let Err(e) = session.clear() {
            tracing::warn!(
                order_id = %response.order_id,
                "order confirmed but clearing the persisted cart failed: {e}"
            );
        }

        Ok(response)
    }
}

/// Map a failure status and reason onto the client taxonomy.
fn classify_failure(status: StatusCode, reason: String) -> CheckoutError {
    if status.is_client_error() {
        if let Some(id) = reason.strip_prefix(UNKNOWN_PRODUCT_PREFIX) {
            return CheckoutError::UnknownProduct(id.to_owned());
        }
        return CheckoutError::Validation(reason);
    }
    CheckoutError::Server(reason)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shoplite_core::{Product, ProductId};

    use super::*;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: price.parse::<Decimal>().unwrap(),
            image: format!("/img/{id}.jpg"),
            category: "general".to_owned(),
            description: String::new(),
            rating: 4.0,
            review_count: 3,
            badge: None,
        }
    }

    #[test]
    fn test_build_request_carries_ids_quantities_and_advisory_total() {
        let mut cart = Cart::new();
        cart.add(product("p1", "10.00"));
        cart.add(product("p1", "10.00"));
        cart.add(product("p2", "5.50"));

        let customer = Customer {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            address: None,
        };
        let request = CheckoutClient::build_request(&cart, customer);

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].product_id, "p1");
        assert_eq!(request.items[0].quantity, Some(2));
        assert_eq!(request.items[1].quantity, Some(1));
        assert_eq!(
            request.total,
            Some(serde_json::Value::String("25.50".to_owned()))
        );
    }

    #[test]
    fn test_classify_unknown_product_extracts_id() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            "Product not found: p-gone".to_owned(),
        );
        match err {
            CheckoutError::UnknownProduct(id) => assert_eq!(id, "p-gone"),
            other => panic!("expected UnknownProduct, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_validation_and_server_failures() {
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, "Cart is empty".to_owned()),
            CheckoutError::Validation(_)
        ));
        assert!(matches!(
            classify_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned()
            ),
            CheckoutError::Server(_)
        ));
    }

    #[test]
    fn test_retryability_follows_taxonomy() {
        assert!(
            classify_failure(StatusCode::SERVICE_UNAVAILABLE, String::new()).is_retryable()
        );
        assert!(!classify_failure(StatusCode::BAD_REQUEST, String::new()).is_retryable());
    }
}
