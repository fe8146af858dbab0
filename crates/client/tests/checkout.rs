//! Checkout flow against an in-process verification service.
//!
//! The session cart must survive every failure path (rejection, server
//! failure, transport failure) and be cleared only once the server confirms
//! the order.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;

use shoplite_client::{CartSession, CartStore, CheckoutClient, CheckoutError};
use shoplite_core::checkout::{CheckoutResponse, Customer};
use shoplite_core::types::{OrderId, ProductId};
use shoplite_core::{ErrorResponse, Product};

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

fn customer() -> Customer {
    Customer {
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        address: None,
    }
}

fn session_in(dir: &tempfile::TempDir) -> CartSession {
    CartSession::restore(CartStore::open(dir.path()).unwrap())
}

/// Two units of p1 plus one of p2: the 25.50 cart.
fn seeded_session(dir: &tempfile::TempDir) -> CartSession {
    let mut session = session_in(dir);
    session.add(product("p1", "10.00")).unwrap();
    session.add(product("p1", "10.00")).unwrap();
    session.add(product("p2", "5.50")).unwrap();
    session
}

/// Serve `app` on an ephemeral local port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_cart_cleared_only_after_confirmed_order() {
    let app = Router::new().route(
        "/orders",
        post(|| async {
            (
                StatusCode::CREATED,
                Json(CheckoutResponse {
                    order_id: OrderId::generate(),
                    total: "25.50".parse().unwrap(),
                    message: "Order placed successfully".to_owned(),
                }),
            )
        }),
    );
    let base_url = serve(app).await;

    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = seeded_session(&dir);
        let client = CheckoutClient::new(base_url);

        let response = client.checkout(&mut session, customer()).await.unwrap();
        assert_eq!(response.total, "25.50".parse::<Decimal>().unwrap());
        assert!(session.cart().is_empty());
    }

    // The persisted copy is gone too.
    assert!(session_in(&dir).cart().is_empty());
}

#[tokio::test]
async fn test_rejected_order_leaves_cart_intact() {
    let app = Router::new().route(
        "/orders",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Product not found: p1".to_owned(),
                }),
            )
        }),
    );
    let base_url = serve(app).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);
    let client = CheckoutClient::new(base_url);

    let err = client.checkout(&mut session, customer()).await.unwrap_err();
    match err {
        CheckoutError::UnknownProduct(id) => assert_eq!(id, "p1"),
        other => panic!("expected UnknownProduct, got {other:?}"),
    }
    assert_eq!(session.lines().len(), 2);
    assert_eq!(session.count(), 3);
}

#[tokio::test]
async fn test_server_failure_leaves_cart_intact() {
    let app = Router::new().route(
        "/orders",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_owned(),
                }),
            )
        }),
    );
    let base_url = serve(app).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);
    let client = CheckoutClient::new(base_url);

    let err = client.checkout(&mut session, customer()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Server(_)));
    assert!(err.is_retryable());
    assert_eq!(session.count(), 3);
}

#[tokio::test]
async fn test_transport_failure_leaves_cart_intact() {
    // Nothing listens on this port; the request never completes.
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);
    let client = CheckoutClient::new("http://127.0.0.1:1");

    let err = client.checkout(&mut session, customer()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Transport(_)));
    assert_eq!(session.count(), 3);
}
