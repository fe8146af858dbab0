//! Shoplite client - the buyer-side half of the cart/order engine.
//!
//! This crate pairs the pure cart engine from `shoplite-core` with the two
//! side effects a browsing session needs:
//!
//! - [`store`] - durable cart storage (sled key/value, one key holds the
//!   whole cart), surviving reloads of the session
//! - [`session`] - a write-through [`CartSession`] that persists after every
//!   mutation
//! - [`http`] - the checkout client that submits the cart to the
//!   verification service and clears it only on success

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use error::CheckoutError;
pub use http::CheckoutClient;
pub use session::CartSession;
pub use store::{CartStore, StoreError};
