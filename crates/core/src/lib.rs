//! Shoplite Core - Shared types library.
//!
//! This crate provides common types used across all Shoplite components:
//! - `client` - Buyer-side cart session and checkout client
//! - `server` - Catalog and order-verification service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses
//! - [`product`] - Catalog product snapshot
//! - [`cart`] - The cart engine: pure operations over an owned cart value
//! - [`checkout`] - Wire DTOs shared between client and server
//! - [`order`] - The verified order model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod order;
pub mod product;
pub mod types;

pub use cart::{Cart, CartLine};
pub use checkout::{CheckoutItem, CheckoutRequest, CheckoutResponse, Customer, ErrorResponse};
pub use order::{Order, OrderCustomer, OrderLine};
pub use product::Product;
pub use types::*;
