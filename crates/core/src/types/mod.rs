//! Core types for Shoplite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId};
pub use status::OrderStatus;
