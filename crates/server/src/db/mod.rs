//! Database operations for the Shoplite `PostgreSQL` store.
//!
//! # Tables
//!
//! - `products` - The catalog of record: the only price source the
//!   checkout verifier trusts
//! - `orders` - Append-only record of verified orders (line items as JSONB)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shoplite-cli -- migrate
//! ```

pub mod catalog;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use catalog::CatalogRepository;
pub use orders::OrderRepository;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back onto the domain model.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
