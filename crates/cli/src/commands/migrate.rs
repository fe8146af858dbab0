//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shoplite migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPLITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use shoplite_server::config::ServerConfig;
use shoplite_server::db;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("configuration error: {0}")]
    Config(#[from] shoplite_server::config::ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the server database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration loading, the database
/// connection, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
