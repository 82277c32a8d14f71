//! Database migration command.
//!
//! Applies the storefront crate's migrations (the storefront owns the
//! schema; the admin binary uses the same database).
//!
//! ```bash
//! rh-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` (fallback `DATABASE_URL`) - `PostgreSQL`
//!   connection string

use sqlx::PgPool;

use super::database_url;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    MissingEnvVar(#[from] super::MissingEnvVar),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
