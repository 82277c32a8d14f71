//! CLI command implementations.

pub mod migrate;
pub mod seed;

/// Read the database URL from the environment.
///
/// Prefers `STOREFRONT_DATABASE_URL` (the storefront owns the schema),
/// falling back to the generic `DATABASE_URL`.
///
/// # Errors
///
/// Returns an error naming the missing variable.
pub fn database_url() -> Result<String, MissingEnvVar> {
    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MissingEnvVar("STOREFRONT_DATABASE_URL"))
}

/// Error for a missing required environment variable.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVar(pub &'static str);
