//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use stockline_server::services::auth::AuthError;

/// Errors that can occur while running CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Repository error: {0}")]
    Repository(#[from] stockline_server::db::RepositoryError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the database named by `STOCKLINE_DATABASE_URL` (or
/// `DATABASE_URL`), creating the file if it doesn't exist yet.
pub async fn connect() -> Result<SqlitePool, CliError> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("STOCKLINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("STOCKLINE_DATABASE_URL"))?;

    let options = SqliteConnectOptions::from_str(&database_url)
        .map_err(|e| CliError::InvalidDatabaseUrl(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}
