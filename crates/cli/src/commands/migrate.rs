//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! stockline-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKLINE_DATABASE_URL` - `SQLite` connection string
//!   (falls back to `DATABASE_URL`)

use super::CliError;

/// Run the server's embedded migrations against the configured database.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
