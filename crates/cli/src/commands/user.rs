//! User management commands.

use stockline_server::services::auth::AuthService;

use super::CliError;

/// Create a user with a hashed password.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable, the name is taken,
/// or the password fails validation.
pub async fn create(name: &str, password: &str) -> Result<(), CliError> {
    let pool = super::connect().await?;

    let auth = AuthService::new(&pool);
    let user = auth.create_user(name, password).await?;

    tracing::info!(user_id = %user.id, name = %user.name, "User created");
    Ok(())
}
