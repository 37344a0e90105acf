//! Authentication service.
//!
//! Handles sign-up, login, and administrative user management. Passwords are
//! hashed with Argon2id before they reach the repository and are compared
//! against the stored hash on login; plaintext is never persisted.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use stockline_core::{UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with name and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the name is empty or malformed.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the name is already taken.
    pub async fn sign_up(&self, name: &str, password: &str) -> Result<User, AuthError> {
        // Duplicate names are rejected on every creation path, so the
        // self-service flow is just the administrative one.
        self.create_user(name, password).await
    }

    /// Login with name and password.
    ///
    /// The returned record never includes the password hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the name is unknown or the
    /// password doesn't match.
    pub async fn login(&self, name: &str, password: &str) -> Result<User, AuthError> {
        let name = Username::parse(name).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = self.users.list_all().await?;
        Ok(users)
    }

    /// Create a user (administrative path).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the name is empty or malformed.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the name is already taken.
    pub async fn create_user(&self, name: &str, password: &str) -> Result<User, AuthError> {
        let name = Username::parse(name)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Overwrite a user's name and password. The new password is re-hashed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    /// Returns `AuthError::UserAlreadyExists` if the new name is taken.
    pub async fn update_user(
        &self,
        id: UserId,
        name: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = Username::parse(name)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .update(id, &name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Delete a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn delete_user(&self, id: UserId) -> Result<(), AuthError> {
        self.users.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => AuthError::UserNotFound,
            other => AuthError::Repository(other),
        })
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_sign_up_then_login() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let created = auth.sign_up("alice", "password123").await.unwrap();
        let logged_in = auth.login("alice", "password123").await.unwrap();
        assert_eq!(created.id, logged_in.id);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_name() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        auth.sign_up("alice", "password123").await.unwrap();
        let result = auth.sign_up("alice", "password456").await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
        assert_eq!(auth.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        auth.sign_up("alice", "password123").await.unwrap();
        let result = auth.login("alice", "password456").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_name() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let result = auth.login("nobody", "password123").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let created = auth.sign_up("alice", "password123").await.unwrap();
        auth.update_user(created.id, "alice", "newpassword")
            .await
            .unwrap();

        assert!(auth.login("alice", "password123").await.is_err());
        assert!(auth.login("alice", "newpassword").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let result = auth.delete_user(UserId::new(404)).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}
