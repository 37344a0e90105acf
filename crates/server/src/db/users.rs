//! User repository for database operations.
//!
//! Password hashes never leave this module except through
//! [`UserRepository::get_password_hash`], which the auth service uses for
//! login verification.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use stockline_core::{UserId, Username};

use super::RepositoryError;
use crate::models::user::User;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for user queries. Deliberately excludes the hash.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let name = Username::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid name in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, created_at, updated_at FROM user ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, created_at, updated_at FROM user WHERE id = ?1",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user and their password hash by account name.
    ///
    /// Returns `None` if the name is unknown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_password_hash(
        &self,
        name: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i64, String, String, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT id, name, password_hash, created_at, updated_at FROM user WHERE name = ?1",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some((id, name, password_hash, created_at, updated_at)) = row else {
            return Ok(None);
        };

        let user = UserRow {
            id,
            name,
            created_at,
            updated_at,
        }
        .try_into()?;

        Ok(Some((user, password_hash)))
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO user (name, password_hash, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?3) \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(name.as_str())
        .bind(password_hash)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Overwrite a user's name and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: UserId,
        name: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE user \
             SET name = ?1, password_hash = ?2, updated_at = ?3 \
             WHERE id = ?4 \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(name.as_str())
        .bind(password_hash)
        .bind(now)
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM user WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
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

    fn name(s: &str) -> Username {
        Username::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create(&name("alice"), "hash-a").await.unwrap();
        let result = repo.create(&name("alice"), "hash-b").await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_password_hash() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let created = repo.create(&name("alice"), "hash-a").await.unwrap();

        let (user, hash) = repo
            .get_password_hash(&name("alice"))
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(user.id, created.id);
        assert_eq!(hash, "hash-a");

        assert!(
            repo.get_password_hash(&name("nobody"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_rehashes_and_renames() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let created = repo.create(&name("alice"), "hash-a").await.unwrap();

        let updated = repo
            .update(created.id, &name("alicia"), "hash-b")
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "alicia");

        let (_, hash) = repo
            .get_password_hash(&name("alicia"))
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(hash, "hash-b");
    }

    #[tokio::test]
    async fn test_update_conflict_on_taken_name() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        repo.create(&name("alice"), "hash-a").await.unwrap();
        let bob = repo.create(&name("bob"), "hash-b").await.unwrap();

        let result = repo.update(bob.id, &name("alice"), "hash-c").await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let result = repo.delete(UserId::new(404)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
