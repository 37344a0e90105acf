//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockline_core::{UserId, Username};

/// A user account (domain type).
///
/// The password hash is deliberately not part of this type; it only exists
/// inside the repository and the auth service.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique account name (also the login identifier).
    pub name: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Wire representation of a user: identifier and name only.
///
/// This is the only user shape that ever leaves the service.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: Username,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}
