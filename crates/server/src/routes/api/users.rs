//! JSON API handlers for administrative user management.
//!
//! User responses only ever contain identifiers and names; hashes stay in
//! the database.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use stockline_core::UserId;

use crate::error::AppError;
use crate::models::UserRecord;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Payload for creating or updating a user.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    name: Option<String>,
    password: Option<String>,
}

impl UserPayload {
    fn into_parts(self) -> Result<(String, String), AppError> {
        let (Some(name), Some(password)) = (self.name, self.password) else {
            return Err(AppError::BadRequest(
                "Name and password are required".to_string(),
            ));
        };
        Ok((name, password))
    }
}

/// `GET /users` - List all users.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, AppError> {
    let auth = AuthService::new(state.pool());
    let users = auth.list_users().await?;

    Ok(Json(users.into_iter().map(UserRecord::from).collect()))
}

/// `POST /users` - Create a user.
///
/// Duplicate names are rejected with 409, matching the sign-up path.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<UserRecord>), AppError> {
    let (name, password) = payload.into_parts()?;

    let auth = AuthService::new(state.pool());
    let user = auth.create_user(&name, &password).await?;

    tracing::info!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(UserRecord::from(user))))
}

/// `PUT /users/{id}` - Overwrite a user's name and password.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserRecord>, AppError> {
    let (name, password) = payload.into_parts()?;

    let auth = AuthService::new(state.pool());
    let user = auth
        .update_user(UserId::new(id), &name, &password)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AppError::NotFound("User".to_string()),
            other => AppError::Auth(other),
        })?;

    Ok(Json(UserRecord::from(user)))
}

/// `DELETE /users/{id}` - Delete a user.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let auth = AuthService::new(state.pool());
    auth.delete_user(UserId::new(id)).await.map_err(|e| match e {
        AuthError::UserNotFound => AppError::NotFound("User".to_string()),
        other => AppError::Auth(other),
    })?;

    Ok(StatusCode::NO_CONTENT)
}
