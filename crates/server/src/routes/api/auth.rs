//! JSON API handlers for sign-up and login.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::UserRecord;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Credentials payload shared by sign-up and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    name: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    fn into_parts(self) -> Result<(String, String), AppError> {
        let (Some(name), Some(password)) = (self.name, self.password) else {
            return Err(AppError::BadRequest(
                "Name and password are required".to_string(),
            ));
        };
        Ok((name, password))
    }
}

/// `POST /signup` - Create a user via self-service.
///
/// Returns 201 with a success message; the password never round-trips.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (name, password) = payload.into_parts()?;

    let auth = AuthService::new(state.pool());
    let user = auth.sign_up(&name, &password).await?;

    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Sign up successful!" })),
    ))
}

/// `POST /login` - Authenticate with name and password.
///
/// Returns the minimal user record; the stored hash is never included.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<Value>, AppError> {
    let (name, password) = payload.into_parts()?;

    let auth = AuthService::new(state.pool());
    let user = auth.login(&name, &password).await.map_err(|e| match e {
        crate::services::auth::AuthError::InvalidCredentials => {
            AppError::Unauthorized("Invalid name or password".to_string())
        }
        other => AppError::Auth(other),
    })?;

    Ok(Json(json!({
        "message": "Login successful!",
        "user": UserRecord::from(user),
    })))
}
