//! User management page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use stockline_core::UserId;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Add/update user form data.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// User management page template.
#[derive(Template, WebTemplate)]
#[template(path = "users/list.html")]
pub struct UserManagementTemplate {
    pub current_user: CurrentUser,
    pub users: Vec<User>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /user-management` - Display all users and the add-user form.
pub async fn page(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<UserManagementTemplate, AppError> {
    let auth = AuthService::new(state.pool());
    let users = auth.list_users().await?;

    Ok(UserManagementTemplate {
        current_user,
        users,
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    })
}

/// `POST /user-management` - Create a user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_current_user): RequireAuth,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.create_user(&form.name, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user created");
            Ok(Redirect::to("/user-management?success=created").into_response())
        }
        Err(e) => redirect_for_auth_error(e),
    }
}

/// `POST /user-management/{id}/update` - Overwrite a user's name and
/// password. The password is always re-hashed.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_current_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth
        .update_user(UserId::new(id), &form.name, &form.password)
        .await
    {
        Ok(_) => Ok(Redirect::to("/user-management?success=updated").into_response()),
        Err(e) => redirect_for_auth_error(e),
    }
}

/// `POST /user-management/{id}/delete` - Delete a user.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_current_user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.delete_user(UserId::new(id)).await {
        Ok(()) => Ok(Redirect::to("/user-management?success=deleted").into_response()),
        Err(e) => redirect_for_auth_error(e),
    }
}

/// Map expected auth failures to redirect codes; anything else bubbles up
/// as a server error.
fn redirect_for_auth_error(err: AuthError) -> Result<Response, AppError> {
    let code = match err {
        AuthError::UserAlreadyExists => "name_taken",
        AuthError::UserNotFound => "not_found",
        AuthError::WeakPassword(_) => "weak_password",
        AuthError::InvalidName(_) => "invalid_name",
        other => return Err(other.into()),
    };

    Ok(Redirect::to(&format!("/user-management?error={code}")).into_response())
}

// =============================================================================
// Message Translation
// =============================================================================

fn error_message(code: &str) -> String {
    match code {
        "name_taken" => "That name is already taken.",
        "weak_password" => "Password must be at least 8 characters.",
        "invalid_name" => "Please enter a valid name.",
        "not_found" => "That user no longer exists.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn success_message(code: &str) -> String {
    match code {
        "created" => "User added successfully!",
        "updated" => "User updated successfully!",
        "deleted" => "User deleted successfully!",
        _ => "Done.",
    }
    .to_string()
}
