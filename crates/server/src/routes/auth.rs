//! Authentication page handlers.
//!
//! The session is the explicit boundary between the Anonymous and
//! Authenticated states: it is created here on successful login or sign-up
//! and torn down on logout. Failures redirect back to the form with an
//! error code in the query string (the form state itself stays client-side).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login and sign-up form data.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
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

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already-authenticated visitors are sent straight to the dashboard.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query.success.as_deref().map(auth_success_message),
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.name, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser::from(&user);

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            tracing::info!(user_id = %user.id, "user logged in");
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            Redirect::to("/auth/login?error=server").into_response()
        }
    }
}

// =============================================================================
// Sign-up Routes
// =============================================================================

/// Display the sign-up page.
pub async fn signup_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    SignupTemplate {
        error: query.error.as_deref().map(signup_error_message),
    }
    .into_response()
}

/// Handle sign-up form submission.
///
/// Successful sign-up logs the new user straight in.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.sign_up(&form.name, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser::from(&user);

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            tracing::info!(user_id = %user.id, "user signed up");
            Redirect::to("/").into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/auth/signup?error=name_taken").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/auth/signup?error=weak_password").into_response()
        }
        Err(AuthError::InvalidName(_)) => {
            Redirect::to("/auth/signup?error=invalid_name").into_response()
        }
        Err(e) => {
            tracing::error!("Sign-up failed: {}", e);
            Redirect::to("/auth/signup?error=server").into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout: tear down the session and return to the login page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    Redirect::to("/auth/login?success=logged_out").into_response()
}

// =============================================================================
// Message Translation
// =============================================================================

fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid name or password.",
        "session" => "Could not start a session. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn signup_error_message(code: &str) -> String {
    match code {
        "name_taken" => "That name is already taken.",
        "weak_password" => "Password must be at least 8 characters.",
        "invalid_name" => "Please enter a valid name.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn auth_success_message(code: &str) -> String {
    match code {
        "logged_out" => "You have been logged out.",
        _ => "Done.",
    }
    .to_string()
}
