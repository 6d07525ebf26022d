//! Admin session route handlers.
//!
//! Login checks a username and password against the admin store and records
//! the admin in the session. Logout destroys the session.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::{Span, info, instrument};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Handle admin login.
#[instrument(skip_all, fields(username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = payload?;
    Span::current().record("username", body.username.as_str());

    let account = state.auth().verify(&body.username, &body.password).await?;

    let current = CurrentAdmin::from(&account);
    set_current_admin(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to set session: {e}")))?;

    set_sentry_user(&current.id, current.username.as_str());
    info!(admin_id = %current.id, "Admin logged in");

    Ok(Json(json!({ "message": "Logged in successfully" })))
}

/// Handle admin logout.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn logout(
    RequireAdminAuth(admin): RequireAdminAuth,
    session: Session,
) -> Result<Json<Value>> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to clear session: {e}")))?;

    clear_sentry_user();
    info!(username = %admin.username, "Admin logged out");

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// Return the identity of the logged-in admin.
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
