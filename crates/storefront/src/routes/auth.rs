//! Registration, login and logout handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::user::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The signed-in user as returned to clients.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.as_i64(),
            email: user.email.to_string(),
            is_admin: user.is_admin,
        }
    }
}

/// `POST /auth/register` - Create an account and sign in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserView>> {
    let user = AuthService::new(state.pool())
        .register(&credentials.email, &credentials.password)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(UserView::from(&current)))
}

/// `POST /auth/login` - Verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<Credentials>,
) -> Result<Json<UserView>> {
    let user = AuthService::new(state.pool())
        .login(&credentials.email, &credentials.password)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(UserView::from(&current)))
}

/// `POST /auth/logout` - Drop the signed-in user.
///
/// Only the user key is removed; the cart stays in the session so a
/// shopper who logs out does not lose what they picked.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(serde_json::json!({ "logged_out": true })))
}
