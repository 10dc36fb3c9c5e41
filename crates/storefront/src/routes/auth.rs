//! Placeholder authentication endpoints.
//!
//! Neither endpoint creates accounts or checks credentials; they validate
//! the request shape and return fixed responses. Login additionally binds
//! a known user as the acting seller so the dashboard is reachable without
//! `KITZZ_DEV_SELLER`.

use axum::{Json, extract::State};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use kitzz_core::Email;

use crate::error::{AppError, Result};
use crate::middleware::set_current_seller;
use crate::state::AppState;

/// Credentials posted to the auth endpoints.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: SecretString,
}

impl AuthRequest {
    fn email(&self) -> Result<Email> {
        Email::parse(self.email.trim())
            .map_err(|e| AppError::Validation(format!("invalid email: {e}")))
    }
}

/// Response to `POST /auth/register`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Response to `POST /auth/login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Accept a registration.
#[instrument(skip_all)]
pub async fn register(Json(request): Json<AuthRequest>) -> Result<Json<RegisterResponse>> {
    let email = request.email()?;
    tracing::info!(domain = %email.domain(), "Registration requested");

    Ok(Json(RegisterResponse {
        message: "User created".to_string(),
    }))
}

/// Accept a login and issue a placeholder token.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AuthRequest>,
) -> Result<Json<TokenResponse>> {
    let email = request.email()?;

    if let Some(user) = state.repository().users().get_by_email(&email)? {
        set_current_seller(&session, &user.username)
            .await
            .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
        tracing::info!(seller = %user.username, "Seller bound to session");
    }

    Ok(Json(TokenResponse {
        access_token: "jwt_token_here".to_string(),
        token_type: "bearer".to_string(),
    }))
}
