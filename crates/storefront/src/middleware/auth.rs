//! Seller identity extractors.
//!
//! The acting seller is resolved in this order:
//!
//! 1. the `current_seller` session entry (bound by `POST /auth/login`)
//! 2. the configured development seller (`KITZZ_DEV_SELLER`)
//!
//! Dashboard handlers take [`RequireSeller`]; public pages that only need
//! to know who is looking take [`OptionalSeller`].

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use kitzz_core::Username;

use crate::error::{AppError, set_sentry_user};
use crate::models::{CurrentSeller, User, session_keys};
use crate::state::AppState;

/// Extractor that requires a known seller.
///
/// Rejects with 401 if no identity resolves or the username is not in the
/// users table.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireSeller(seller): RequireSeller) -> impl IntoResponse {
///     format!("Hello, {}!", seller.username)
/// }
/// ```
pub struct RequireSeller(pub User);

impl FromRequestParts<AppState> for RequireSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = resolve_seller(parts, state)
            .await
            .ok_or_else(|| AppError::Unauthorized("no seller identity".to_string()))?;

        let user = state
            .repository()
            .users()
            .get(&username)?
            .ok_or_else(|| AppError::Unauthorized(format!("unknown seller '{username}'")))?;

        set_sentry_user(&user.username);
        Ok(Self(user))
    }
}

/// Extractor that optionally resolves the acting seller.
///
/// Unlike `RequireSeller`, this never rejects and does not consult the
/// users table.
pub struct OptionalSeller(pub Option<Username>);

impl FromRequestParts<AppState> for OptionalSeller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_seller(parts, state).await))
    }
}

async fn resolve_seller(parts: &Parts, state: &AppState) -> Option<Username> {
    let from_session = match parts.extensions.get::<Session>() {
        Some(session) => match session
            .get::<CurrentSeller>(session_keys::CURRENT_SELLER)
            .await
        {
            Ok(seller) => seller.map(|s| s.username),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read seller from session");
                None
            }
        },
        None => None,
    };

    from_session.or_else(|| state.config().dev_seller.clone())
}

/// Helper to bind the acting seller in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_seller(
    session: &Session,
    username: &Username,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(
            session_keys::CURRENT_SELLER,
            CurrentSeller {
                username: username.clone(),
            },
        )
        .await
}
