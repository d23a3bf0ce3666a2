// SPDX-License-Identifier: AGPL-3.0-or-later

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn me(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the resolved PublicUser
//! }
//! ```
//!
//! If the `authenticate` middleware already ran, the extractor reuses the
//! identity it attached; otherwise it validates the bearer token itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{middleware::bearer_token, AuthError, CurrentUser};
use crate::models::PublicUser;
use crate::state::AppState;

/// Extractor rejecting unauthenticated requests with 401.
pub struct Auth(pub PublicUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Middleware may already have resolved the identity.
        if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = bearer_token(&parts.headers)?.to_string();

        match state.sessions.validate_session(&token).await {
            Ok(Some(validated)) => Ok(Auth(validated.user)),
            Ok(None) => Err(AuthError::InvalidSession),
            Err(e) => {
                tracing::error!(error = %e, "Session validation failed in Auth extractor");
                Err(AuthError::Internal)
            }
        }
    }
}
