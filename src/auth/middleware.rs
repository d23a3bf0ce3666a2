// SPDX-License-Identifier: AGPL-3.0-or-later

//! Authentication middleware and role gate for Axum.
//!
//! `authenticate` resolves the bearer token to a user and attaches the
//! public profile to the request as a typed extension value; `require_role`
//! reads that value and allows or denies the request. Compose them with
//! `authenticate` outermost so the gate always sees a resolved identity:
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/products", post(create_product))
//!     .route_layer(middleware::from_fn(require_role(&[Role::Admin])))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
//! ```

use std::{future::Future, pin::Pin};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, CurrentUser, Role};
use crate::state::AppState;

/// Extract the token from a standard `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;
    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Authentication middleware.
///
/// Short-circuits with 401 on a missing/malformed header or an invalid
/// session; on success the resolved [`CurrentUser`] is inserted into the
/// request extensions and control proceeds. Store failures are logged and
/// reported as a generic 500.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(token) => token.to_string(),
        Err(e) => return e.into_response(),
    };

    match state.sessions.validate_session(&token).await {
        Ok(Some(validated)) => {
            request.extensions_mut().insert(CurrentUser(validated.user));
            next.run(request).await
        }
        Ok(None) => AuthError::InvalidSession.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Session validation failed in auth middleware");
            AuthError::Internal.into_response()
        }
    }
}

/// Role gate middleware restricting a route to the given accepted roles.
///
/// Precondition: `authenticate` ran first and attached the identity. If it
/// did not, the gate fails closed with authentication-required.
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |request, next| Box::pin(role_gate(allowed, request, next))
}

async fn role_gate(allowed: &'static [Role], request: Request, next: Next) -> Response {
    let Some(CurrentUser(user)) = request.extensions().get::<CurrentUser>() else {
        // Unreachable when composed after `authenticate`; fail closed anyway.
        return AuthError::MissingAuthHeader.into_response();
    };

    if !user.role.permits(allowed) {
        return AuthError::InsufficientRole.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_extracts_token() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        let headers = headers_with("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));
    }
}
