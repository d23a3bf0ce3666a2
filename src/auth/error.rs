// SPDX-License-Identifier: AGPL-3.0-or-later

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure modes of the auth middleware and role gate.
///
/// Authentication failures (401) are deliberately coarse so callers cannot
/// distinguish an unknown token from an expired one.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present.
    MissingAuthHeader,
    /// Header present but not `Bearer <token>`.
    InvalidAuthHeader,
    /// Token unknown, expired, or its user no longer exists.
    InvalidSession,
    /// Authenticated, but the role is outside the accepted set.
    InsufficientRole,
    /// Unexpected failure while authenticating; detail stays server-side.
    Internal,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidSession => "invalid_session",
            AuthError::InsufficientRole => "insufficient_role",
            AuthError::Internal => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => {
                write!(f, "Authentication required. Please provide a Bearer token.")
            }
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidSession => {
                write!(f, "Invalid or expired session. Please log in again.")
            }
            AuthError::InsufficientRole => {
                write!(f, "You do not have permission to access this resource.")
            }
            AuthError::Internal => write!(f, "Internal server error during authentication"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_auth_returns_401() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_auth_header");
    }

    #[tokio::test]
    async fn insufficient_role_returns_403() {
        let response = AuthError::InsufficientRole.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn internal_error_body_is_generic() {
        let response = AuthError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Internal server error during authentication");
    }
}
