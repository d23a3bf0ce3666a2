// SPDX-License-Identifier: AGPL-3.0-or-later

//! Account endpoints: register, login, logout, current user.
//!
//! Login failures use one generic message for both unknown email and wrong
//! password, so the endpoint leaks no user-enumeration signal.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{middleware::bearer_token, password, Auth, Role},
    error::ApiError,
    models::{AuthResponse, LoginRequest, MeResponse, MessageResponse, RegisterRequest},
    state::AppState,
    store::UserRepository,
};

/// Minimum accepted password length at registration.
const MIN_PASSWORD_LEN: usize = 8;

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

fn duplicate_email() -> ApiError {
    ApiError::conflict("A user with this email already exists")
}

/// Loose structural check: a non-empty local part and a domain with a dot.
fn email_issues(email: &str) -> Option<String> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        None
    } else {
        Some("email must be a valid address".to_string())
    }
}

fn validate_register(req: &RegisterRequest) -> Vec<String> {
    let mut issues = Vec::new();
    if let Some(issue) = email_issues(&req.email) {
        issues.push(issue);
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        issues.push(format!("password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if matches!(&req.name, Some(name) if name.is_empty()) {
        issues.push("name must not be empty when provided".to_string());
    }
    issues
}

fn validate_login(req: &LoginRequest) -> Vec<String> {
    let mut issues = Vec::new();
    if let Some(issue) = email_issues(&req.email) {
        issues.push(issue);
    }
    if req.password.is_empty() {
        issues.push("password must not be empty".to_string());
    }
    issues
}

/// Create a new account and an initial session.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Malformed input"),
        (status = 409, description = "Email already in use"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let issues = validate_register(&request);
    if !issues.is_empty() {
        return Err(ApiError::validation(issues));
    }

    if UserRepository::find_by_email(&state.pool, &request.email)
        .await?
        .is_some()
    {
        return Err(duplicate_email());
    }

    let password_hash = password::hash_password(&request.password, state.bcrypt_cost)?;
    let user = UserRepository::create(
        &state.pool,
        &Uuid::new_v4().to_string(),
        &request.email,
        request.name.as_deref(),
        &password_hash,
        Role::default(),
    )
    .await
    .map_err(|e| {
        // A concurrent registration can beat the pre-check to the insert.
        if e.is_unique_violation() {
            duplicate_email()
        } else {
            ApiError::from(e)
        }
    })?;

    let session = state.sessions.create_session(&user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user,
            session: session.into(),
        }),
    ))
}

/// Authenticate with email and password, creating a new session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, description = "Malformed input"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let issues = validate_login(&request);
    if !issues.is_empty() {
        return Err(ApiError::validation(issues));
    }

    let Some(row) = UserRepository::find_by_email(&state.pool, &request.email).await? else {
        return Err(invalid_credentials());
    };

    if !password::verify_password(&request.password, &row.password_hash) {
        return Err(invalid_credentials());
    }

    let user = row.into_public();
    let session = state.sessions.create_session(&user.id).await?;

    Ok(Json(AuthResponse {
        user,
        session: session.into(),
    }))
}

/// Invalidate the presented session. Succeeds whether or not the token
/// still exists.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 400, description = "No session token provided"),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = bearer_token(&headers)
        .map_err(|_| ApiError::bad_request("No session token provided"))?
        .to_string();

    state.sessions.invalidate_session(&token).await?;

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}

/// Return the authenticated user's public profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing or invalid session"),
    )
)]
pub async fn me(Auth(user): Auth) -> Json<MeResponse> {
    Json(MeResponse { user })
}
