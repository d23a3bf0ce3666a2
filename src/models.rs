// SPDX-License-Identifier: AGPL-3.0-or-later

//! # API Data Models
//!
//! Request and response structures used by the REST API. All wire types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation, and serialize in camelCase to match the
//! storefront frontend.
//!
//! The public user shape deliberately has no password-hash field: handlers
//! cannot leak what the type cannot carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// Users & Sessions
// =============================================================================

/// Public profile of a user: the shape attached to authenticated requests
/// and returned by every auth endpoint. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Opaque unique identifier (UUIDv4).
    pub id: String,
    /// Unique email, case-sensitive as stored.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Authorization role.
    pub role: Role,
}

/// A persisted session record proving a prior successful authentication.
///
/// Immutable after creation: expiry is fixed at issue time and there is no
/// sliding renewal.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    /// High-entropy random token (256 bits, hex-encoded).
    pub token: String,
    /// Absolute expiry; the session is valid strictly before this instant.
    pub expires_at: DateTime<Utc>,
}

// =============================================================================
// Auth Requests & Responses
// =============================================================================

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token and expiry handed to the client on login or registration.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
        }
    }
}

/// Response body for successful registration and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub session: SessionResponse,
}

/// Response body for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: PublicUser,
}

/// Plain confirmation message (e.g. logout).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Catalog Models
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Stock keeping unit, unique when present.
    pub sku: Option<String>,
    pub description: Option<String>,
    /// Price in integer minor units (e.g. cents).
    pub price: i64,
    pub category_id: Option<String>,
    /// Id of the admin who created the product.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a product. Admin-only.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// A product category with its product count, as returned by the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Count of products currently assigned to this category.
    pub product_count: i64,
}
