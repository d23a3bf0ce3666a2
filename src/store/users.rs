// SPDX-License-Identifier: AGPL-3.0-or-later

//! User repository.
//!
//! Two query shapes exist on purpose: `find_by_email` selects the password
//! hash for credential verification during login, while every other read
//! selects the public columns only.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::StoreResult;
use crate::auth::Role;
use crate::models::PublicUser;

/// Full user row, including the password hash. Confined to the store and
/// the login path; never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Drop the credential material, keeping the public profile.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role,
        }
    }
}

pub struct UserRepository;

impl UserRepository {
    /// Insert a new user and return the public profile.
    pub async fn create(
        pool: &SqlitePool,
        id: &str,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
        role: Role,
    ) -> StoreResult<PublicUser> {
        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(role)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(PublicUser {
            id: id.to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            role,
        })
    }

    /// Look up a user by email, password hash included (login path).
    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> StoreResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, password_hash, role, created_at \
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Look up a user's public profile by id. The password hash column is
    /// not part of the query.
    pub async fn find_public_by_id(pool: &SqlitePool, id: &str) -> StoreResult<Option<PublicUser>> {
        let user = sqlx::query_as::<_, PublicUser>(
            "SELECT id, email, name, role FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Upsert the seed admin account: creates it when the email is free,
    /// leaves an existing account untouched.
    pub async fn ensure_admin(
        pool: &SqlitePool,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(email) DO NOTHING",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind("Admin")
        .bind(password_hash)
        .bind(Role::Admin)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(())
    }
}
