// SPDX-License-Identifier: AGPL-3.0-or-later

//! Session repository: create, find-by-token, delete.
//!
//! Expiry is not interpreted here; the session manager owns that policy
//! and this layer only moves rows.

use sqlx::SqlitePool;

use super::StoreResult;
use crate::models::Session;

pub struct SessionRepository;

impl SessionRepository {
    /// Persist a freshly issued session.
    pub async fn insert(pool: &SqlitePool, session: &Session) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, token, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.token)
        .bind(session.expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Look up a session by its token.
    pub async fn find_by_token(pool: &SqlitePool, token: &str) -> StoreResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, token, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;
        Ok(session)
    }

    /// Delete one session by id. Returns the number of rows removed.
    pub async fn delete_by_id(pool: &SqlitePool, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every session carrying the token. Zero rows is fine.
    pub async fn delete_by_token(pool: &SqlitePool, token: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
