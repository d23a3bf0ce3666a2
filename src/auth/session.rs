// SPDX-License-Identifier: AGPL-3.0-or-later

//! Session issuance, validation, and invalidation.
//!
//! Sessions are opaque server-side records rather than self-contained
//! signed tokens: every authenticated request costs one store lookup, and
//! in exchange logout is immediate and absolute. Expiry is lazy - an
//! expired session is detected and deleted when it is next looked up, not
//! by a background sweep.
//!
//! ## Session lifecycle
//!
//! `ACTIVE` (created, `now < expires_at`, user resolvable) ends either by
//! expiry or by explicit logout. Both outcomes delete the record; there is
//! no resurrection and no sliding renewal.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::SESSION_TTL_DAYS;
use crate::models::{PublicUser, Session};
use crate::store::{SessionRepository, StoreError, UserRepository};

/// Number of random bytes in a session token (256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// Time source, injectable for expiry-boundary tests.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>);

impl Clock {
    /// Wall-clock time.
    pub fn system() -> Self {
        Self(Arc::new(Utc::now))
    }

    /// A clock driven by the given closure.
    pub fn from_fn(f: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock").finish_non_exhaustive()
    }
}

/// A successfully validated session together with the owner's public
/// profile. The profile comes from a store query that never selects the
/// password hash column.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub session: Session,
    pub user: PublicUser,
}

/// Issues, validates, and invalidates sessions against the store.
///
/// Holds a clone of the shared connection pool; cloning the manager is
/// cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct SessionManager {
    pool: SqlitePool,
    ttl: Duration,
    clock: Clock,
}

impl SessionManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ttl: Duration::days(SESSION_TTL_DAYS),
            clock: Clock::system(),
        }
    }

    /// Replace the time source. Test-oriented builder.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the fixed session lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a new session for `user_id`.
    ///
    /// Generates a 256-bit random token, fixes the expiry at `now + ttl`,
    /// and persists the record. Multiple sessions per user may coexist.
    pub async fn create_session(&self, user_id: &str) -> Result<Session, StoreError> {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            token: generate_token(),
            expires_at: self.clock.now() + self.ttl,
        };
        SessionRepository::insert(&self.pool, &session).await?;
        Ok(session)
    }

    /// Look up a session by token.
    ///
    /// Returns `Ok(None)` - not an error - when the token is unknown, the
    /// session has expired, or the owning user no longer resolves. In the
    /// latter two cases the stale record is deleted best-effort; a failed
    /// cleanup is logged and swallowed, never changing the `None` outcome.
    pub async fn validate_session(
        &self,
        token: &str,
    ) -> Result<Option<ValidatedSession>, StoreError> {
        let Some(session) = SessionRepository::find_by_token(&self.pool, token).await? else {
            return Ok(None);
        };

        if self.clock.now() >= session.expires_at {
            self.discard(&session).await;
            return Ok(None);
        }

        let Some(user) = UserRepository::find_public_by_id(&self.pool, &session.user_id).await?
        else {
            // Referential integrity enforced at read time: a session whose
            // user is gone is invalid regardless of expiry.
            self.discard(&session).await;
            return Ok(None);
        };

        Ok(Some(ValidatedSession { session, user }))
    }

    /// Delete every session record carrying `token`. Idempotent: deleting
    /// zero rows is not an error.
    pub async fn invalidate_session(&self, token: &str) -> Result<(), StoreError> {
        SessionRepository::delete_by_token(&self.pool, token).await?;
        Ok(())
    }

    /// Best-effort removal of a stale session record.
    async fn discard(&self, session: &Session) {
        if let Err(e) = SessionRepository::delete_by_id(&self.pool, &session.id).await {
            tracing::warn!(session_id = %session.id, error = %e, "Failed to clean up stale session");
        }
    }
}

/// Generate a hex-encoded session token from OS randomness.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::{self, UserRepository};
    use std::sync::Mutex;

    async fn test_pool() -> SqlitePool {
        store::testing::pool().await
    }

    async fn seed_user(pool: &SqlitePool, email: &str, role: Role) -> PublicUser {
        UserRepository::create(
            pool,
            &Uuid::new_v4().to_string(),
            email,
            Some("Test User"),
            "$2b$04$notarealhashnotarealhashnotarealhash",
            role,
        )
        .await
        .unwrap()
    }

    /// A clock whose current time can be moved from the test body.
    fn manual_clock(start: DateTime<Utc>) -> (Clock, Arc<Mutex<DateTime<Utc>>>) {
        let handle = Arc::new(Mutex::new(start));
        let reader = handle.clone();
        let clock = Clock::from_fn(move || *reader.lock().unwrap());
        (clock, handle)
    }

    #[test]
    fn generated_tokens_are_long_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64); // 32 bytes hex-encoded
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn create_then_validate_returns_user_profile() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@b.com", Role::User).await;
        let sessions = SessionManager::new(pool);

        let session = sessions.create_session(&user.id).await.unwrap();
        let validated = sessions
            .validate_session(&session.token)
            .await
            .unwrap()
            .expect("fresh session validates");

        assert_eq!(validated.user, user);
        assert_eq!(validated.session.user_id, user.id);
    }

    #[tokio::test]
    async fn unknown_token_is_none_not_error() {
        let pool = test_pool().await;
        let sessions = SessionManager::new(pool);
        let result = sessions.validate_session("never-issued").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn session_expires_exactly_at_expiry_instant() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@b.com", Role::User).await;

        let start = Utc::now();
        let (clock, handle) = manual_clock(start);
        let sessions = SessionManager::new(pool).with_clock(clock);

        let session = sessions.create_session(&user.id).await.unwrap();
        let expires_at = session.expires_at;

        *handle.lock().unwrap() = expires_at - Duration::milliseconds(1);
        assert!(sessions
            .validate_session(&session.token)
            .await
            .unwrap()
            .is_some());

        *handle.lock().unwrap() = expires_at + Duration::milliseconds(1);
        assert!(sessions
            .validate_session(&session.token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn expired_session_is_lazily_deleted() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@b.com", Role::User).await;

        let (clock, handle) = manual_clock(Utc::now());
        let sessions = SessionManager::new(pool.clone()).with_clock(clock);

        let session = sessions.create_session(&user.id).await.unwrap();
        *handle.lock().unwrap() = session.expires_at + Duration::seconds(1);

        assert!(sessions
            .validate_session(&session.token)
            .await
            .unwrap()
            .is_none());

        // The stale row is gone, not merely ignored.
        let row = SessionRepository::find_by_token(&pool, &session.token)
            .await
            .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn session_without_resolvable_user_is_invalid() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@b.com", Role::User).await;
        let sessions = SessionManager::new(pool.clone());

        let session = sessions.create_session(&user.id).await.unwrap();

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(&user.id)
            .execute(&pool)
            .await
            .unwrap();

        // Cascade removes the session row; either way validation sees None.
        assert!(sessions
            .validate_session(&session.token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn invalidate_is_idempotent() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@b.com", Role::User).await;
        let sessions = SessionManager::new(pool);

        let session = sessions.create_session(&user.id).await.unwrap();

        sessions.invalidate_session(&session.token).await.unwrap();
        assert!(sessions
            .validate_session(&session.token)
            .await
            .unwrap()
            .is_none());

        // Second invalidation deletes zero rows and still succeeds.
        sessions.invalidate_session(&session.token).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_sessions_per_user_are_independent() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@b.com", Role::User).await;
        let sessions = SessionManager::new(pool);

        let first = sessions.create_session(&user.id).await.unwrap();
        let second = sessions.create_session(&user.id).await.unwrap();
        assert_ne!(first.token, second.token);

        sessions.invalidate_session(&first.token).await.unwrap();
        assert!(sessions
            .validate_session(&second.token)
            .await
            .unwrap()
            .is_some());
    }
}
