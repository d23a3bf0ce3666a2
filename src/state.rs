// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared application state, constructed once in `main` and cloned into
//! every handler. Components receive the pooled store connection through
//! this struct rather than any global handle.

use sqlx::SqlitePool;

use crate::auth::SessionManager;
use crate::config::DEFAULT_BCRYPT_COST;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: SessionManager,
    /// Work factor for password hashing.
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sessions: SessionManager::new(pool.clone()),
            pool,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Override the password hashing work factor.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Replace the session manager (e.g. to inject a test clock).
    pub fn with_sessions(mut self, sessions: SessionManager) -> Self {
        self.sessions = sessions;
        self
    }
}
