// SPDX-License-Identifier: AGPL-3.0-or-later

//! Relational store access.
//!
//! The pool is created once at startup from the `DATABASE_URL` connection
//! string and injected into everything that needs it; no component reaches
//! for ambient global state. Each repository provides the queries for one
//! entity. Every read of user data that feeds the API goes through queries
//! that never select the password hash column unless credential
//! verification explicitly requires it.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub mod categories;
pub mod products;
pub mod sessions;
pub mod users;

pub use categories::CategoryRepository;
pub use products::ProductRepository;
pub use sessions::SessionRepository;
pub use users::{UserRepository, UserRow};

/// Store-level failure. Converted to a generic 500 at the API boundary;
/// the detail is logged server-side only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// True when the underlying error is a unique-constraint violation,
    /// e.g. a duplicate email or SKU.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Query(sqlx::Error::Database(db))
                if db.kind() == sqlx::error::ErrorKind::UniqueViolation
        )
    }

    /// True when the underlying error is a foreign-key violation,
    /// e.g. a product referencing an unknown category.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Query(sqlx::Error::Database(db))
                if db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Open a bounded connection pool against the given SQLite URL.
///
/// Foreign keys are enabled per connection so session rows cascade when a
/// user is removed.
pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(sqlx::Error::from)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
