// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_URL` | SQLite connection string | Required (startup aborts without it) |
//! | `DATABASE_MAX_CONNECTIONS` | Connection pool upper bound | `5` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `BCRYPT_COST` | Password hashing work factor | `12` |
//! | `ADMIN_EMAIL` / `ADMIN_PASSWORD` | Seed admin account (optional) | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the relational store connection string.
///
/// Absence is a fatal startup error, never a per-request failure.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable name for the pool's maximum connection count.
pub const DATABASE_MAX_CONNECTIONS_ENV: &str = "DATABASE_MAX_CONNECTIONS";

/// Default upper bound for the store connection pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3001;

/// Environment variable name overriding the bcrypt work factor.
pub const BCRYPT_COST_ENV: &str = "BCRYPT_COST";

/// Default bcrypt work factor. Deliberately expensive to slow brute force.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Environment variable names for the optional seed admin account,
/// upserted at startup when both are present.
pub const ADMIN_EMAIL_ENV: &str = "ADMIN_EMAIL";

/// Plain-text password for the seed admin account.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Fixed session lifetime in days. Expiry is absolute: there is no
/// sliding renewal.
pub const SESSION_TTL_DAYS: i64 = 7;
