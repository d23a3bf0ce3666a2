// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Authentication Module
//!
//! Session-based authentication for the storefront API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in and receives an opaque session token
//! 2. Client sends `Authorization: Bearer <token>` on each request
//! 3. Server:
//!    - Looks the token up in the session store
//!    - Checks expiry lazily and verifies the user still exists
//!    - Attaches the public profile to the request
//! 4. Role-gated routes additionally check the profile's role
//!
//! ## Security
//!
//! - Passwords are bcrypt-hashed with a per-call salt (work factor 12)
//! - Session tokens carry 256 bits of OS randomness
//! - Logout deletes the server-side record, so revocation is immediate

pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod session;

pub use error::AuthError;
pub use extractor::Auth;
pub use roles::Role;
pub use session::{Clock, SessionManager, ValidatedSession};

use crate::models::PublicUser;

/// Identity attached to a request after successful authentication.
///
/// Inserted into the request extensions by the `authenticate` middleware
/// and read by the role gate and the [`Auth`] extractor.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);
