// SPDX-License-Identifier: AGPL-3.0-or-later

//! One-way password hashing with bcrypt.
//!
//! The salt is generated per call, so hashing the same password twice
//! yields different strings that both verify. The work factor is fixed at
//! process start (default 12) and embedded in the produced hash.

use crate::error::ApiError;

/// Hash a plain-text password with a per-call random salt.
///
/// Fails only on an out-of-range cost parameter, which is a configuration
/// bug rather than a user error, so it surfaces as a generic 500.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, ApiError> {
    bcrypt::hash(plain, cost).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        ApiError::internal()
    })
}

/// Verify a plain-text password against a stored bcrypt hash.
///
/// A malformed hash is treated as a failed verification, not an error:
/// callers only ever see a yes/no answer.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the tests fast; production uses 12.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("my-secure-password", TEST_COST).unwrap();
        assert!(verify_password("my-secure-password", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("correct-password", TEST_COST).unwrap();
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let hash1 = hash_password("same-password", TEST_COST).unwrap();
        let hash2 = hash_password("same-password", TEST_COST).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password("same-password", &hash1));
        assert!(verify_password("same-password", &hash2));
    }

    #[test]
    fn malformed_hash_verifies_false_instead_of_erroring() {
        assert!(!verify_password("whatever", "not-a-bcrypt-hash"));
        assert!(!verify_password("whatever", ""));
    }
}
