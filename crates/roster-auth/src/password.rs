//! Password hashing and verification

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::AuthError;

/// A syntactically valid Argon2 hash that no password can match.
///
/// The login flow verifies against this when the requested username does
/// not exist, so the hashing work is always performed and a missing user
/// is indistinguishable from a wrong password by response latency.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$cm9zdGVyLWR1bW15LXNhbHQ$AAAAAAAAAAAAAAAAAAAAAA";

/// Hash a password with a freshly generated salt.
///
/// Two calls with the same input produce different hashes.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password candidate against a stored hash.
///
/// Recomputes the hash with the salt embedded in `hash`; the comparison
/// cost is dominated by the Argon2 computation itself. A malformed stored
/// hash yields `Ok(false)` rather than an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return Ok(false);
    };

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
