//! Password hashing
//!
//! Argon2id with a fresh random salt per call, serialized as a
//! self-contained PHC string (`$argon2id$v=19$m=...$<salt>$<hash>`), so the
//! digest carries its own salt and work-factor parameters. Verification
//! re-derives from the embedded salt; a structurally invalid digest is an
//! authentication failure, never an error.

use crate::{Error, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password into a self-contained salted digest
///
/// Two calls on the same input produce different digests (fresh salt).
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| Error::Password(e.to_string()))?;

    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored digest
///
/// Returns false for a wrong password or a malformed digest; never errors.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
