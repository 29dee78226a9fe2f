//! Argon2id password hashing and verification.
//!
//! A server-side pepper is appended to the password before hashing, so a
//! leaked database alone is not enough to brute-force hashes. Hashes are
//! stored as PHC strings with the salt and parameters embedded.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

fn peppered(password: &str, pepper: &str) -> String {
    format!("{password}{pepper}")
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str, pepper: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(peppered(password, pepper).as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch and `Err` only for a malformed hash.
pub fn verify_password(
    password: &str,
    pepper: &str,
    hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(peppered(password, pepper).as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
