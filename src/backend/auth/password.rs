/**
 * Password Hashing
 *
 * Argon2id hashing for stored credentials. Hashes are PHC strings
 * (`$argon2id$v=19$...`) carrying their own salt and parameters, so
 * `verify` needs nothing but the stored string.
 */

use argon2::password_hash::{Error as HashError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;

fn salt() -> Result<SaltString, HashError> {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    SaltString::encode_b64(&bytes)
}

/// Hash a plaintext password with a fresh random salt
///
/// Two calls with the same input return different strings; both verify.
pub fn hash(password: &str) -> Result<String, HashError> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt()?)
        .map(|hash| hash.to_string())
}

/// Check a plaintext password against a stored hash
///
/// Returns `false` for a wrong password and for a malformed hash string.
pub fn verify(password: &str, hashed: &str) -> bool {
    PasswordHash::new(hashed)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
