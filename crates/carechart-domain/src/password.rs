//! Password strength policy and salted Argon2id hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`), which embed the per-user
//! random salt and the cost parameters, so verification needs nothing but the string.

use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::RngExt;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Symbols accepted as the "special character" of a strong password.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+=-?";

/// Salt length in bytes.
const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Strength predicate: at least 8 characters with an uppercase letter, a lowercase
/// letter, a digit and one symbol from [`PASSWORD_SYMBOLS`].
///
/// ```
/// use carechart_domain::password::is_strong_password;
///
/// assert!(is_strong_password("Secur3!pass"));
/// assert!(!is_strong_password("abcdefgh"));
/// ```
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// CPU- and memory-bound; call from a blocking context.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt_bytes: [u8; SALT_LEN] = rand::rng().random();
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string. A malformed stored hash never verifies.
pub fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("carechart-unknown-account").ok());

/// Build the fixed hash used by [`verify_against_dummy`]. Call once at startup so the
/// first unknown-email login does not also pay for hashing. Returns `false` if hashing
/// failed, in which case the dummy verification is skipped.
pub fn prepare_dummy_hash() -> bool {
    LazyLock::force(&DUMMY_HASH).is_some()
}

/// Run a full verification against a fixed hash and discard the result.
///
/// Used when no account matches a login email so that the unknown-email path costs the
/// same as a wrong-password path.
pub fn verify_against_dummy(password: &str) {
    if let Some(phc) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, phc);
    }
}
