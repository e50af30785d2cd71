//! Password-reset token generation.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;

/// Random bytes per reset token (256 bits of entropy).
pub const RESET_TOKEN_BYTES: usize = 32;

/// Generate a fresh URL-safe reset token.
pub fn generate_reset_token() -> String {
    let bytes: [u8; RESET_TOKEN_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the link a doctor follows to choose a new password.
pub fn reset_link(public_base_url: &str, token: &str) -> String {
    format!(
        "{}/reset-password/{token}",
        public_base_url.trim_end_matches('/')
    )
}
