//! Signed session tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carechart_domain::id::DoctorId;

/// Session lifetime in seconds (8 hours).
pub const SESSION_TTL_SECS: u64 = 8 * 60 * 60;

/// Authenticated identity carried by a valid session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub doctor_id: DoctorId,
    pub display_name: String,
    pub expires_at: u64,
}

/// Errors returned by [`validate_session_token`] and [`issue_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
    #[error("malformed session token")]
    Malformed,
    #[error("session token encoding failed")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Session token claims.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | doctor id (UUID string) |
/// | `name` | custom | display name shown in the dashboard |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Issue a session token for a doctor. Returns the token and its expiry.
pub fn issue_session_token(
    doctor_id: DoctorId,
    display_name: &str,
    secret: &str,
) -> Result<(String, u64), SessionTokenError> {
    let exp = now_secs() + SESSION_TTL_SECS;
    let claims = SessionClaims {
        sub: doctor_id.to_string(),
        name: display_name.to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(SessionTokenError::Encode)?;
    Ok((token, exp))
}

/// Validate a session cookie value, returning the authenticated identity.
///
/// HS256, `exp` checked with the library's default 60s leeway, `exp` + `sub` required.
pub fn validate_session_token(
    token: &str,
    secret: &str,
) -> Result<SessionInfo, SessionTokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionTokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionTokenError::InvalidSignature,
        _ => SessionTokenError::Malformed,
    })?;

    let doctor_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| SessionTokenError::Malformed)?;
    Ok(SessionInfo {
        doctor_id: DoctorId(doctor_id),
        display_name: data.claims.name,
        expires_at: data.claims.exp,
    })
}
