//! The `DoctorSession` extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use http::StatusCode;
use http::request::Parts;

use carechart_domain::id::DoctorId;

use crate::cookie::SESSION_COOKIE;
use crate::token::validate_session_token;

/// HMAC key used to sign and verify session tokens. Services expose it through
/// `FromRef` on their state so the extractor can reach it.
#[derive(Clone)]
pub struct SessionKey(Arc<str>);

impl SessionKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An authenticated doctor, proven by a valid session cookie.
///
/// Protected handlers take this as a parameter; a request without a valid session never
/// reaches the handler body.
#[derive(Debug, Clone)]
pub struct DoctorSession {
    pub doctor_id: DoctorId,
    pub display_name: String,
    pub expires_at: u64,
}

/// Rejection for requests that fail the session gate. Always answers 401.
#[derive(Debug, thiserror::Error)]
pub enum SessionRejection {
    #[error("unauthenticated")]
    Missing,
    #[error("unauthenticated")]
    Invalid,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHENTICATED",
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for DoctorSession
where
    SessionKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    // Resolve synchronously and hand back a 'static future; `async fn` here would capture
    // the borrowed parts and state.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = SessionKey::from_ref(state);
        let token = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty());

        let result = match token {
            None => Err(SessionRejection::Missing),
            Some(token) => validate_session_token(&token, key.as_str())
                .map(|info| Self {
                    doctor_id: info.doctor_id,
                    display_name: info.display_name,
                    expires_at: info.expires_at,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "session rejected");
                    SessionRejection::Invalid
                }),
        };

        async move { result }
    }
}
