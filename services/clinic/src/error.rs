use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use carechart_domain::attachment::AttachmentError;
use carechart_domain::survey::SurveyError;

/// Clinic service error variants.
///
/// Requests that fail the session gate never get this far; they are answered by
/// `carechart_session::gate::SessionRejection` with the `UNAUTHENTICATED` kind.
#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(
        "password must be at least 8 characters long and include uppercase, lowercase, number and special character"
    )]
    WeakPassword,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired reset link")]
    InvalidOrExpiredToken,
    #[error("patient not found or access denied")]
    NotFoundOrForbidden,
    #[error("email not found")]
    DoctorNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ClinicError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOrExpiredToken => "INVALID_OR_EXPIRED_TOKEN",
            Self::NotFoundOrForbidden => "NOT_FOUND_OR_FORBIDDEN",
            Self::DoctorNotFound => "DOCTOR_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<AttachmentError> for ClinicError {
    fn from(e: AttachmentError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<SurveyError> for ClinicError {
    fn from(e: SurveyError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl IntoResponse for ClinicError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::PasswordMismatch | Self::WeakPassword => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidOrExpiredToken => StatusCode::UNAUTHORIZED,
            Self::NotFoundOrForbidden | Self::DoctorNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s are logged here; TraceLayer already records every request's status.
        // The anyhow chain goes to the log, never into the response body.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
