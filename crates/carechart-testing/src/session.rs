//! Signed session cookies for tests.
//!
//! Protected routes sit behind the `DoctorSession` extractor. `MockSession` signs a real
//! session token with a test key so requests pass the gate without a login round-trip.

use http::{HeaderValue, header::COOKIE};
use uuid::Uuid;

use carechart_domain::id::DoctorId;
use carechart_session::cookie::SESSION_COOKIE;
use carechart_session::token::issue_session_token;

/// Secret shared by test servers and `MockSession`.
pub const TEST_SESSION_SECRET: &str = "carechart-test-session-secret";

/// A doctor identity to authenticate test requests as.
pub struct MockSession {
    pub doctor_id: DoctorId,
    pub display_name: String,
}

impl MockSession {
    pub fn new(doctor_id: DoctorId, display_name: &str) -> Self {
        Self {
            doctor_id,
            display_name: display_name.to_owned(),
        }
    }

    /// A session for a fixed, well-known doctor id.
    pub fn default_doctor() -> Self {
        Self::new(
            DoctorId(Uuid::parse_str("00000000-0000-0000-0000-00000000d0c1").unwrap()),
            "Test Doctor",
        )
    }

    /// `Cookie` header value carrying a token signed with [`TEST_SESSION_SECRET`].
    pub fn cookie(&self) -> HeaderValue {
        let (token, _) =
            issue_session_token(self.doctor_id, &self.display_name, TEST_SESSION_SECRET)
                .unwrap();
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap()
    }

    /// Header name to pair with [`MockSession::cookie`].
    pub fn header_name() -> http::HeaderName {
        COOKIE
    }
}
