//! HTTP-level tests against the real router. The database is disconnected, so these
//! cover the paths that are decided before any storage access: the session gate, input
//! validation and the health checks.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header::SET_COOKIE};
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use carechart_clinic::infra::attachment::LocalAttachmentStore;
use carechart_clinic::router::build_router;
use carechart_clinic::state::AppState;
use carechart_domain::id::DoctorId;
use carechart_session::cookie::SESSION_COOKIE;
use carechart_session::gate::SessionKey;
use carechart_session::token::issue_session_token;
use carechart_testing::session::{MockSession, TEST_SESSION_SECRET};

fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        session_key: SessionKey::new(TEST_SESSION_SECRET),
        cookie_domain: None,
        public_base_url: Arc::from("https://clinic.example.com"),
        attachments: LocalAttachmentStore::new(
            std::env::temp_dir().join("carechart-router-test"),
        ),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn patient_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("full_name", "Owen Hunt")
        .add_text("gender", "male")
        .add_text("age", "44")
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn healthz_is_always_ok() {
    let server = test_server();
    server.get("/healthz").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn readyz_reports_unavailable_database() {
    let server = test_server();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ── Session gate ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn protected_routes_require_session() {
    let server = test_server();
    let id = DoctorId::new();

    let responses = [
        server.get("/dashboard").await,
        server.get(&format!("/patients/{id}")).await,
        server.post(&format!("/patients/{id}/delete")).await,
        server.get(&format!("/patients/{id}/report")).await,
        server.get("/survey").await,
        server
            .post("/survey")
            .json(&json!({ "answers": [3, 3, 3, 3, 3, 3, 3, 3, 3, 3] }))
            .await,
        server.post("/patients").multipart(patient_form()).await,
    ];

    for response in responses {
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["kind"], "UNAUTHENTICATED");
    }
}

#[tokio::test]
async fn session_signed_with_another_key_is_rejected() {
    let server = test_server();
    let (token, _) =
        issue_session_token(DoctorId::new(), "Mallory", "not-the-server-key").unwrap();
    let forged = HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap();

    let response = server
        .get("/dashboard")
        .add_header(MockSession::header_name(), forged)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn survey_questions_are_served_to_signed_in_doctor() {
    let server = test_server();
    let session = MockSession::default_doctor();

    let response = server
        .get("/survey")
        .add_header(MockSession::header_name(), session.cookie())
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn survey_with_wrong_answer_count_is_rejected() {
    let server = test_server();
    let session = MockSession::default_doctor();

    let response = server
        .post("/survey")
        .add_header(MockSession::header_name(), session.cookie())
        .json(&json!({ "answers": [3, 3, 3, 3, 3, 3, 3, 3, 3] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn register_rejects_mismatched_and_weak_passwords() {
    let server = test_server();

    let mismatch = server
        .post("/register")
        .json(&json!({
            "full_name": "Jackson Avery",
            "email": "avery@example.com",
            "password": "Secur3!pass",
            "confirm_password": "Secur3!pas",
        }))
        .await;
    mismatch.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.json::<Value>()["kind"], "PASSWORD_MISMATCH");

    let weak = server
        .post("/register")
        .json(&json!({
            "full_name": "Jackson Avery",
            "email": "avery@example.com",
            "password": "abcdefgh",
            "confirm_password": "abcdefgh",
        }))
        .await;
    weak.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(weak.json::<Value>()["kind"], "WEAK_PASSWORD");
}

#[tokio::test]
async fn create_patient_rejects_missing_gender() {
    let server = test_server();
    let session = MockSession::default_doctor();

    let form = MultipartForm::new()
        .add_text("full_name", "Owen Hunt")
        .add_text("age", "44");
    let response = server
        .post("/patients")
        .add_header(MockSession::header_name(), session.cookie())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "invalid input: gender is required"
    );
}

#[tokio::test]
async fn create_patient_rejects_disallowed_attachment() {
    let server = test_server();
    let session = MockSession::default_doctor();

    let form = patient_form().add_part(
        "report_image",
        Part::bytes(b"MZ\x90\x00".as_slice()).file_name("payload.exe"),
    );
    let response = server
        .post("/patients")
        .add_header(MockSession::header_name(), session.cookie())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "invalid input: attachment type is not allowed"
    );
}

#[tokio::test]
async fn malformed_patient_id_is_rejected() {
    let server = test_server();
    let session = MockSession::default_doctor();

    server
        .get("/patients/not-a-uuid")
        .add_header(MockSession::header_name(), session.cookie())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_requires_all_fields() {
    let server = test_server();

    let response = server
        .post("/contact")
        .json(&json!({
            "name": "Arizona Robbins",
            "email": "robbins@example.com",
            "message": " ",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn logout_clears_cookie_with_or_without_session() {
    let server = test_server();
    let session = MockSession::default_doctor();

    let signed_in = server
        .post("/logout")
        .add_header(MockSession::header_name(), session.cookie())
        .await;
    let anonymous = server.post("/logout").await;

    for response in [signed_in, anonymous] {
        response.assert_status(StatusCode::NO_CONTENT);
        let cookie = response.header(SET_COOKIE);
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=;")), "got {cookie}");
        assert!(cookie.contains("Max-Age=0"), "got {cookie}");
    }
}
