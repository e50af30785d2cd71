use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;

use carechart_core::health::healthz;
use carechart_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};
use carechart_domain::attachment::MAX_ATTACHMENT_BYTES;

use crate::handlers::{
    account::{check_reset_token, forgot_password, login, logout, register, reset_password},
    health::readyz,
    inquiry::submit_contact,
    patient::{
        create_patient, dashboard, delete_patient, get_patient, get_patient_report,
        update_patient,
    },
    survey::{submit_survey, survey_questions},
};
use crate::state::AppState;

/// Room for the text parts of a record form on top of the attachment itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route(
            "/reset-password/{token}",
            get(check_reset_token).post(reset_password),
        )
        // Records
        .route("/dashboard", get(dashboard))
        .route("/patients", post(create_patient))
        .route("/patients/{id}", get(get_patient).post(update_patient))
        .route("/patients/{id}/delete", post(delete_patient))
        .route("/patients/{id}/report", get(get_patient_report))
        // Survey + contact
        .route("/survey", get(survey_questions).post(submit_survey))
        .route("/contact", post(submit_contact))
        .layer(DefaultBodyLimit::max(MAX_ATTACHMENT_BYTES + FORM_OVERHEAD_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
