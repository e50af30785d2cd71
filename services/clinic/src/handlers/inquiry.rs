use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::ClinicError;
use crate::state::AppState;
use crate::usecase::inquiry::{SubmitInquiryInput, SubmitInquiryUseCase};

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<StatusCode, ClinicError> {
    let usecase = SubmitInquiryUseCase {
        inquiries: state.inquiry_repo(),
    };
    usecase
        .execute(SubmitInquiryInput {
            name: body.name,
            email: body.email,
            message: body.message,
        })
        .await?;
    Ok(StatusCode::CREATED)
}
