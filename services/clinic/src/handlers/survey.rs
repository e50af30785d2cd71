use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use carechart_domain::survey::SUS_QUESTIONS;
use carechart_session::gate::DoctorSession;

use crate::error::ClinicError;
use crate::state::AppState;
use crate::usecase::survey::{SubmitSurveyInput, SubmitSurveyUseCase};

// ── GET /survey ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SurveyQuestionsResponse {
    pub questions: &'static [&'static str],
}

pub async fn survey_questions(_session: DoctorSession) -> Json<SurveyQuestionsResponse> {
    Json(SurveyQuestionsResponse {
        questions: &SUS_QUESTIONS,
    })
}

// ── POST /survey ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitSurveyRequest {
    /// Ratings in question order, 1..=5 each.
    pub answers: Vec<i32>,
}

#[derive(Serialize)]
pub struct SubmitSurveyResponse {
    pub sus_score: f64,
}

pub async fn submit_survey(
    State(state): State<AppState>,
    session: DoctorSession,
    Json(body): Json<SubmitSurveyRequest>,
) -> Result<(StatusCode, Json<SubmitSurveyResponse>), ClinicError> {
    let usecase = SubmitSurveyUseCase {
        surveys: state.survey_repo(),
    };
    let sus_score = usecase
        .execute(SubmitSurveyInput {
            owner: session.doctor_id,
            answers: body.answers,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(SubmitSurveyResponse { sus_score })))
}
