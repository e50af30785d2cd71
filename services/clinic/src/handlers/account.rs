use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use carechart_domain::id::DoctorId;
use carechart_session::cookie::{clear_session_cookie, set_session_cookie};

use crate::error::ClinicError;
use crate::state::AppState;
use crate::usecase::account::{
    CheckResetTokenUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /register ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: DoctorId,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ClinicError> {
    let usecase = RegisterUseCase {
        doctors: state.doctor_repo(),
    };
    let id = usecase
        .execute(RegisterInput {
            full_name: body.full_name,
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
            specialty: body.specialty,
            phone: body.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub doctor_id: DoctorId,
    pub display_name: String,
    pub expires_at: u64,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ClinicError> {
    let usecase = LoginUseCase {
        doctors: state.doctor_repo(),
        session_key: state.session_key.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, output.session_token, state.cookie_domain.clone());
    let body = LoginResponse {
        doctor_id: output.doctor_id,
        display_name: output.display_name,
        expires_at: output.expires_at,
    };
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── POST /logout ─────────────────────────────────────────────────────────────

/// Always succeeds, with or without a live session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        clear_session_cookie(jar, state.cookie_domain.clone()),
    )
}

// ── POST /forgot-password ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, ClinicError> {
    let usecase = RequestPasswordResetUseCase {
        doctors: state.doctor_repo(),
        public_base_url: state.public_base_url.to_string(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── GET|POST /reset-password/{token} ─────────────────────────────────────────

pub async fn check_reset_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, ClinicError> {
    let usecase = CheckResetTokenUseCase {
        doctors: state.doctor_repo(),
    };
    usecase.execute(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, ClinicError> {
    let usecase = ResetPasswordUseCase {
        doctors: state.doctor_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            token,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
