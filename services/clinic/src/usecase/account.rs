use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use carechart_domain::id::DoctorId;
use carechart_domain::password::{
    hash_password, is_strong_password, verify_against_dummy, verify_password,
};
use carechart_domain::reset_token::{generate_reset_token, reset_link};
use carechart_session::gate::SessionKey;
use carechart_session::token::issue_session_token;

use crate::domain::repository::DoctorRepository;
use crate::domain::types::{Doctor, ResetMail};
use crate::error::ClinicError;

/// Trim and lowercase an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn check_new_password(password: &str, confirm_password: &str) -> Result<(), ClinicError> {
    if password != confirm_password {
        return Err(ClinicError::PasswordMismatch);
    }
    if !is_strong_password(password) {
        return Err(ClinicError::WeakPassword);
    }
    Ok(())
}

// Argon2 runs on the blocking pool.
async fn hash_blocking(password: String) -> Result<String, ClinicError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join password hashing task")?
        .context("hash password")?;
    Ok(hash)
}

async fn verify_blocking(password: String, phc: Option<String>) -> Result<bool, ClinicError> {
    let verified = tokio::task::spawn_blocking(move || match phc {
        Some(phc) => verify_password(&password, &phc),
        None => {
            verify_against_dummy(&password);
            false
        }
    })
    .await
    .context("join password verification task")?;
    Ok(verified)
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
}

pub struct RegisterUseCase<D>
where
    D: DoctorRepository,
{
    pub doctors: D,
}

impl<D> RegisterUseCase<D>
where
    D: DoctorRepository,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<DoctorId, ClinicError> {
        let full_name = input.full_name.trim().to_owned();
        if full_name.is_empty() {
            return Err(ClinicError::validation("full_name is required"));
        }
        let email = normalize_email(&input.email);
        if !email.contains('@') {
            return Err(ClinicError::validation("email is invalid"));
        }
        check_new_password(&input.password, &input.confirm_password)?;

        let doctor = Doctor {
            id: DoctorId::new(),
            full_name,
            email,
            password_hash: hash_blocking(input.password).await?,
            specialty: non_empty(input.specialty),
            phone: non_empty(input.phone),
            reset_token: None,
            created_at: Utc::now(),
        };
        self.doctors.create(&doctor).await?;

        tracing::info!(doctor_id = %doctor.id, "doctor registered");
        Ok(doctor.id)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub doctor_id: DoctorId,
    pub display_name: String,
    pub session_token: String,
    pub expires_at: u64,
}

pub struct LoginUseCase<D>
where
    D: DoctorRepository,
{
    pub doctors: D,
    pub session_key: SessionKey,
}

impl<D> LoginUseCase<D>
where
    D: DoctorRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ClinicError> {
        let doctor = self
            .doctors
            .find_by_email(&normalize_email(&input.email))
            .await?;

        // Unknown email and wrong password take the same path and the same time.
        let phc = doctor.as_ref().map(|d| d.password_hash.clone());
        let verified = verify_blocking(input.password, phc).await?;
        let doctor = match doctor {
            Some(doctor) if verified => doctor,
            _ => return Err(ClinicError::InvalidCredentials),
        };

        let (session_token, expires_at) =
            issue_session_token(doctor.id, &doctor.full_name, self.session_key.as_str())
                .context("issue session token")?;

        tracing::info!(doctor_id = %doctor.id, "doctor logged in");
        Ok(LoginOutput {
            doctor_id: doctor.id,
            display_name: doctor.full_name,
            session_token,
            expires_at,
        })
    }
}

// ── Request password reset ───────────────────────────────────────────────────

pub struct RequestPasswordResetUseCase<D>
where
    D: DoctorRepository,
{
    pub doctors: D,
    pub public_base_url: String,
}

impl<D> RequestPasswordResetUseCase<D>
where
    D: DoctorRepository,
{
    /// Issue a new reset token for the account. The link is queued in `reset_mails` and
    /// delivered independently of this request.
    pub async fn execute(&self, email: &str) -> Result<(), ClinicError> {
        let doctor = self
            .doctors
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(ClinicError::DoctorNotFound)?;

        let token = generate_reset_token();
        let mail = ResetMail {
            id: Uuid::now_v7(),
            doctor_id: doctor.id,
            recipient: doctor.email,
            recipient_name: doctor.full_name,
            reset_link: reset_link(&self.public_base_url, &token),
            created_at: Utc::now(),
        };

        self.doctors.set_reset_token(doctor.id, &token, &mail).await?;

        tracing::info!(doctor_id = %doctor.id, "password reset requested");
        Ok(())
    }
}

// ── Check reset token ────────────────────────────────────────────────────────

pub struct CheckResetTokenUseCase<D>
where
    D: DoctorRepository,
{
    pub doctors: D,
}

impl<D> CheckResetTokenUseCase<D>
where
    D: DoctorRepository,
{
    pub async fn execute(&self, token: &str) -> Result<(), ClinicError> {
        if token.is_empty() {
            return Err(ClinicError::InvalidOrExpiredToken);
        }
        self.doctors
            .find_by_reset_token(token)
            .await?
            .map(|_| ())
            .ok_or(ClinicError::InvalidOrExpiredToken)
    }
}

// ── Reset password ───────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

pub struct ResetPasswordUseCase<D>
where
    D: DoctorRepository,
{
    pub doctors: D,
}

impl<D> ResetPasswordUseCase<D>
where
    D: DoctorRepository,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ClinicError> {
        if input.token.is_empty() || self.doctors.find_by_reset_token(&input.token).await?.is_none()
        {
            return Err(ClinicError::InvalidOrExpiredToken);
        }
        check_new_password(&input.password, &input.confirm_password)?;

        let hash = hash_blocking(input.password).await?;
        // A concurrent reset may have consumed the token since the lookup above.
        if !self.doctors.consume_reset_token(&input.token, &hash).await? {
            return Err(ClinicError::InvalidOrExpiredToken);
        }

        tracing::info!("password reset completed");
        Ok(())
    }
}
