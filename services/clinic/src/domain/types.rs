use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use carechart_core::serde::to_rfc3339_ms;
use carechart_domain::id::{DoctorId, PatientId};
use carechart_domain::survey::SUS_QUESTION_COUNT;

use crate::error::ClinicError;

/// Oldest age accepted on a patient record.
pub const MAX_PATIENT_AGE: i32 = 150;

/// Doctor account. Root of data partitioning.
#[derive(Debug, Clone)]
pub struct Doctor {
    pub id: DoctorId,
    pub full_name: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    /// Single active reset token, if a reset was requested.
    pub reset_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Mutable part of a patient record, as submitted by the owning doctor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientFields {
    pub full_name: String,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gender: String,
    pub has_allergies: bool,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,
    pub is_smoker: bool,
    pub date_of_birth: Option<NaiveDate>,
    pub admission_date: Option<NaiveDate>,
    pub last_visit_date: Option<NaiveDate>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_notes: Option<String>,
}

impl PatientFields {
    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.full_name.trim().is_empty() {
            return Err(ClinicError::validation("full_name is required"));
        }
        if self.gender.trim().is_empty() {
            return Err(ClinicError::validation("gender is required"));
        }
        if let Some(age) = self.age {
            if !(0..=MAX_PATIENT_AGE).contains(&age) {
                return Err(ClinicError::validation("age must be between 0 and 150"));
            }
        }
        if self.weight_kg.is_some_and(|w| w.is_nan() || w <= 0.0) {
            return Err(ClinicError::validation("weight_kg must be positive"));
        }
        if self.height_cm.is_some_and(|h| h.is_nan() || h <= 0.0) {
            return Err(ClinicError::validation("height_cm must be positive"));
        }
        Ok(())
    }
}

/// Stored patient record.
#[derive(Debug, Clone, Serialize)]
pub struct Patient {
    pub id: PatientId,
    pub doctor_id: DoctorId,
    #[serde(flatten)]
    pub fields: PatientFields,
    /// Attachment storage key.
    pub report_image: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Dashboard row.
#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub id: PatientId,
    pub full_name: String,
    pub age: Option<i32>,
    pub gender: String,
    pub phone: Option<String>,
    pub last_visit_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
}

impl From<Patient> for PatientSummary {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            full_name: p.fields.full_name,
            age: p.fields.age,
            gender: p.fields.gender,
            phone: p.fields.phone,
            last_visit_date: p.fields.last_visit_date,
            diagnosis: p.fields.diagnosis,
        }
    }
}

/// A report file received with a create or update request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// One completed usability questionnaire.
#[derive(Debug, Clone)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub doctor_id: DoctorId,
    pub answers: [u8; SUS_QUESTION_COUNT],
    pub sus_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Contact-form submission. Not linked to any account.
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Reset-link mail queued for the relay.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetMail {
    pub id: Uuid,
    pub doctor_id: DoctorId,
    pub recipient: String,
    pub recipient_name: String,
    pub reset_link: String,
    pub created_at: DateTime<Utc>,
}
