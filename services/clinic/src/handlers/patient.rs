use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Serialize;

use carechart_domain::attachment::AttachmentError;
use carechart_domain::id::PatientId;
use carechart_session::gate::DoctorSession;

use crate::domain::types::{Patient, PatientFields, PatientSummary, Upload};
use crate::error::ClinicError;
use crate::state::AppState;
use crate::usecase::patient::{
    CreatePatientInput, CreatePatientUseCase, DeletePatientUseCase, GetPatientReportUseCase,
    GetPatientUseCase, ListPatientsUseCase, UpdatePatientInput, UpdatePatientUseCase,
};

/// Multipart part carrying the report file.
pub const REPORT_FIELD: &str = "report_image";

// ── Form parsing ─────────────────────────────────────────────────────────────

fn form_error(e: MultipartError) -> ClinicError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AttachmentError::TooLarge.into()
    } else {
        ClinicError::validation(format!("malformed form: {}", e.body_text()))
    }
}

async fn read_patient_form(
    mut multipart: Multipart,
) -> Result<(PatientFields, Option<Upload>), ClinicError> {
    let mut text = HashMap::new();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == REPORT_FIELD {
            let filename = field.file_name().unwrap_or_default().to_owned();
            let bytes = field.bytes().await.map_err(form_error)?;
            // Browsers send an empty file part when nothing was picked.
            if !filename.is_empty() {
                upload = Some(Upload { filename, bytes });
            }
        } else {
            let value = field.text().await.map_err(form_error)?;
            text.insert(name, value);
        }
    }

    Ok((parse_patient_fields(&text)?, upload))
}

fn opt_text(form: &HashMap<String, String>, key: &str) -> Option<String> {
    form.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn opt_parse<T: FromStr>(
    form: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ClinicError> {
    opt_text(form, key)
        .map(|v| {
            v.parse()
                .map_err(|_| ClinicError::validation(format!("{key} is not a valid number")))
        })
        .transpose()
}

fn opt_date(
    form: &HashMap<String, String>,
    key: &str,
) -> Result<Option<NaiveDate>, ClinicError> {
    opt_text(form, key)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| ClinicError::validation(format!("{key} must be YYYY-MM-DD")))
        })
        .transpose()
}

/// Checkbox semantics: present and not "0", "false" or "off".
fn flag(form: &HashMap<String, String>, key: &str) -> bool {
    form.get(key).is_some_and(|v| {
        !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "off"
        )
    })
}

/// Build record fields from submitted text parts. Empty optional text becomes `None`.
pub fn parse_patient_fields(
    form: &HashMap<String, String>,
) -> Result<PatientFields, ClinicError> {
    Ok(PatientFields {
        full_name: opt_text(form, "full_name").unwrap_or_default(),
        age: opt_parse(form, "age")?,
        weight_kg: opt_parse(form, "weight_kg")?,
        height_cm: opt_parse(form, "height_cm")?,
        blood_type: opt_text(form, "blood_type"),
        phone: opt_text(form, "phone"),
        email: opt_text(form, "email"),
        address: opt_text(form, "address"),
        gender: opt_text(form, "gender").unwrap_or_default(),
        has_allergies: flag(form, "has_allergies"),
        has_diabetes: flag(form, "has_diabetes"),
        has_hypertension: flag(form, "has_hypertension"),
        has_heart_disease: flag(form, "has_heart_disease"),
        is_smoker: flag(form, "is_smoker"),
        date_of_birth: opt_date(form, "date_of_birth")?,
        admission_date: opt_date(form, "admission_date")?,
        last_visit_date: opt_date(form, "last_visit_date")?,
        medical_history: opt_text(form, "medical_history"),
        current_medications: opt_text(form, "current_medications"),
        diagnosis: opt_text(form, "diagnosis"),
        treatment_notes: opt_text(form, "treatment_notes"),
    })
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub display_name: String,
    pub patients: Vec<PatientSummary>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    session: DoctorSession,
) -> Result<Json<DashboardResponse>, ClinicError> {
    let usecase = ListPatientsUseCase {
        patients: state.patient_repo(),
    };
    let patients = usecase.execute(session.doctor_id).await?;
    Ok(Json(DashboardResponse {
        display_name: session.display_name,
        patients,
    }))
}

// ── POST /patients ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CreatePatientResponse {
    pub id: PatientId,
}

pub async fn create_patient(
    State(state): State<AppState>,
    session: DoctorSession,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatePatientResponse>), ClinicError> {
    let (fields, upload) = read_patient_form(multipart).await?;
    let usecase = CreatePatientUseCase {
        patients: state.patient_repo(),
        attachments: state.attachment_store(),
    };
    let id = usecase
        .execute(CreatePatientInput {
            owner: session.doctor_id,
            fields,
            upload,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CreatePatientResponse { id })))
}

// ── GET /patients/{id} ───────────────────────────────────────────────────────

pub async fn get_patient(
    State(state): State<AppState>,
    session: DoctorSession,
    Path(id): Path<PatientId>,
) -> Result<Json<Patient>, ClinicError> {
    let usecase = GetPatientUseCase {
        patients: state.patient_repo(),
    };
    Ok(Json(usecase.execute(id, session.doctor_id).await?))
}

// ── POST /patients/{id} ──────────────────────────────────────────────────────

pub async fn update_patient(
    State(state): State<AppState>,
    session: DoctorSession,
    Path(id): Path<PatientId>,
    multipart: Multipart,
) -> Result<StatusCode, ClinicError> {
    let (fields, upload) = read_patient_form(multipart).await?;
    let usecase = UpdatePatientUseCase {
        patients: state.patient_repo(),
        attachments: state.attachment_store(),
    };
    usecase
        .execute(UpdatePatientInput {
            id,
            owner: session.doctor_id,
            fields,
            upload,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /patients/{id}/delete ───────────────────────────────────────────────

pub async fn delete_patient(
    State(state): State<AppState>,
    session: DoctorSession,
    Path(id): Path<PatientId>,
) -> Result<StatusCode, ClinicError> {
    let usecase = DeletePatientUseCase {
        patients: state.patient_repo(),
        attachments: state.attachment_store(),
    };
    usecase.execute(id, session.doctor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /patients/{id}/report ────────────────────────────────────────────────

pub async fn get_patient_report(
    State(state): State<AppState>,
    session: DoctorSession,
    Path(id): Path<PatientId>,
) -> Result<impl IntoResponse, ClinicError> {
    let usecase = GetPatientReportUseCase {
        patients: state.patient_repo(),
        attachments: state.attachment_store(),
    };
    let report = usecase.execute(id, session.doctor_id).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, report.content_type)],
        report.bytes,
    ))
}
