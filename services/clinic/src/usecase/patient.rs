use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use carechart_domain::attachment::{content_type, storage_key};
use carechart_domain::id::{DoctorId, PatientId};

use crate::domain::repository::{AttachmentStore, PatientRepository};
use crate::domain::types::{Patient, PatientFields, PatientSummary, Upload};
use crate::error::ClinicError;

/// Validate an upload and write it under a fresh owner-namespaced key. Every call gets
/// its own key, even for identical filenames.
async fn store_upload<A: AttachmentStore>(
    attachments: &A,
    owner: DoctorId,
    upload: Upload,
) -> Result<String, ClinicError> {
    let key = storage_key(
        owner,
        Uuid::now_v7(),
        &upload.filename,
        upload.bytes.len(),
    )?;
    attachments.put(&key, upload.bytes).await?;
    Ok(key)
}

/// Blob cleanup never fails the request.
async fn discard_blob<A: AttachmentStore>(attachments: &A, key: &str) {
    if let Err(e) = attachments.remove(key).await {
        tracing::warn!(key, error = %e, "failed to remove attachment");
    }
}

// ── List ─────────────────────────────────────────────────────────────────────

pub struct ListPatientsUseCase<P>
where
    P: PatientRepository,
{
    pub patients: P,
}

impl<P> ListPatientsUseCase<P>
where
    P: PatientRepository,
{
    pub async fn execute(&self, owner: DoctorId) -> Result<Vec<PatientSummary>, ClinicError> {
        let patients = self.patients.list_by_doctor(owner).await?;
        Ok(patients.into_iter().map(PatientSummary::from).collect())
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

pub struct CreatePatientInput {
    pub owner: DoctorId,
    pub fields: PatientFields,
    pub upload: Option<Upload>,
}

pub struct CreatePatientUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    pub patients: P,
    pub attachments: A,
}

impl<P, A> CreatePatientUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    pub async fn execute(&self, input: CreatePatientInput) -> Result<PatientId, ClinicError> {
        input.fields.validate()?;

        let report_image = match input.upload {
            Some(upload) => Some(store_upload(&self.attachments, input.owner, upload).await?),
            None => None,
        };

        let now = Utc::now();
        let patient = Patient {
            id: PatientId::new(),
            doctor_id: input.owner,
            fields: input.fields,
            report_image,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.patients.create(&patient).await {
            if let Some(key) = &patient.report_image {
                discard_blob(&self.attachments, key).await;
            }
            return Err(e);
        }

        tracing::info!(patient_id = %patient.id, doctor_id = %input.owner, "patient created");
        Ok(patient.id)
    }
}

// ── Get ──────────────────────────────────────────────────────────────────────

pub struct GetPatientUseCase<P>
where
    P: PatientRepository,
{
    pub patients: P,
}

impl<P> GetPatientUseCase<P>
where
    P: PatientRepository,
{
    pub async fn execute(&self, id: PatientId, owner: DoctorId) -> Result<Patient, ClinicError> {
        self.patients
            .find_owned(id, owner)
            .await?
            .ok_or(ClinicError::NotFoundOrForbidden)
    }
}

// ── Update ───────────────────────────────────────────────────────────────────

pub struct UpdatePatientInput {
    pub id: PatientId,
    pub owner: DoctorId,
    pub fields: PatientFields,
    pub upload: Option<Upload>,
}

pub struct UpdatePatientUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    pub patients: P,
    pub attachments: A,
}

impl<P, A> UpdatePatientUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    /// Overwrite every mutable field. Without a new upload the stored attachment is kept.
    ///
    /// The previous key is read before the write, so two concurrent updates that both
    /// replace the attachment can leave the intermediate blob orphaned.
    pub async fn execute(&self, input: UpdatePatientInput) -> Result<(), ClinicError> {
        input.fields.validate()?;

        let existing = self
            .patients
            .find_owned(input.id, input.owner)
            .await?
            .ok_or(ClinicError::NotFoundOrForbidden)?;

        let new_key = match input.upload {
            Some(upload) => Some(store_upload(&self.attachments, input.owner, upload).await?),
            None => None,
        };

        let updated = match self
            .patients
            .update_owned(input.id, input.owner, &input.fields, new_key.as_deref())
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClinicError::NotFoundOrForbidden),
            Err(e) => Err(e),
        };
        if let Err(e) = updated {
            if let Some(key) = &new_key {
                discard_blob(&self.attachments, key).await;
            }
            return Err(e);
        }

        if let (Some(new_key), Some(old_key)) = (&new_key, &existing.report_image) {
            if new_key != old_key {
                discard_blob(&self.attachments, old_key).await;
            }
        }

        tracing::info!(patient_id = %input.id, doctor_id = %input.owner, "patient updated");
        Ok(())
    }
}

// ── Delete ───────────────────────────────────────────────────────────────────

pub struct DeletePatientUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    pub patients: P,
    pub attachments: A,
}

impl<P, A> DeletePatientUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    /// Deleting a missing or foreign record is a silent no-op.
    pub async fn execute(&self, id: PatientId, owner: DoctorId) -> Result<(), ClinicError> {
        let Some(existing) = self.patients.find_owned(id, owner).await? else {
            return Ok(());
        };
        if !self.patients.delete_owned(id, owner).await? {
            return Ok(());
        }
        if let Some(key) = &existing.report_image {
            discard_blob(&self.attachments, key).await;
        }

        tracing::info!(patient_id = %id, doctor_id = %owner, "patient deleted");
        Ok(())
    }
}

// ── Report attachment ────────────────────────────────────────────────────────

pub struct PatientReport {
    pub content_type: &'static str,
    pub bytes: Bytes,
}

pub struct GetPatientReportUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    pub patients: P,
    pub attachments: A,
}

impl<P, A> GetPatientReportUseCase<P, A>
where
    P: PatientRepository,
    A: AttachmentStore,
{
    pub async fn execute(
        &self,
        id: PatientId,
        owner: DoctorId,
    ) -> Result<PatientReport, ClinicError> {
        let key = self
            .patients
            .find_owned(id, owner)
            .await?
            .and_then(|p| p.report_image)
            .ok_or(ClinicError::NotFoundOrForbidden)?;
        let bytes = self
            .attachments
            .get(&key)
            .await?
            .ok_or(ClinicError::NotFoundOrForbidden)?;
        Ok(PatientReport {
            content_type: content_type(&key),
            bytes,
        })
    }
}
