#![allow(async_fn_in_trait)]

use bytes::Bytes;

use carechart_domain::id::{DoctorId, PatientId};

use crate::domain::types::{Doctor, Inquiry, Patient, PatientFields, ResetMail, SurveyResponse};
use crate::error::ClinicError;

/// Repository for doctor accounts and their reset tokens.
pub trait DoctorRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, ClinicError>;

    /// Insert a new account. Fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, doctor: &Doctor) -> Result<(), ClinicError>;

    /// Overwrite the doctor's reset token and queue its mail in one transaction.
    async fn set_reset_token(
        &self,
        doctor_id: DoctorId,
        token: &str,
        mail: &ResetMail,
    ) -> Result<(), ClinicError>;

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Doctor>, ClinicError>;

    /// Replace the password hash and clear the token in one conditional statement.
    /// Returns `false` if no account held the token.
    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, ClinicError>;
}

/// Repository for patient records. Every lookup is scoped by owner.
pub trait PatientRepository: Send + Sync {
    /// Owner's records, newest first.
    async fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Patient>, ClinicError>;

    async fn create(&self, patient: &Patient) -> Result<(), ClinicError>;

    async fn find_owned(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
    ) -> Result<Option<Patient>, ClinicError>;

    /// Overwrite mutable fields. `report_image` of `None` keeps the stored attachment.
    /// Returns `false` if the record does not exist for this owner.
    async fn update_owned(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
        fields: &PatientFields,
        report_image: Option<&str>,
    ) -> Result<bool, ClinicError>;

    /// Returns `true` if a row was deleted.
    async fn delete_owned(&self, id: PatientId, doctor_id: DoctorId) -> Result<bool, ClinicError>;
}

pub trait SurveyRepository: Send + Sync {
    async fn create(&self, response: &SurveyResponse) -> Result<(), ClinicError>;
}

pub trait InquiryRepository: Send + Sync {
    async fn create(&self, inquiry: &Inquiry) -> Result<(), ClinicError>;
}

/// Blob store for report attachments, keyed by storage key.
pub trait AttachmentStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), ClinicError>;

    async fn get(&self, key: &str) -> Result<Option<Bytes>, ClinicError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), ClinicError>;
}
