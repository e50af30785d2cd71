use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
    sea_query::Expr,
};

use carechart_clinic_schema::{
    contact_inquiries, doctors, patients, reset_mails, sus_responses,
};
use carechart_domain::id::{DoctorId, PatientId};

use crate::domain::repository::{
    DoctorRepository, InquiryRepository, PatientRepository, SurveyRepository,
};
use crate::domain::types::{
    Doctor, Inquiry, Patient, PatientFields, ResetMail, SurveyResponse,
};
use crate::error::ClinicError;

// ── Doctor repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDoctorRepository {
    pub db: DatabaseConnection,
}

impl DoctorRepository for DbDoctorRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, ClinicError> {
        let model = doctors::Entity::find()
            .filter(doctors::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find doctor by email")?;
        Ok(model.map(doctor_from_model))
    }

    async fn create(&self, doctor: &Doctor) -> Result<(), ClinicError> {
        let result = doctors::ActiveModel {
            id: Set(doctor.id.0),
            full_name: Set(doctor.full_name.clone()),
            email: Set(doctor.email.clone()),
            password_hash: Set(doctor.password_hash.clone()),
            specialty: Set(doctor.specialty.clone()),
            phone: Set(doctor.phone.clone()),
            reset_token: Set(None),
            created_at: Set(doctor.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ClinicError::DuplicateEmail),
            Err(e) => Err(anyhow::Error::new(e).context("create doctor").into()),
        }
    }

    async fn set_reset_token(
        &self,
        doctor_id: DoctorId,
        token: &str,
        mail: &ResetMail,
    ) -> Result<(), ClinicError> {
        let token = token.to_owned();
        let mail = mail.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    doctors::ActiveModel {
                        id: Set(doctor_id.0),
                        reset_token: Set(Some(token)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    queue_reset_mail(txn, &mail).await?;
                    Ok(())
                })
            })
            .await
            .context("set reset token")?;
        Ok(())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Doctor>, ClinicError> {
        let model = doctors::Entity::find()
            .filter(doctors::Column::ResetToken.eq(token))
            .one(&self.db)
            .await
            .context("find doctor by reset token")?;
        Ok(model.map(doctor_from_model))
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, ClinicError> {
        // The token predicate and both writes land in one statement, so two concurrent
        // consumers cannot both see the token.
        let result = doctors::Entity::update_many()
            .col_expr(doctors::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(doctors::Column::ResetToken, Expr::value(Option::<String>::None))
            .filter(doctors::Column::ResetToken.eq(token))
            .exec(&self.db)
            .await
            .context("consume reset token")?;
        Ok(result.rows_affected > 0)
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

async fn queue_reset_mail(txn: &DatabaseTransaction, mail: &ResetMail) -> Result<(), DbErr> {
    reset_mails::ActiveModel {
        id: Set(mail.id),
        doctor_id: Set(mail.doctor_id.0),
        recipient: Set(mail.recipient.clone()),
        recipient_name: Set(mail.recipient_name.clone()),
        reset_link: Set(mail.reset_link.clone()),
        created_at: Set(mail.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn doctor_from_model(model: doctors::Model) -> Doctor {
    Doctor {
        id: DoctorId(model.id),
        full_name: model.full_name,
        email: model.email,
        password_hash: model.password_hash,
        specialty: model.specialty,
        phone: model.phone,
        reset_token: model.reset_token,
        created_at: model.created_at,
    }
}

// ── Patient repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPatientRepository {
    pub db: DatabaseConnection,
}

impl PatientRepository for DbPatientRepository {
    async fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Patient>, ClinicError> {
        let models = patients::Entity::find()
            .filter(patients::Column::DoctorId.eq(doctor_id.0))
            .order_by_desc(patients::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list patients by doctor")?;
        Ok(models.into_iter().map(patient_from_model).collect())
    }

    async fn create(&self, patient: &Patient) -> Result<(), ClinicError> {
        let mut model = fields_active_model(&patient.fields);
        model.id = Set(patient.id.0);
        model.doctor_id = Set(patient.doctor_id.0);
        model.report_image = Set(patient.report_image.clone());
        model.created_at = Set(patient.created_at);
        model.updated_at = Set(patient.updated_at);
        model.insert(&self.db).await.context("create patient")?;
        Ok(())
    }

    async fn find_owned(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
    ) -> Result<Option<Patient>, ClinicError> {
        let model = patients::Entity::find_by_id(id.0)
            .filter(patients::Column::DoctorId.eq(doctor_id.0))
            .one(&self.db)
            .await
            .context("find owned patient")?;
        Ok(model.map(patient_from_model))
    }

    async fn update_owned(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
        fields: &PatientFields,
        report_image: Option<&str>,
    ) -> Result<bool, ClinicError> {
        let mut model = fields_active_model(fields);
        model.updated_at = Set(Utc::now());
        if let Some(key) = report_image {
            model.report_image = Set(Some(key.to_owned()));
        }
        let result = patients::Entity::update_many()
            .set(model)
            .filter(patients::Column::Id.eq(id.0))
            .filter(patients::Column::DoctorId.eq(doctor_id.0))
            .exec(&self.db)
            .await
            .context("update owned patient")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_owned(&self, id: PatientId, doctor_id: DoctorId) -> Result<bool, ClinicError> {
        let result = patients::Entity::delete_many()
            .filter(patients::Column::Id.eq(id.0))
            .filter(patients::Column::DoctorId.eq(doctor_id.0))
            .exec(&self.db)
            .await
            .context("delete owned patient")?;
        Ok(result.rows_affected > 0)
    }
}

/// Active model with every mutable column set and the identity/bookkeeping columns left unset.
fn fields_active_model(fields: &PatientFields) -> patients::ActiveModel {
    patients::ActiveModel {
        id: NotSet,
        doctor_id: NotSet,
        full_name: Set(fields.full_name.clone()),
        age: Set(fields.age),
        weight_kg: Set(fields.weight_kg),
        height_cm: Set(fields.height_cm),
        blood_type: Set(fields.blood_type.clone()),
        phone: Set(fields.phone.clone()),
        email: Set(fields.email.clone()),
        address: Set(fields.address.clone()),
        gender: Set(fields.gender.clone()),
        has_allergies: Set(fields.has_allergies),
        has_diabetes: Set(fields.has_diabetes),
        has_hypertension: Set(fields.has_hypertension),
        has_heart_disease: Set(fields.has_heart_disease),
        is_smoker: Set(fields.is_smoker),
        date_of_birth: Set(fields.date_of_birth),
        admission_date: Set(fields.admission_date),
        last_visit_date: Set(fields.last_visit_date),
        medical_history: Set(fields.medical_history.clone()),
        current_medications: Set(fields.current_medications.clone()),
        diagnosis: Set(fields.diagnosis.clone()),
        treatment_notes: Set(fields.treatment_notes.clone()),
        report_image: NotSet,
        created_at: NotSet,
        updated_at: NotSet,
    }
}

fn patient_from_model(model: patients::Model) -> Patient {
    Patient {
        id: PatientId(model.id),
        doctor_id: DoctorId(model.doctor_id),
        fields: PatientFields {
            full_name: model.full_name,
            age: model.age,
            weight_kg: model.weight_kg,
            height_cm: model.height_cm,
            blood_type: model.blood_type,
            phone: model.phone,
            email: model.email,
            address: model.address,
            gender: model.gender,
            has_allergies: model.has_allergies,
            has_diabetes: model.has_diabetes,
            has_hypertension: model.has_hypertension,
            has_heart_disease: model.has_heart_disease,
            is_smoker: model.is_smoker,
            date_of_birth: model.date_of_birth,
            admission_date: model.admission_date,
            last_visit_date: model.last_visit_date,
            medical_history: model.medical_history,
            current_medications: model.current_medications,
            diagnosis: model.diagnosis,
            treatment_notes: model.treatment_notes,
        },
        report_image: model.report_image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Survey repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSurveyRepository {
    pub db: DatabaseConnection,
}

impl SurveyRepository for DbSurveyRepository {
    async fn create(&self, response: &SurveyResponse) -> Result<(), ClinicError> {
        let q = response.answers.map(i16::from);
        sus_responses::ActiveModel {
            id: Set(response.id),
            doctor_id: Set(response.doctor_id.0),
            q1: Set(q[0]),
            q2: Set(q[1]),
            q3: Set(q[2]),
            q4: Set(q[3]),
            q5: Set(q[4]),
            q6: Set(q[5]),
            q7: Set(q[6]),
            q8: Set(q[7]),
            q9: Set(q[8]),
            q10: Set(q[9]),
            sus_score: Set(response.sus_score),
            created_at: Set(response.created_at),
        }
        .insert(&self.db)
        .await
        .context("create sus response")?;
        Ok(())
    }
}

// ── Inquiry repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInquiryRepository {
    pub db: DatabaseConnection,
}

impl InquiryRepository for DbInquiryRepository {
    async fn create(&self, inquiry: &Inquiry) -> Result<(), ClinicError> {
        contact_inquiries::ActiveModel {
            id: Set(inquiry.id),
            name: Set(inquiry.name.clone()),
            email: Set(inquiry.email.clone()),
            message: Set(inquiry.message.clone()),
            created_at: Set(inquiry.created_at),
        }
        .insert(&self.db)
        .await
        .context("create contact inquiry")?;
        Ok(())
    }
}
