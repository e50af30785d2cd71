use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use carechart_session::gate::SessionKey;

use crate::infra::attachment::LocalAttachmentStore;
use crate::infra::db::{
    DbDoctorRepository, DbInquiryRepository, DbPatientRepository, DbSurveyRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_key: SessionKey,
    pub cookie_domain: Option<String>,
    pub public_base_url: Arc<str>,
    pub attachments: LocalAttachmentStore,
}

impl AppState {
    pub fn doctor_repo(&self) -> DbDoctorRepository {
        DbDoctorRepository {
            db: self.db.clone(),
        }
    }

    pub fn patient_repo(&self) -> DbPatientRepository {
        DbPatientRepository {
            db: self.db.clone(),
        }
    }

    pub fn survey_repo(&self) -> DbSurveyRepository {
        DbSurveyRepository {
            db: self.db.clone(),
        }
    }

    pub fn inquiry_repo(&self) -> DbInquiryRepository {
        DbInquiryRepository {
            db: self.db.clone(),
        }
    }

    pub fn attachment_store(&self) -> LocalAttachmentStore {
        self.attachments.clone()
    }
}

impl FromRef<AppState> for SessionKey {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
