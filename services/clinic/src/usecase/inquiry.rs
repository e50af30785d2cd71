use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::InquiryRepository;
use crate::domain::types::Inquiry;
use crate::error::ClinicError;

pub struct SubmitInquiryInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub struct SubmitInquiryUseCase<I>
where
    I: InquiryRepository,
{
    pub inquiries: I,
}

impl<I> SubmitInquiryUseCase<I>
where
    I: InquiryRepository,
{
    pub async fn execute(&self, input: SubmitInquiryInput) -> Result<(), ClinicError> {
        let name = input.name.trim();
        let email = input.email.trim();
        let message = input.message.trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ClinicError::validation("name, email and message are required"));
        }
        if !email.contains('@') {
            return Err(ClinicError::validation("email is invalid"));
        }

        self.inquiries
            .create(&Inquiry {
                id: Uuid::now_v7(),
                name: name.to_owned(),
                email: email.to_owned(),
                message: message.to_owned(),
                created_at: Utc::now(),
            })
            .await
    }
}
