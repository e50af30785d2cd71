//! sea-orm entities for the clinic service.

pub mod contact_inquiries;
pub mod doctors;
pub mod patients;
pub mod reset_mails;
pub mod sus_responses;
