use carechart_clinic::error::ClinicError;
use carechart_clinic::usecase::inquiry::{SubmitInquiryInput, SubmitInquiryUseCase};

use crate::helpers::MockInquiryRepo;

fn input(name: &str, email: &str, message: &str) -> SubmitInquiryInput {
    SubmitInquiryInput {
        name: name.to_owned(),
        email: email.to_owned(),
        message: message.to_owned(),
    }
}

#[tokio::test]
async fn should_store_trimmed_inquiry() {
    let repo = MockInquiryRepo::default();
    let inquiries = repo.inquiries_handle();
    let uc = SubmitInquiryUseCase { inquiries: repo };

    uc.execute(input(" Richard Webber ", "webber@example.com ", " Demo request "))
        .await
        .unwrap();

    let inquiries = inquiries.lock().unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].name, "Richard Webber");
    assert_eq!(inquiries[0].email, "webber@example.com");
    assert_eq!(inquiries[0].message, "Demo request");
}

#[tokio::test]
async fn should_reject_incomplete_inquiry() {
    let repo = MockInquiryRepo::default();
    let inquiries = repo.inquiries_handle();
    let uc = SubmitInquiryUseCase { inquiries: repo };

    for bad in [
        input("", "webber@example.com", "hi"),
        input("Richard", "   ", "hi"),
        input("Richard", "webber@example.com", ""),
        input("Richard", "not-an-email", "hi"),
    ] {
        let result = uc.execute(bad).await;
        assert!(matches!(result, Err(ClinicError::Validation(_))));
    }
    assert!(inquiries.lock().unwrap().is_empty());
}
