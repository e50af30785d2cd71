use carechart_clinic::error::ClinicError;
use carechart_clinic::usecase::survey::{SubmitSurveyInput, SubmitSurveyUseCase};
use carechart_domain::id::DoctorId;

use crate::helpers::MockSurveyRepo;

#[tokio::test]
async fn should_score_and_store_survey() {
    let owner = DoctorId::new();
    let repo = MockSurveyRepo::default();
    let responses = repo.responses_handle();
    let uc = SubmitSurveyUseCase { surveys: repo };

    let score = uc
        .execute(SubmitSurveyInput {
            owner,
            answers: vec![5, 1, 5, 1, 5, 1, 5, 1, 5, 1],
        })
        .await
        .unwrap();

    assert_eq!(score, 100.0);
    let responses = responses.lock().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].doctor_id, owner);
    assert_eq!(responses[0].answers, [5, 1, 5, 1, 5, 1, 5, 1, 5, 1]);
    assert_eq!(responses[0].sus_score, 100.0);
}

#[tokio::test]
async fn should_reject_invalid_answers_without_storing() {
    let repo = MockSurveyRepo::default();
    let responses = repo.responses_handle();
    let uc = SubmitSurveyUseCase { surveys: repo };

    for answers in [vec![3; 9], vec![3; 11], vec![3, 3, 3, 3, 3, 3, 3, 3, 3, 6]] {
        let result = uc
            .execute(SubmitSurveyInput {
                owner: DoctorId::new(),
                answers,
            })
            .await;
        assert!(
            matches!(result, Err(ClinicError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }
    assert!(responses.lock().unwrap().is_empty());
}
