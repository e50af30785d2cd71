use chrono::Utc;
use uuid::Uuid;

use carechart_domain::id::DoctorId;
use carechart_domain::survey::SusAnswers;

use crate::domain::repository::SurveyRepository;
use crate::domain::types::SurveyResponse;
use crate::error::ClinicError;

pub struct SubmitSurveyInput {
    pub owner: DoctorId,
    pub answers: Vec<i32>,
}

pub struct SubmitSurveyUseCase<S>
where
    S: SurveyRepository,
{
    pub surveys: S,
}

impl<S> SubmitSurveyUseCase<S>
where
    S: SurveyRepository,
{
    /// Score and store one questionnaire. Returns the SUS score.
    pub async fn execute(&self, input: SubmitSurveyInput) -> Result<f64, ClinicError> {
        let answers = SusAnswers::new(&input.answers)?;
        let response = SurveyResponse {
            id: Uuid::now_v7(),
            doctor_id: input.owner,
            answers: *answers.as_array(),
            sus_score: answers.score(),
            created_at: Utc::now(),
        };
        self.surveys.create(&response).await?;
        Ok(response.sus_score)
    }
}
