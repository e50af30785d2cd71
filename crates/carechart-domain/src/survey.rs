//! System Usability Scale (SUS) questionnaire scoring.

/// Number of SUS questions.
pub const SUS_QUESTION_COUNT: usize = 10;

/// The ten standard SUS statements, in order. Odd positions are positively worded,
/// even positions negatively worded.
pub const SUS_QUESTIONS: [&str; SUS_QUESTION_COUNT] = [
    "I think that I would like to use this system frequently.",
    "I found the system unnecessarily complex.",
    "I thought the system was easy to use.",
    "I think that I would need the support of a technical person to be able to use this system.",
    "I found the various functions in this system were well integrated.",
    "I thought there was too much inconsistency in this system.",
    "I would imagine that most people would learn to use this system very quickly.",
    "I found the system very cumbersome to use.",
    "I felt very confident using the system.",
    "I needed to learn a lot of things before I could get going with this system.",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    #[error("expected 10 answers, got {0}")]
    WrongCount(usize),
    #[error("answer {position} must be between 1 and 5")]
    OutOfRange { position: usize },
}

/// Ten validated ratings, each in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SusAnswers([u8; SUS_QUESTION_COUNT]);

impl SusAnswers {
    pub fn new(answers: &[i32]) -> Result<Self, SurveyError> {
        if answers.len() != SUS_QUESTION_COUNT {
            return Err(SurveyError::WrongCount(answers.len()));
        }
        let mut out = [0u8; SUS_QUESTION_COUNT];
        for (idx, &answer) in answers.iter().enumerate() {
            if !(1..=5).contains(&answer) {
                return Err(SurveyError::OutOfRange { position: idx + 1 });
            }
            out[idx] = answer as u8;
        }
        Ok(Self(out))
    }

    pub fn as_array(&self) -> &[u8; SUS_QUESTION_COUNT] {
        &self.0
    }

    /// Odd (1-indexed) positions contribute `rating - 1`, even positions `5 - rating`;
    /// the sum is scaled by 2.5 onto 0..=100.
    pub fn score(&self) -> f64 {
        let raw: u32 = self
            .0
            .iter()
            .enumerate()
            .map(|(idx, &rating)| {
                let rating = u32::from(rating);
                if idx % 2 == 0 { rating - 1 } else { 5 - rating }
            })
            .sum();
        f64::from(raw) * 2.5
    }
}
