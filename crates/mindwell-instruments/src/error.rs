use mindwell_core::error::CoreError;
use mindwell_core::models::assessment::InstrumentKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("answer value {0} is not one of the four response levels (0-3)")]
    InvalidAnswer(u8),

    #[error("question {index} does not exist on {instrument:?} ({question_count} questions)")]
    UnknownQuestion {
        instrument: InstrumentKind,
        index: usize,
        question_count: usize,
    },

    #[error("{instrument:?} assessment is missing answers for questions {missing:?}")]
    IncompleteAnswers {
        instrument: InstrumentKind,
        missing: Vec<usize>,
    },

    #[error("score {score} is outside 0..={max_score} for {instrument:?}")]
    InvalidScore {
        instrument: InstrumentKind,
        score: u32,
        max_score: u32,
    },

    #[error("question {0} must be answered before continuing")]
    Unanswered(usize),

    #[error("assessment already completed")]
    AlreadyComplete,

    #[error("could not persist result: {0}")]
    Store(#[from] CoreError),
}
