//! mindwell-instruments
//!
//! Self-assessment screening questionnaires. Pure data and rules with no AWS
//! dependency. Defines the question sets, the Likert response table, total
//! scoring, and score-to-risk classification for each supported instrument.

pub mod error;
pub mod instruments;
pub mod risk;
pub mod scoring;
pub mod session;

use mindwell_core::models::assessment::InstrumentKind;

use error::InstrumentError;
use risk::Classification;
use scoring::{AnswerSet, Severity};

/// Trait implemented by each screening questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9").
    fn id(&self) -> &str {
        self.kind().id()
    }

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Screening title shown to students (e.g., "Depression Screening").
    fn title(&self) -> &str;

    fn description(&self) -> &str;

    fn kind(&self) -> InstrumentKind;

    /// Question prompts, in presentation order.
    fn questions(&self) -> &[&'static str];

    /// Highest attainable total: every question answered at the top level.
    fn max_score(&self) -> u32 {
        self.questions().len() as u32 * Severity::NearlyEveryDay.value()
    }

    /// Sum the answers. The answer set must cover every question exactly.
    fn score(&self, answers: &AnswerSet) -> Result<u32, InstrumentError> {
        scoring::total_score(self.kind(), self.questions().len(), answers)
    }

    fn classify(&self, score: u32) -> Result<Classification, InstrumentError> {
        risk::classify(self.kind(), score)
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
    ]
}

/// Look up an instrument by ID (`phq9`, `gad7`) or kind name.
pub fn get_instrument(id: &str) -> Option<&'static dyn Instrument> {
    InstrumentKind::from_id(id).map(instrument_for)
}

/// The instrument definition for a kind.
pub fn instrument_for(kind: InstrumentKind) -> &'static dyn Instrument {
    match kind {
        InstrumentKind::Depression => &instruments::phq9::Phq9,
        InstrumentKind::Anxiety => &instruments::gad7::Gad7,
    }
}
