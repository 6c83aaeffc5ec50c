//! Question-by-question assessment flow.
//!
//! An [`AssessmentSession`] tracks the current question and the answers so
//! far. Advancing past the last question scores and classifies the answers
//! and writes an [`AssessmentResult`] through the injected [`LocalStore`].

use mindwell_core::local_store::{self, LocalStore};
use mindwell_core::models::assessment::{AssessmentResult, InstrumentKind};
use tracing::info;

use crate::error::InstrumentError;
use crate::risk::Classification;
use crate::scoring::{AnswerSet, Severity};
use crate::{Instrument, instrument_for};

/// Result of advancing the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Moved on to the question at this index.
    Question(usize),
    /// The last question was answered; the result has been stored.
    Complete(AssessmentOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentOutcome {
    pub result: AssessmentResult,
    pub classification: Classification,
}

pub struct AssessmentSession<S> {
    instrument: &'static dyn Instrument,
    store: S,
    current: usize,
    answers: AnswerSet,
    outcome: Option<AssessmentOutcome>,
}

impl<S: LocalStore> AssessmentSession<S> {
    pub fn new(kind: InstrumentKind, store: S) -> Self {
        Self {
            instrument: instrument_for(kind),
            store,
            current: 0,
            answers: AnswerSet::new(),
            outcome: None,
        }
    }

    pub fn instrument(&self) -> &'static dyn Instrument {
        self.instrument
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &'static str {
        self.instrument.questions()[self.current]
    }

    pub fn question_count(&self) -> usize {
        self.instrument.questions().len()
    }

    /// Percent of the questionnaire reached, counting the current question.
    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / self.question_count() as f64 * 100.0
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        self.outcome.as_ref()
    }

    /// Answer (or re-answer) the current question.
    pub fn answer(&mut self, severity: Severity) -> Result<(), InstrumentError> {
        if self.outcome.is_some() {
            return Err(InstrumentError::AlreadyComplete);
        }
        self.answers.record(self.current, severity);
        Ok(())
    }

    /// Go back one question. A no-op on the first question.
    pub fn previous(&mut self) -> usize {
        if self.outcome.is_none() {
            self.current = self.current.saturating_sub(1);
        }
        self.current
    }

    /// Advance to the next question, or finish if this was the last one.
    pub fn next(&mut self, now: jiff::Timestamp) -> Result<Step, InstrumentError> {
        if self.outcome.is_some() {
            return Err(InstrumentError::AlreadyComplete);
        }
        if self.answers.get(self.current).is_none() {
            return Err(InstrumentError::Unanswered(self.current));
        }

        if self.current + 1 < self.question_count() {
            self.current += 1;
            return Ok(Step::Question(self.current));
        }

        let outcome = self.complete(now)?;
        Ok(Step::Complete(outcome))
    }

    fn complete(&mut self, now: jiff::Timestamp) -> Result<AssessmentOutcome, InstrumentError> {
        let score = self.instrument.score(&self.answers)?;
        let classification = self.instrument.classify(score)?;

        let result = AssessmentResult {
            instrument: self.instrument.kind(),
            score,
            max_score: classification.max_score,
            timestamp: now,
        };
        local_store::save(&self.store, &result)?;

        info!(
            instrument = self.instrument.id(),
            score,
            tier = ?classification.tier,
            "assessment completed"
        );

        let outcome = AssessmentOutcome {
            result,
            classification,
        };
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
