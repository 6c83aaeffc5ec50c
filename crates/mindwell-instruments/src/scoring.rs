use std::collections::BTreeMap;

use mindwell_core::models::assessment::InstrumentKind;
use serde::{Deserialize, Serialize};

use crate::error::InstrumentError;

/// How often a symptom was present over the past two weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Severity {
    NotAtAll = 0,
    SeveralDays = 1,
    MoreThanHalfTheDays = 2,
    NearlyEveryDay = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::NotAtAll,
        Severity::SeveralDays,
        Severity::MoreThanHalfTheDays,
        Severity::NearlyEveryDay,
    ];

    pub fn value(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::NotAtAll => "Not at all",
            Severity::SeveralDays => "Several days",
            Severity::MoreThanHalfTheDays => "More than half the days",
            Severity::NearlyEveryDay => "Nearly every day",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = InstrumentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Severity::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InstrumentError::InvalidAnswer(value))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity as u8
    }
}

/// One row of the response option table offered for every question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponseOption {
    pub value: u8,
    pub label: &'static str,
}

/// The four Likert options, lowest first.
pub fn response_options() -> [ResponseOption; 4] {
    Severity::ALL.map(|s| ResponseOption {
        value: s.into(),
        label: s.label(),
    })
}

/// Answers keyed by 0-based question index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: BTreeMap<usize, Severity>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from values listed in question order.
    pub fn from_values(values: &[u8]) -> Result<Self, InstrumentError> {
        let mut set = Self::new();
        for (index, &value) in values.iter().enumerate() {
            set.record(index, Severity::try_from(value)?);
        }
        Ok(set)
    }

    /// Set the answer for `index`, returning the one it replaced.
    pub fn record(&mut self, index: usize, severity: Severity) -> Option<Severity> {
        self.answers.insert(index, severity)
    }

    pub fn get(&self, index: usize) -> Option<Severity> {
        self.answers.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Severity)> + '_ {
        self.answers.iter().map(|(&i, &s)| (i, s))
    }
}

/// Sum an answer set for an instrument with `question_count` questions.
///
/// Keys must be exactly `0..question_count`.
pub fn total_score(
    instrument: InstrumentKind,
    question_count: usize,
    answers: &AnswerSet,
) -> Result<u32, InstrumentError> {
    if let Some((index, _)) = answers.iter().find(|(i, _)| *i >= question_count) {
        return Err(InstrumentError::UnknownQuestion {
            instrument,
            index,
            question_count,
        });
    }

    let missing: Vec<usize> = (0..question_count)
        .filter(|&i| answers.get(i).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(InstrumentError::IncompleteAnswers {
            instrument,
            missing,
        });
    }

    Ok(answers.iter().map(|(_, s)| s.value()).sum())
}
