use mindwell_core::models::assessment::{InstrumentKind, RiskLevel, RiskTier};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::instrument_for;

/// Inclusive upper bound of each tier below `Severe`. Shared by both
/// instruments; only the label wording differs.
const TIER_UPPER_BOUNDS: [(u32, RiskTier); 3] = [
    (4, RiskTier::Minimal),
    (9, RiskTier::Mild),
    (14, RiskTier::Moderate),
];

/// Outcome of classifying a total score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub instrument: InstrumentKind,
    pub score: u32,
    pub max_score: u32,
    pub tier: RiskTier,
    pub level: RiskLevel,
    /// e.g. "Moderate Anxiety".
    pub label: String,
}

impl Classification {
    pub fn next_steps(&self) -> &'static [&'static str] {
        self.level.next_steps()
    }
}

fn tier_for(score: u32) -> RiskTier {
    TIER_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::Severe)
}

/// Map a total score to its risk tier and label.
///
/// Scores above the instrument's maximum are rejected rather than clamped.
pub fn classify(instrument: InstrumentKind, score: u32) -> Result<Classification, InstrumentError> {
    let max_score = instrument_for(instrument).max_score();
    if score > max_score {
        return Err(InstrumentError::InvalidScore {
            instrument,
            score,
            max_score,
        });
    }

    let tier = tier_for(score);
    Ok(Classification {
        instrument,
        score,
        max_score,
        tier,
        level: tier.level(),
        label: format!("{} {}", tier.adjective(), instrument.condition()),
    })
}
