use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::local_store::StoredRecord;

/// Which screening questionnaire an assessment used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentKind {
    /// PHQ-9.
    #[serde(alias = "phq9")]
    Depression,
    /// GAD-7.
    #[serde(alias = "gad7")]
    Anxiety,
}

impl InstrumentKind {
    /// Short instrument id used in URLs (`phq9`, `gad7`).
    pub fn id(self) -> &'static str {
        match self {
            InstrumentKind::Depression => "phq9",
            InstrumentKind::Anxiety => "gad7",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "phq9" | "depression" => Some(InstrumentKind::Depression),
            "gad7" | "anxiety" => Some(InstrumentKind::Anxiety),
            _ => None,
        }
    }

    /// Condition noun used in severity labels ("Mild Depression").
    pub fn condition(self) -> &'static str {
        match self {
            InstrumentKind::Depression => "Depression",
            InstrumentKind::Anxiety => "Anxiety",
        }
    }
}

/// Four-level severity classification of a total score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl RiskTier {
    /// Collapse to the three-band presentation level.
    pub fn level(self) -> RiskLevel {
        match self {
            RiskTier::Minimal => RiskLevel::Low,
            RiskTier::Mild | RiskTier::Moderate => RiskLevel::Moderate,
            RiskTier::Severe => RiskLevel::High,
        }
    }

    pub fn adjective(self) -> &'static str {
        match self {
            RiskTier::Minimal => "Minimal",
            RiskTier::Mild => "Mild",
            RiskTier::Moderate => "Moderate",
            RiskTier::Severe => "Severe",
        }
    }
}

/// Three-band risk level shown on results and the analytics dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Recommended next steps shown alongside a result.
    pub fn next_steps(self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => &[
                "Continue with your current wellness practices",
                "Explore our mindfulness resources",
                "Connect with our supportive community",
            ],
            RiskLevel::Moderate => &[
                "Consider speaking with a counselor",
                "Try our guided coping strategies",
                "Book a wellness session",
            ],
            RiskLevel::High => &[
                "We recommend speaking with a professional immediately",
                "Book an urgent counseling session",
                "Access crisis support resources",
            ],
        }
    }
}

/// The last completed assessment, kept on the user's device.
///
/// Written once when the final question is answered and replaced wholesale
/// by the next completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentResult {
    #[serde(rename = "type")]
    pub instrument: InstrumentKind,
    pub score: u32,
    pub max_score: u32,
    pub timestamp: jiff::Timestamp,
}

impl StoredRecord for AssessmentResult {
    const KEY: &'static str = "assessmentResults";
}

/// A completed assessment as stored remotely for aggregate analytics.
/// Carries no user identity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub instrument: InstrumentKind,
    pub score: u32,
    pub max_score: u32,
    pub tier: RiskTier,
    pub risk_level: RiskLevel,
    pub label: String,
    pub completed_at: jiff::Timestamp,
}
