//! Crisis keyword detection.
//!
//! Plain case-insensitive substring matching with no tokenization or
//! stemming. False positives are acceptable; false negatives are not.

use tracing::warn;

use crate::rules::contains_any;

pub static CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "hopeless",
    "worthless",
    "die",
];

pub const CRISIS_HELPLINE: &str = "1-800-273-8255";

pub const CRISIS_MESSAGE: &str =
    "Crisis Support Available: If you're having thoughts of self-harm, please reach out immediately.";

/// True if `text` contains any crisis keyword.
pub fn detect_crisis(text: &str) -> bool {
    contains_any(&text.to_lowercase(), CRISIS_KEYWORDS)
}

/// Session-scoped crisis flag. Latches on the first detection and stays set
/// for the rest of the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisMonitor {
    flagged: bool,
}

impl CrisisMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one message. Returns whether this message matched.
    pub fn observe(&mut self, text: &str) -> bool {
        let detected = detect_crisis(text);
        if detected {
            if !self.flagged {
                warn!("crisis keywords detected, raising crisis banner");
            }
            self.flagged = true;
        }
        detected
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}
