//! Keyword-triggered reply selection.
//!
//! A [`RuleTable`] is an ordered list of `(triggers, bundle)` records ending
//! in a fallback. [`RuleTable::select`] lower-cases the input and returns the
//! bundle of the first rule with a trigger contained in it.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::ChatError;

/// Conversation topic a bundle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Anxiety,
    Stress,
    LowMood,
    Sleep,
    Breathing,
    General,
}

/// A canned reply plus suggested follow-up chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseBundle {
    pub topic: Topic,
    pub text: &'static str,
    pub suggestions: &'static [&'static str],
}

impl ResponseBundle {
    pub fn suggestion_list(&self) -> Vec<String> {
        self.suggestions.iter().map(|s| s.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationRule {
    /// Lower-case substrings. An empty set always matches.
    pub triggers: &'static [&'static str],
    pub bundle: ResponseBundle,
}

impl ConversationRule {
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.is_empty() || contains_any(lowered, self.triggers)
    }

    fn is_fallback(&self) -> bool {
        self.triggers.is_empty()
    }
}

pub(crate) fn contains_any(lowered: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| lowered.contains(n))
}

/// Ordered rules with a guaranteed fallback, so every input gets exactly
/// one bundle.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<ConversationRule>,
    fallback: ResponseBundle,
}

impl RuleTable {
    /// Build a table. The last rule must have an empty trigger set and must
    /// be the only such rule.
    pub fn new(mut rules: Vec<ConversationRule>) -> Result<Self, ChatError> {
        let fallback = match rules.pop() {
            Some(rule) if rule.is_fallback() => rule.bundle,
            _ => return Err(ChatError::MissingFallback),
        };
        if let Some(index) = rules.iter().position(ConversationRule::is_fallback) {
            return Err(ChatError::UnreachableRule(index + 1));
        }
        Ok(Self { rules, fallback })
    }

    /// First matching bundle for `text`, or the fallback.
    pub fn select(&self, text: &str) -> &ResponseBundle {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| &rule.bundle)
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &ResponseBundle {
        &self.fallback
    }
}

pub const GREETING: ResponseBundle = ResponseBundle {
    topic: Topic::Greeting,
    text: "Hi there! I'm here to provide you with some helpful coping strategies and support. How are you feeling today?",
    suggestions: &[
        "I'm feeling anxious",
        "I'm stressed about studies",
        "I'm feeling low",
        "I can't sleep well",
    ],
};

pub const ANXIETY: ResponseBundle = ResponseBundle {
    topic: Topic::Anxiety,
    text: "I understand that feeling anxious can be overwhelming. Let's try a simple breathing exercise together. Would you like me to guide you through it?",
    suggestions: &[
        "Yes, let's try breathing",
        "What other techniques help?",
        "Tell me about mindfulness",
    ],
};

pub const STRESS: ResponseBundle = ResponseBundle {
    topic: Topic::Stress,
    text: "Study stress is very common among students. Here are some strategies that might help: taking regular breaks, organizing your schedule, and practicing self-care. Which would you like to explore?",
    suggestions: &[
        "Study techniques",
        "Time management",
        "Self-care tips",
        "Taking breaks",
    ],
};

pub const LOW_MOOD: ResponseBundle = ResponseBundle {
    topic: Topic::LowMood,
    text: "I hear that you're going through a difficult time. It's important to know that you're not alone. Small steps can make a big difference. Would you like some gentle suggestions?",
    suggestions: &[
        "Daily routine tips",
        "Mood boosting activities",
        "Talk to someone",
        "Professional help",
    ],
};

pub const SLEEP: ResponseBundle = ResponseBundle {
    topic: Topic::Sleep,
    text: "Good sleep is crucial for mental health. Here are some sleep hygiene tips: consistent bedtime, limiting screen time before bed, creating a calm environment. What's your biggest sleep challenge?",
    suggestions: &[
        "Can't fall asleep",
        "Wake up frequently",
        "Sleep schedule is off",
        "Racing thoughts",
    ],
};

pub const BREATHING: ResponseBundle = ResponseBundle {
    topic: Topic::Breathing,
    text: "Great choice! Let's do the 4-7-8 breathing technique: Breathe in for 4 counts, hold for 7 counts, breathe out for 8 counts. Ready? Breathe in... 1, 2, 3, 4... Hold... 1, 2, 3, 4, 5, 6, 7... And out... 1, 2, 3, 4, 5, 6, 7, 8. How did that feel?",
    suggestions: &[
        "That helped!",
        "Can we do it again?",
        "What other techniques help?",
        "I feel calmer",
    ],
};

pub const GENERAL: ResponseBundle = ResponseBundle {
    topic: Topic::General,
    text: "Thank you for sharing that with me. I'm here to help. What specific area would you like support with today?",
    suggestions: &[
        "Stress management",
        "Anxiety help",
        "Sleep problems",
        "Feeling down",
        "Study tips",
    ],
};

static DEFAULT_RULES: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    rules: vec![
        ConversationRule {
            triggers: &["anxious", "anxiety", "worried"],
            bundle: ANXIETY,
        },
        ConversationRule {
            triggers: &["stress", "study", "exam"],
            bundle: STRESS,
        },
        ConversationRule {
            triggers: &["sad", "low", "depressed", "down"],
            bundle: LOW_MOOD,
        },
        ConversationRule {
            triggers: &["sleep", "tired", "insomnia"],
            bundle: SLEEP,
        },
        ConversationRule {
            triggers: &["breathing", "breath"],
            bundle: BREATHING,
        },
    ],
    fallback: GENERAL,
});

/// The built-in support chat rules.
pub fn default_rules() -> &'static RuleTable {
    &DEFAULT_RULES
}

/// Select a reply from the built-in rules.
pub fn select_response(text: &str) -> &'static ResponseBundle {
    default_rules().select(text)
}
