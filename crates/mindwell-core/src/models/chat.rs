use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Media attached to a chat message (e.g. a guided breathing clip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MediaRef {
    pub url: String,
    pub mime_type: Option<String>,
}

/// A single message in a support chat session. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub created_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, created_at: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            text: text.into(),
            created_at,
            suggestions: Vec::new(),
            media: None,
        }
    }

    pub fn assistant(
        text: impl Into<String>,
        suggestions: Vec<String>,
        created_at: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            text: text.into(),
            created_at,
            suggestions,
            media: None,
        }
    }
}

/// Anonymous summary of one chat session, stored for analytics.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatInteraction {
    pub id: Uuid,
    pub message_count: u32,
    pub crisis_keywords_detected: bool,
    pub session_duration_minutes: u32,
    pub created_at: jiff::Timestamp,
}
