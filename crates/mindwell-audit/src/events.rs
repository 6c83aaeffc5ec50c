use serde::Serialize;
use tracing::{info, warn};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AssessmentCompleted,
    CrisisDetected,
    ChatSessionRecorded,
    ResourceFeedback,
    ForumPostCreated,
    BookingConfirmed,
    AnalyticsViewed,
    AnalyticsExported,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssessmentCompleted => "assessment_completed",
            Self::CrisisDetected => "crisis_detected",
            Self::ChatSessionRecorded => "chat_session_recorded",
            Self::ResourceFeedback => "resource_feedback",
            Self::ForumPostCreated => "forum_post_created",
            Self::BookingConfirmed => "booking_confirmed",
            Self::AnalyticsViewed => "analytics_viewed",
            Self::AnalyticsExported => "analytics_exported",
        }
    }
}

/// Who did it. Student-facing actions are anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "sub")]
pub enum Actor {
    Anonymous,
    User(String),
}

impl Actor {
    fn label(&self) -> &str {
        match self {
            Actor::Anonymous => "anonymous",
            Actor::User(sub) => sub,
        }
    }
}

/// A structured audit event. Never carries free text written by a student.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub actor: Actor,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        actor: Actor,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit via tracing. Crisis detections log at `warn`.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();

        if self.action == AuditAction::CrisisDetected {
            warn!(
                target: "audit",
                {
                    audit.action = self.action.as_str(),
                    audit.resource_type = %self.resource_type,
                    audit.resource_id = %self.resource_id,
                    audit.actor = self.actor.label(),
                audit.details = %details,
                },
                "audit event"
            );
        } else {
            info!(
                target: "audit",
                {
                    audit.action = self.action.as_str(),
                    audit.resource_type = %self.resource_type,
                    audit.resource_id = %self.resource_id,
                    audit.actor = self.actor.label(),
                audit.details = %details,
                },
                "audit event"
            );
        }
    }
}
