use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::json;

use mindwell_audit::events::{Actor, AuditAction, AuditEvent};
use mindwell_chat::crisis::{CRISIS_HELPLINE, CRISIS_MESSAGE};
use mindwell_chat::rules::Topic;
use mindwell_chat::session::ChatSession;
use mindwell_core::models::assessment::AssessmentResult;
use mindwell_core::models::chat::{ChatInteraction, ChatMessage};
use mindwell_core::object_keys;
use mindwell_storage::state::save_record;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReplyRequest {
    pub message: String,
    /// The student's last locally stored assessment, if any.
    #[serde(default)]
    pub last_result: Option<AssessmentResult>,
}

#[derive(Serialize)]
pub struct CrisisNotice {
    message: &'static str,
    helpline: &'static str,
}

#[derive(Serialize)]
pub struct ReplyResponse {
    topic: Topic,
    reply: ChatMessage,
    /// Show the reply no earlier than this (simulated typing).
    deliver_at: jiff::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    crisis: Option<CrisisNotice>,
}

/// Answer one message. Stateless: the client keeps the transcript and the
/// crisis banner, the server only picks the reply.
pub async fn reply(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let now = jiff::Timestamp::now();
    let mut session = ChatSession::new(state.chat.clone(), req.last_result.as_ref(), now);
    let outcome = session.send(&req.message, now)?;
    session.deliver_due(outcome.reply_due_at);

    let reply = session
        .messages()
        .last()
        .cloned()
        .ok_or_else(|| ApiError::Internal("chat session produced no reply".to_string()))?;

    let crisis = if outcome.crisis_detected {
        AuditEvent::new(
            AuditAction::CrisisDetected,
            "chat_message",
            outcome.message_id.to_string(),
            Actor::Anonymous,
        )
        .emit();
        Some(CrisisNotice {
            message: CRISIS_MESSAGE,
            helpline: CRISIS_HELPLINE,
        })
    } else {
        None
    };

    Ok(Json(ReplyResponse {
        topic: outcome.reply_topic,
        reply,
        deliver_at: outcome.reply_due_at,
        crisis,
    }))
}

/// Record an anonymous end-of-session summary for analytics.
pub async fn record_interaction(
    State(state): State<AppState>,
    Json(interaction): Json<ChatInteraction>,
) -> Result<Json<ChatInteraction>, ApiError> {
    if interaction.message_count == 0 {
        return Err(ApiError::BadRequest(
            "interaction must contain at least one message".to_string(),
        ));
    }

    save_record(
        &state.s3,
        &state.bucket,
        &object_keys::chat_interaction(interaction.id),
        &interaction,
    )
    .await?;

    AuditEvent::new(
        AuditAction::ChatSessionRecorded,
        "chat_interaction",
        interaction.id.to_string(),
        Actor::Anonymous,
    )
    .with_details(json!({
        "message_count": interaction.message_count,
        "crisis_keywords_detected": interaction.crisis_keywords_detected,
    }))
    .emit();

    Ok(Json(interaction))
}
