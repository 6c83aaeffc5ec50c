//! Support chat session.
//!
//! Messages are append-only. Each user message gets exactly one assistant
//! reply, chosen from that message at send time and delivered after the
//! configured typing delay. Replies queue: a second message sent before the
//! first reply lands is answered after it, never instead of it.

use std::collections::VecDeque;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use mindwell_core::models::assessment::AssessmentResult;
use mindwell_core::models::chat::{ChatInteraction, ChatMessage, MediaRef};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::crisis::CrisisMonitor;
use crate::error::ChatError;
use crate::personalize::prioritized_suggestions;
use crate::rules::{GREETING, ResponseBundle, RuleTable, Topic, default_rules};

/// Longest typing delay a reply may be scheduled with.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

fn default_reply_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated typing delay before each reply. Values above
    /// [`MAX_REPLY_DELAY_MS`] are clamped.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Audio attached to breathing-exercise replies, if configured.
    #[serde(default)]
    pub breathing_audio_url: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            breathing_audio_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingReply {
    in_reply_to: Uuid,
    due_at: Timestamp,
    bundle: ResponseBundle,
}

/// What happened when a message was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub message_id: Uuid,
    /// This message contained a crisis keyword.
    pub crisis_detected: bool,
    pub reply_due_at: Timestamp,
    pub reply_topic: Topic,
}

pub struct ChatSession<'r> {
    rules: &'r RuleTable,
    config: ChatConfig,
    messages: Vec<ChatMessage>,
    crisis: CrisisMonitor,
    pending: VecDeque<PendingReply>,
    started_at: Timestamp,
}

impl ChatSession<'static> {
    /// Start a session on the built-in rules. The greeting's suggestion chips
    /// are ordered by the user's last assessment, if one is known.
    pub fn new(config: ChatConfig, last_result: Option<&AssessmentResult>, now: Timestamp) -> Self {
        Self::with_rules(default_rules(), config, last_result, now)
    }
}

impl<'r> ChatSession<'r> {
    pub fn with_rules(
        rules: &'r RuleTable,
        config: ChatConfig,
        last_result: Option<&AssessmentResult>,
        now: Timestamp,
    ) -> Self {
        let greeting = ChatMessage::assistant(
            GREETING.text,
            prioritized_suggestions(&GREETING, rules, last_result),
            now,
        );
        Self {
            rules,
            config,
            messages: vec![greeting],
            crisis: CrisisMonitor::new(),
            pending: VecDeque::new(),
            started_at: now,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the crisis banner is showing. Never clears once raised.
    pub fn crisis_flagged(&self) -> bool {
        self.crisis.is_flagged()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Append a user message, exactly as typed, and schedule its reply.
    pub fn send(&mut self, text: &str, now: Timestamp) -> Result<SendOutcome, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = ChatMessage::user(text, now);
        let message_id = message.id;
        self.messages.push(message);

        let crisis_detected = self.crisis.observe(text);
        let bundle = *self.rules.select(text);
        let due_at = self.reply_due_at(now);

        debug!(%message_id, topic = ?bundle.topic, "reply scheduled");
        self.pending.push_back(PendingReply {
            in_reply_to: message_id,
            due_at,
            bundle,
        });

        Ok(SendOutcome {
            message_id,
            crisis_detected,
            reply_due_at: due_at,
            reply_topic: bundle.topic,
        })
    }

    /// Never earlier than `now`.
    fn reply_due_at(&self, now: Timestamp) -> Timestamp {
        let delay_ms = self.config.reply_delay_ms.min(MAX_REPLY_DELAY_MS);
        let delay = SignedDuration::from_millis(i64::try_from(delay_ms).unwrap_or(0));
        now.checked_add(delay).unwrap_or(Timestamp::MAX)
    }

    /// Append every queued reply whose delay has elapsed by `now`, in send
    /// order. Returns how many were delivered.
    pub fn deliver_due(&mut self, now: Timestamp) -> usize {
        let mut delivered = 0;
        while self.pending.front().is_some_and(|p| p.due_at <= now) {
            if let Some(reply) = self.pending.pop_front() {
                self.append_reply(reply);
                delivered += 1;
            }
        }
        delivered
    }

    /// Wait until the oldest queued reply is due, measured from `now` on the
    /// session's clock, then append it. Returns `None` when nothing is queued.
    pub async fn deliver_next(&mut self, now: Timestamp) -> Option<&ChatMessage> {
        let due_at = self.pending.front()?.due_at;
        if let Ok(wait) = Duration::try_from(now.duration_until(due_at)) {
            tokio::time::sleep(wait).await;
        }

        let reply = self.pending.pop_front()?;
        self.append_reply(reply);
        self.messages.last()
    }

    fn append_reply(&mut self, reply: PendingReply) {
        let mut message =
            ChatMessage::assistant(reply.bundle.text, reply.bundle.suggestion_list(), reply.due_at);
        if reply.bundle.topic == Topic::Breathing
            && let Some(url) = &self.config.breathing_audio_url
        {
            message.media = Some(MediaRef {
                url: url.clone(),
                mime_type: Some("audio/mpeg".to_string()),
            });
        }
        debug!(in_reply_to = %reply.in_reply_to, "reply delivered");
        self.messages.push(message);
    }

    /// Anonymous summary for analytics. Contains no message text.
    pub fn summary(&self, now: Timestamp) -> ChatInteraction {
        let elapsed_ms = (now.as_millisecond() - self.started_at.as_millisecond()).max(0);
        ChatInteraction {
            id: Uuid::new_v4(),
            message_count: self.messages.len() as u32,
            crisis_keywords_detected: self.crisis.is_flagged(),
            session_duration_minutes: (elapsed_ms / 60_000) as u32,
            created_at: self.started_at,
        }
    }
}
