use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use mindwell_chat::error::ChatError;
use mindwell_chat::personalize::prioritized_suggestions;
use mindwell_chat::rules::{GREETING, Topic, default_rules};
use mindwell_chat::session::{ChatConfig, ChatSession, MAX_REPLY_DELAY_MS};
use mindwell_core::models::assessment::{AssessmentResult, InstrumentKind};
use mindwell_core::models::chat::ChatRole;

fn t0() -> Timestamp {
    "2025-02-01T09:00:00Z".parse().unwrap()
}

fn after(ms: i64) -> Timestamp {
    t0() + SignedDuration::from_millis(ms)
}

fn last_result(kind: InstrumentKind) -> AssessmentResult {
    AssessmentResult {
        instrument: kind,
        score: 12,
        max_score: 27,
        timestamp: t0(),
    }
}

#[test]
fn session_opens_with_greeting() {
    let session = ChatSession::new(ChatConfig::default(), None, t0());
    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::Assistant);
    assert_eq!(messages[0].text, GREETING.text);
    assert_eq!(messages[0].suggestions[0], "I'm feeling anxious");
}

#[test]
fn greeting_chips_follow_last_assessment() {
    let depression = last_result(InstrumentKind::Depression);
    let chips = prioritized_suggestions(&GREETING, default_rules(), Some(&depression));
    assert_eq!(
        chips,
        vec![
            "I'm feeling low",
            "I'm feeling anxious",
            "I'm stressed about studies",
            "I can't sleep well",
        ]
    );

    let anxiety = last_result(InstrumentKind::Anxiety);
    let session = ChatSession::new(ChatConfig::default(), Some(&anxiety), t0());
    assert_eq!(session.messages()[0].suggestions[0], "I'm feeling anxious");
}

#[test]
fn blank_messages_are_rejected() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    assert!(matches!(
        session.send("   ", t0()),
        Err(ChatError::EmptyMessage)
    ));
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn reply_arrives_after_delay() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    let outcome = session.send("I'm stressed about my exam", t0()).unwrap();
    assert_eq!(outcome.reply_topic, Topic::Stress);
    assert_eq!(outcome.reply_due_at, after(1000));
    assert_eq!(session.messages().len(), 2);

    assert_eq!(session.deliver_due(after(999)), 0);
    assert_eq!(session.deliver_due(after(1000)), 1);

    let reply = session.messages().last().unwrap();
    assert_eq!(reply.role, ChatRole::Assistant);
    assert!(reply.text.starts_with("Study stress is very common"));
    assert_eq!(reply.created_at, after(1000));
}

#[test]
fn replies_queue_in_send_order() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    session.send("I'm worried", t0()).unwrap();
    session.send("and I can't sleep", after(200)).unwrap();
    assert_eq!(session.pending_replies(), 2);

    assert_eq!(session.deliver_due(after(5000)), 2);
    let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts.len(), 5);
    assert!(texts[3].starts_with("I understand that feeling anxious"));
    assert!(texts[4].starts_with("Good sleep is crucial"));
}

#[test]
fn crisis_flag_persists_for_session() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    let first = session.send("I want to end it all", t0()).unwrap();
    assert!(first.crisis_detected);
    assert!(session.crisis_flagged());

    let second = session.send("I feel okay today", after(2000)).unwrap();
    assert!(!second.crisis_detected);
    assert!(session.crisis_flagged());
}

#[test]
fn breathing_reply_carries_configured_audio() {
    let config = ChatConfig {
        reply_delay_ms: 0,
        breathing_audio_url: Some("https://cdn.example/478.mp3".to_string()),
    };
    let mut session = ChatSession::new(config, None, t0());
    session.send("guide my breathing", t0()).unwrap();
    session.deliver_due(t0());

    let reply = session.messages().last().unwrap();
    let media = reply.media.as_ref().unwrap();
    assert_eq!(media.url, "https://cdn.example/478.mp3");
}

#[test]
fn summary_reports_counts_without_text() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    session.send("hopeless", t0()).unwrap();
    session.deliver_due(after(1000));

    let summary = session.summary(after(5 * 60_000 + 30_000));
    assert_eq!(summary.message_count, 3);
    assert!(summary.crisis_keywords_detected);
    assert_eq!(summary.session_duration_minutes, 5);
    assert_eq!(summary.created_at, t0());
}

#[tokio::test(start_paused = true)]
async fn deliver_next_waits_for_the_typing_delay() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    session.send("feeling down", t0()).unwrap();

    let started = tokio::time::Instant::now();
    let reply = session.deliver_next(t0()).await.unwrap();
    assert!(reply.text.starts_with("I hear that you're going through"));
    assert_eq!(reply.created_at, after(1000));
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(session.pending_replies(), 0);
    assert!(session.deliver_next(after(1000)).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn deliver_next_does_not_wait_for_overdue_replies() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    session.send("feeling down", t0()).unwrap();

    let started = tokio::time::Instant::now();
    assert!(session.deliver_next(after(5000)).await.is_some());
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[test]
fn oversized_delays_are_clamped_after_the_message() {
    for reply_delay_ms in [u64::MAX, 1 << 62, MAX_REPLY_DELAY_MS + 1] {
        let config = ChatConfig {
            reply_delay_ms,
            breathing_audio_url: None,
        };
        let mut session = ChatSession::new(config, None, t0());
        let outcome = session.send("exam stress", t0()).unwrap();
        assert_eq!(
            outcome.reply_due_at,
            after(MAX_REPLY_DELAY_MS as i64),
            "delay {reply_delay_ms}"
        );
    }
}

#[test]
fn user_text_is_kept_as_typed() {
    let mut session = ChatSession::new(ChatConfig::default(), None, t0());
    session.send("  I can't sleep  ", t0()).unwrap();
    assert_eq!(session.messages()[1].text, "  I can't sleep  ");
    assert_eq!(session.messages()[1].role, ChatRole::User);
}

#[test]
fn config_defaults_from_empty_json() {
    let config: ChatConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.reply_delay_ms, 1000);
    assert!(config.breathing_audio_url.is_none());
}
