use mindwell_chat::error::ChatError;
use mindwell_chat::rules::{
    ConversationRule, GENERAL, RuleTable, STRESS, Topic, default_rules, select_response,
};

#[test]
fn stress_message_selects_stress_bundle() {
    let bundle = select_response("I'm stressed about my exam");
    assert_eq!(bundle.topic, Topic::Stress);
    assert_eq!(*bundle, STRESS);
}

#[test]
fn anxiety_wins_over_sleep() {
    let bundle = select_response("I'm anxious and can't sleep");
    assert_eq!(bundle.topic, Topic::Anxiety);
}

#[test]
fn each_group_is_reachable() {
    assert_eq!(select_response("I've been worried").topic, Topic::Anxiety);
    assert_eq!(select_response("so much to study").topic, Topic::Stress);
    assert_eq!(select_response("Feeling SAD").topic, Topic::LowMood);
    assert_eq!(select_response("always tired").topic, Topic::Sleep);
    assert_eq!(
        select_response("Yes, let's try breathing").topic,
        Topic::Breathing
    );
}

#[test]
fn unmatched_input_falls_back() {
    let bundle = select_response("hello there");
    assert_eq!(*bundle, GENERAL);
    assert_eq!(bundle.suggestions.len(), 5);
}

#[test]
fn selection_is_idempotent() {
    let first = select_response("I can't sleep");
    let second = select_response("I can't sleep");
    assert_eq!(first, second);
}

#[test]
fn table_without_fallback_is_rejected() {
    let rules = vec![ConversationRule {
        triggers: &["exam"],
        bundle: STRESS,
    }];
    assert!(matches!(
        RuleTable::new(rules),
        Err(ChatError::MissingFallback)
    ));
    assert!(matches!(
        RuleTable::new(Vec::new()),
        Err(ChatError::MissingFallback)
    ));
}

#[test]
fn fallback_must_be_last() {
    let rules = vec![
        ConversationRule {
            triggers: &[],
            bundle: GENERAL,
        },
        ConversationRule {
            triggers: &["exam"],
            bundle: STRESS,
        },
        ConversationRule {
            triggers: &[],
            bundle: GENERAL,
        },
    ];
    assert!(matches!(
        RuleTable::new(rules),
        Err(ChatError::UnreachableRule(1))
    ));
}

#[test]
fn custom_table_resolves_first_match() {
    let table = RuleTable::new(vec![
        ConversationRule {
            triggers: &["exam"],
            bundle: STRESS,
        },
        ConversationRule {
            triggers: &[],
            bundle: GENERAL,
        },
    ])
    .unwrap();
    assert_eq!(table.select("EXAM tomorrow").topic, Topic::Stress);
    assert_eq!(table.select("anything else").topic, Topic::General);
    assert_eq!(table.fallback().topic, Topic::General);
}

#[test]
fn default_table_fallback_is_general() {
    assert_eq!(default_rules().fallback().topic, Topic::General);
}
