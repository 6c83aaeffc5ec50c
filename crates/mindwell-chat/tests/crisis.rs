use mindwell_chat::crisis::{CRISIS_KEYWORDS, CrisisMonitor, detect_crisis};

#[test]
fn crisis_keywords_are_detected_case_insensitively() {
    assert!(detect_crisis("I want to end it all"));
    assert!(detect_crisis("Everything feels HOPELESS"));
    assert!(!detect_crisis("I feel okay today"));
}

#[test]
fn crisis_detection_is_over_inclusive() {
    // substring match without tokenization: "diet" contains "die"
    assert!(detect_crisis("my diet has been bad"));
}

#[test]
fn crisis_monitor_latches() {
    let mut monitor = CrisisMonitor::new();
    assert!(!monitor.observe("hello"));
    assert!(!monitor.is_flagged());

    assert!(monitor.observe("I feel worthless"));
    assert!(monitor.is_flagged());

    assert!(!monitor.observe("thanks, a bit better now"));
    assert!(monitor.is_flagged());
}

#[test]
fn every_keyword_triggers_on_its_own() {
    for keyword in CRISIS_KEYWORDS {
        assert!(detect_crisis(&format!("lately I {keyword}")), "{keyword}");
    }
}
