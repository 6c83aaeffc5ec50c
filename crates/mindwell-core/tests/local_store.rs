use mindwell_core::local_store::{self, LocalStore, MemoryStore, StoredRecord};
use mindwell_core::models::assessment::{AssessmentResult, InstrumentKind};

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

#[test]
fn load_from_empty_store_is_none() {
    let store = MemoryStore::new();
    let loaded: Option<AssessmentResult> = local_store::load(&store).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn saved_result_uses_well_known_key_and_schema() {
    let store = MemoryStore::new();
    let result = AssessmentResult {
        instrument: InstrumentKind::Anxiety,
        score: 12,
        max_score: 21,
        timestamp: ts("2025-03-01T10:00:00Z"),
    };
    local_store::save(&store, &result).unwrap();

    let raw = store.get(AssessmentResult::KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["type"], "anxiety");
    assert_eq!(json["score"], 12);
    assert_eq!(json["maxScore"], 21);
    assert_eq!(json["timestamp"], "2025-03-01T10:00:00Z");
}

#[test]
fn newer_result_supersedes_older() {
    let store = MemoryStore::new();
    let first = AssessmentResult {
        instrument: InstrumentKind::Depression,
        score: 3,
        max_score: 27,
        timestamp: ts("2025-03-01T10:00:00Z"),
    };
    let second = AssessmentResult {
        instrument: InstrumentKind::Anxiety,
        score: 16,
        max_score: 21,
        timestamp: ts("2025-03-02T10:00:00Z"),
    };
    local_store::save(&store, &first).unwrap();
    local_store::save(&store, &second).unwrap();

    let loaded: AssessmentResult = local_store::load(&store).unwrap().unwrap();
    assert_eq!(loaded, second);
}

#[test]
fn legacy_instrument_ids_are_accepted() {
    let store = MemoryStore::new();
    store
        .set(
            AssessmentResult::KEY,
            r#"{"type":"phq9","score":14,"maxScore":27,"timestamp":"2025-01-05T08:30:00Z"}"#
                .to_string(),
        )
        .unwrap();

    let loaded: AssessmentResult = local_store::load(&store).unwrap().unwrap();
    assert_eq!(loaded.instrument, InstrumentKind::Depression);
    assert_eq!(loaded.score, 14);
}

#[test]
fn corrupt_record_is_a_serialization_error() {
    let store = MemoryStore::new();
    store
        .set(AssessmentResult::KEY, "not json".to_string())
        .unwrap();
    let loaded: Result<Option<AssessmentResult>, _> = local_store::load(&store);
    assert!(loaded.is_err());
}

#[test]
fn remove_clears_entry() {
    let store = MemoryStore::new();
    store.set("k", "v".to_string()).unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}
