use mindwell_core::local_store::{self, LocalStore};
use mindwell_core::models::assessment::{AssessmentResult, InstrumentKind};
use mindwell_storage::local::FileStore;

fn sample_result(score: u32) -> AssessmentResult {
    AssessmentResult {
        instrument: InstrumentKind::Anxiety,
        score,
        max_score: 21,
        timestamp: "2025-03-10T14:00:00Z".parse().unwrap(),
    }
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));
    assert_eq!(store.get("assessmentResults").unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn values_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let store = FileStore::new(&path);
    store.set("greeting", "hello".to_string()).unwrap();
    drop(store);

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn set_replaces_and_remove_deletes() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));

    store.set("k", "one".to_string()).unwrap();
    store.set("k", "two".to_string()).unwrap();
    store.set("other", "x".to_string()).unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
}

#[test]
fn latest_assessment_supersedes_previous() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));

    local_store::save(&store, &sample_result(6)).unwrap();
    local_store::save(&store, &sample_result(16)).unwrap();

    let loaded: AssessmentResult = local_store::load(&store).unwrap().unwrap();
    assert_eq!(loaded, sample_result(16));

    let raw = store.get("assessmentResults").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["type"], "anxiety");
    assert_eq!(json["maxScore"], 21);
}

#[test]
fn corrupt_file_surfaces_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, b"not json").unwrap();

    let store = FileStore::new(&path);
    assert!(store.get("anything").is_err());
}
