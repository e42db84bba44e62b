use healthpro_core::models::record::AssessmentRecord;
use healthpro_storage::records::{JsonRecordStore, RecordRepository};
use serde_json::json;

fn record(v: serde_json::Value) -> AssessmentRecord {
    AssessmentRecord::try_from(v).unwrap()
}

#[tokio::test]
async fn get_by_session_id() {
    let store = JsonRecordStore::from_records([
        record(json!({"session_id": "a", "assessment_id": "as_hr_02"})),
        record(json!({"session_id": "b", "assessment_id": "as_card_01"})),
        record(json!({"assessment_id": "orphan"})),
    ]);
    assert_eq!(store.len(), 2);

    let b = store.get("b").await.unwrap().unwrap();
    assert_eq!(b.assessment_id(), Some("as_card_01"));
    assert!(store.get("zzz").await.unwrap().is_none());
}

#[tokio::test]
async fn list_sessions_summarizes_records() {
    let store = JsonRecordStore::from_records([record(json!({
        "session_id": "a",
        "assessment_id": "as_hr_02",
        "timestamp": "2024-01-15T10:30:00Z",
        "accuracy": 88.5
    }))]);
    let sessions = store.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].session_id, "a");
    assert_eq!(sessions[0].assessment_id.as_deref(), Some("as_hr_02"));
    assert_eq!(sessions[0].accuracy, Some(json!(88.5)));
}

#[tokio::test]
async fn loads_json_array_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assessments.json");
    std::fs::write(
        &path,
        r#"[{"session_id": "s1", "assessment_id": "as_hr_02"}, {"session_id": "s2"}]"#,
    )
    .unwrap();

    let store = JsonRecordStore::load(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.get("s2").await.unwrap().is_some());
}

#[test]
fn non_object_entries_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assessments.json");
    std::fs::write(&path, "[1, 2]").unwrap();
    assert!(JsonRecordStore::load(&path).is_err());
}
