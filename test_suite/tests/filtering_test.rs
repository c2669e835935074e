// Structured filters on list endpoints: conditions, relation paths, and
// clauses that are silently ignored.

mod common;

use common::{
    CABLE_TRAY, FIXTURE_COUNT, OFFICE_CHAIR, OSCILLOSCOPE, PROJECTOR, SOLDERING_STATION, SPARE_CHAIR, STANDING_DESK,
    ids_of, list_records, setup_seeded_db, setup_test_app,
};
use serde_json::json;

fn filters(clauses: &serde_json::Value) -> String {
    clauses.to_string()
}

fn sorted(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn test_equals_filter() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "status", "condition": "=", "value": "Assigned"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(
        sorted(ids_of(&records)),
        vec![
            i64::from(OSCILLOSCOPE),
            i64::from(SOLDERING_STATION),
            i64::from(OFFICE_CHAIR),
            i64::from(CABLE_TRAY)
        ]
    );
}

#[tokio::test]
async fn test_not_equals_filter_on_integer_column() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "quantity", "condition": "!=", "value": "1"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(records.len(), 5);
    assert!(!ids_of(&records).contains(&i64::from(STANDING_DESK)));
    assert!(!ids_of(&records).contains(&i64::from(PROJECTOR)));
}

#[tokio::test]
async fn test_in_and_not_in_filters() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "barcode", "condition": "in", "value": "FX-0001,FX-0006,FX-9999"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;
    assert_eq!(sorted(ids_of(&records)), vec![i64::from(OSCILLOSCOPE), i64::from(SPARE_CHAIR)]);

    let raw = filters(&json!([{"field": "status", "condition": "not in", "value": "Assigned"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;
    assert_eq!(
        sorted(ids_of(&records)),
        vec![i64::from(STANDING_DESK), i64::from(PROJECTOR), i64::from(SPARE_CHAIR)]
    );
}

#[tokio::test]
async fn test_like_filter_is_substring_match() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "name", "condition": "like", "value": "Chair"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(sorted(ids_of(&records)), vec![i64::from(OFFICE_CHAIR), i64::from(SPARE_CHAIR)]);
}

#[tokio::test]
async fn test_like_filter_treats_wildcards_literally() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "name", "condition": "like", "value": "_"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;
    assert_eq!(ids_of(&records), vec![i64::from(CABLE_TRAY)]);

    let raw = filters(&json!([{"field": "name", "condition": "like", "value": "%"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_clauses_are_combined_with_and() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([
        {"field": "status", "condition": "=", "value": "Assigned"},
        {"field": "room.name", "condition": "like", "value": "Office"}
    ]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(sorted(ids_of(&records)), vec![i64::from(OFFICE_CHAIR), i64::from(CABLE_TRAY)]);
}

#[tokio::test]
async fn test_belongs_to_relation_filter() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "room.room_type", "condition": "=", "value": "Laboratory"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;
    assert_eq!(sorted(ids_of(&records)), vec![i64::from(OSCILLOSCOPE), i64::from(SOLDERING_STATION)]);

    let raw = filters(&json!([{"field": "country.code", "condition": "=", "value": "DE"}]));
    let records = list_records(&app, "institutions", &[("filters", &raw)]).await;
    assert_eq!(ids_of(&records), vec![3]);
}

#[tokio::test]
async fn test_has_many_relation_filter_does_not_duplicate_rows() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    // The oscilloscope has two transfers involving bob.
    let raw = filters(&json!([{"field": "transfers.from_user", "condition": "in", "value": "alice,bob"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(ids_of(&records), vec![i64::from(OSCILLOSCOPE)]);
}

#[tokio::test]
async fn test_relation_not_in_keeps_rows_with_other_children() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "transfers.status", "condition": "not in", "value": "Pending,Rejected"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(ids_of(&records), vec![i64::from(OFFICE_CHAIR)]);
}

#[tokio::test]
async fn test_unsupported_condition_is_ignored() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([
        {"field": "quantity", "condition": ">", "value": "3"},
        {"field": "status", "condition": "=", "value": "Unassigned"}
    ]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_condition_names_are_case_sensitive() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "status", "condition": "IN", "value": "Assigned"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(records.len() as u64, FIXTURE_COUNT);
}

#[tokio::test]
async fn test_incomplete_clauses_are_ignored() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([
        {"field": "status", "condition": "="},
        {"condition": "=", "value": "Assigned"},
        {"field": "", "condition": "=", "value": "Assigned"}
    ]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(records.len() as u64, FIXTURE_COUNT);
}

#[tokio::test]
async fn test_malformed_filters_json_is_ignored() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    for raw in ["not json", r#"{"field": "status"}"#, "[{]"] {
        let records = list_records(&app, "fixtures", &[("filters", raw)]).await;
        assert_eq!(records.len() as u64, FIXTURE_COUNT, "filters={raw}");
    }
}

#[tokio::test]
async fn test_unknown_relation_is_ignored() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "owner.name", "condition": "=", "value": "alice"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(records.len() as u64, FIXTURE_COUNT);
}

#[tokio::test]
async fn test_filter_value_is_bound_not_interpolated() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "name", "condition": "=", "value": "x' OR '1'='1"}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_numeric_filter_values_are_accepted() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = filters(&json!([{"field": "quantity", "condition": "=", "value": 12}]));
    let records = list_records(&app, "fixtures", &[("filters", &raw)]).await;

    assert_eq!(ids_of(&records), vec![i64::from(SPARE_CHAIR)]);
}
