// Ordering of list results.

mod common;

use axum::http::StatusCode;
use common::{get_json, list_records, list_uri, names_of, setup_seeded_db, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_sort_by_name() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let records = list_records(&app, "fixtures", &[("sort_column", "name"), ("sort_direction", "asc")]).await;
    let names = names_of(&records);
    assert_eq!(names.first().map(String::as_str), Some("Cable_Tray"));
    assert_eq!(names.last().map(String::as_str), Some("Standing Desk"));

    let records = list_records(&app, "fixtures", &[("sort_column", "name"), ("sort_direction", "desc")]).await;
    assert_eq!(names_of(&records).first().map(String::as_str), Some("Standing Desk"));
}

#[tokio::test]
async fn test_sort_direction_is_case_insensitive() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let records = list_records(&app, "fixtures", &[("sort_column", "quantity"), ("sort_direction", "DESC")]).await;

    assert_eq!(records[0]["name"], "Spare Chair");
    assert_eq!(records[0]["quantity"], 12);
}

#[tokio::test]
async fn test_sort_needs_both_column_and_direction() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let unsorted = names_of(&list_records(&app, "fixtures", &[]).await);
    for params in [
        vec![("sort_column", "name")],
        vec![("sort_direction", "desc")],
        vec![("sort_column", "name"), ("sort_direction", "sideways")],
    ] {
        let names = names_of(&list_records(&app, "fixtures", &params).await);
        assert_eq!(names, unsorted, "{params:?} should not reorder");
    }
}

#[tokio::test]
async fn test_sort_combines_with_filters_and_pages() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let raw = json!([{"field": "status", "condition": "=", "value": "Assigned"}]).to_string();
    let uri = list_uri(
        "fixtures",
        &[
            ("filters", &raw),
            ("sort_column", "barcode"),
            ("sort_direction", "desc"),
            ("page_size", "2"),
            ("page", "2"),
        ],
    );
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let barcodes: Vec<&str> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["barcode"].as_str().unwrap())
        .collect();
    assert_eq!(barcodes, vec!["FX-0002", "FX-0001"]);
}

#[tokio::test]
async fn test_unknown_sort_column_is_a_server_error() {
    let db = setup_seeded_db().await.expect("Failed to setup test database");
    let app = setup_test_app(&db);

    let (status, body) = get_json(&app, &list_uri("fixtures", &[("sort_column", "colour"), ("sort_direction", "asc")])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "A database error occurred");
}
