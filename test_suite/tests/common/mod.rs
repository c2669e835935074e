#![allow(dead_code)]

use assetdesk::{
    AppState, PagingConfig, api_router,
    entities::{self, building, campus, country, fixture, floor, institution, material, room, transfer},
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;

// Fixture ids in insertion order
pub const OSCILLOSCOPE: i32 = 1;
pub const SOLDERING_STATION: i32 = 2;
pub const STANDING_DESK: i32 = 3;
pub const OFFICE_CHAIR: i32 = 4;
pub const PROJECTOR: i32 = 5;
pub const SPARE_CHAIR: i32 = 6;
pub const CABLE_TRAY: i32 = 7;

pub const FIXTURE_COUNT: u64 = 7;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    entities::create_sqlite_schema(&db).await?;
    Ok(db)
}

/// Empty schema plus the reference data every test file shares.
pub async fn setup_seeded_db() -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    seed(&db).await?;
    Ok(db)
}

pub fn setup_test_app(db: &DatabaseConnection) -> Router {
    api_router(AppState::new(db.clone(), PagingConfig::default()))
}

pub fn setup_test_app_with_paging(db: &DatabaseConnection, paging: PagingConfig) -> Router {
    api_router(AppState::new(db.clone(), paging))
}

async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    for (name, code) in [("Turkey", "TR"), ("Germany", "DE")] {
        country::ActiveModel {
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (country_id, name, code, city, status) in [
        (1, "Middle East Technical University", "METU", "Ankara", "Active"),
        (1, "Bogazici University", "BOUN", "Istanbul", "Active"),
        (2, "Technical University of Munich", "TUM", "Munich", "Passive"),
    ] {
        institution::ActiveModel {
            country_id: Set(country_id),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            city: Set(Some(city.to_string())),
            status: Set(status.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (institution_id, name) in [(1, "Main Campus"), (2, "South Campus"), (3, "Garching")] {
        campus::ActiveModel {
            institution_id: Set(institution_id),
            name: Set(name.to_string()),
            address: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (campus_id, name, code) in [(1, "Engineering", "ENG"), (2, "Library", "LIB")] {
        building::ActiveModel {
            campus_id: Set(campus_id),
            name: Set(name.to_string()),
            code: Set(Some(code.to_string())),
            built_on: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (building_id, name, level) in [(1, "Ground", 0), (1, "First", 1), (2, "Ground", 0)] {
        floor::ActiveModel {
            building_id: Set(building_id),
            name: Set(name.to_string()),
            level: Set(level),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (floor_id, name, room_type, capacity, is_accessible) in [
        (1, "Robotics Lab", "Laboratory", Some(20), true),
        (2, "Office 101", "Office", Some(2), false),
        (3, "Reading Hall", "Classroom", Some(80), true),
        (1, "Storage B1", "Storage", None, false),
    ] {
        room::ActiveModel {
            floor_id: Set(floor_id),
            name: Set(name.to_string()),
            room_type: Set(room_type.to_string()),
            capacity: Set(capacity),
            is_accessible: Set(is_accessible),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (room_id, name, barcode, status, quantity) in [
        (1, "Oscilloscope", "FX-0001", "Assigned", 2),
        (1, "Soldering Station", "FX-0002", "Assigned", 5),
        (2, "Standing Desk", "FX-0003", "Unassigned", 1),
        (2, "Office Chair", "FX-0004", "Assigned", 3),
        (3, "Projector", "FX-0005", "Unassigned", 1),
        (4, "Spare Chair", "FX-0006", "Unassigned", 12),
        (2, "Cable_Tray", "FX-0007", "Assigned", 4),
    ] {
        fixture::ActiveModel {
            room_id: Set(room_id),
            name: Set(name.to_string()),
            barcode: Set(barcode.to_string()),
            status: Set(status.to_string()),
            quantity: Set(quantity),
            purchased_on: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (room_id, name, kind, quantity, is_consumable) in [
        (Some(1), "Arduino Kit", "Kit", 10, false),
        (None, "Rust Book", "Book", 3, false),
        (Some(3), "Printer Toner", "Device", 6, true),
    ] {
        material::ActiveModel {
            room_id: Set(room_id),
            name: Set(name.to_string()),
            kind: Set(kind.to_string()),
            quantity: Set(quantity),
            is_consumable: Set(is_consumable),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    let requested_at = chrono_datetime("2025-03-14 09:30:00");
    for (fixture_id, from_user, to_user, status) in [
        (OSCILLOSCOPE, "alice", "bob", "Pending"),
        (OFFICE_CHAIR, "carol", "alice", "Approved"),
        (OSCILLOSCOPE, "bob", "dave", "Rejected"),
    ] {
        transfer::ActiveModel {
            fixture_id: Set(fixture_id),
            from_user: Set(from_user.to_string()),
            to_user: Set(to_user.to_string()),
            status: Set(status.to_string()),
            requested_at: Set(requested_at),
            note: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

fn chrono_datetime(raw: &str) -> sea_orm::prelude::DateTime {
    sea_orm::prelude::DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").expect("valid seed timestamp")
}

/// Build a list URI with properly encoded query parameters.
pub fn list_uri(resource: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return format!("/api/{resource}");
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("/api/{resource}?{query}")
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, method, uri, Some(body)).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// List a resource and return its records, asserting a 200.
pub async fn list_records(app: &Router, resource: &str, params: &[(&str, &str)]) -> Vec<Value> {
    let (status, body) = get_json(app, &list_uri(resource, params)).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {body}");
    body["records"].as_array().cloned().unwrap_or_default()
}

pub fn ids_of(records: &[Value]) -> Vec<i64> {
    records.iter().filter_map(|record| record["id"].as_i64()).collect()
}

pub fn names_of(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record["name"].as_str().map(ToString::to_string))
        .collect()
}
