//! SQLite tables for development and tests.
//!
//! Enum columns are declared as `TEXT` with a `CHECK (column IN (...))`
//! constraint, which the metadata provider reads back as the allowed values.
//! Foreign keys have no `ON DELETE` action, so deleting a parent that still
//! has children fails.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr};

const TABLES: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS countries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL,
        code VARCHAR(2) NOT NULL UNIQUE
    )",
    r"CREATE TABLE IF NOT EXISTS institutions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        country_id INTEGER NOT NULL REFERENCES countries(id),
        name VARCHAR(255) NOT NULL,
        code VARCHAR(32) NOT NULL UNIQUE,
        city VARCHAR(255),
        status TEXT NOT NULL DEFAULT 'Active' CHECK (status IN ('Active', 'Passive'))
    )",
    r"CREATE TABLE IF NOT EXISTS campuses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        institution_id INTEGER NOT NULL REFERENCES institutions(id),
        name VARCHAR(255) NOT NULL,
        address TEXT
    )",
    r"CREATE TABLE IF NOT EXISTS buildings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        campus_id INTEGER NOT NULL REFERENCES campuses(id),
        name VARCHAR(255) NOT NULL,
        code VARCHAR(32),
        built_on DATE
    )",
    r"CREATE TABLE IF NOT EXISTS floors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        building_id INTEGER NOT NULL REFERENCES buildings(id),
        name VARCHAR(255) NOT NULL,
        level INTEGER NOT NULL DEFAULT 0
    )",
    r"CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        floor_id INTEGER NOT NULL REFERENCES floors(id),
        name VARCHAR(255) NOT NULL,
        room_type TEXT NOT NULL DEFAULT 'Office' CHECK (room_type IN ('Office', 'Laboratory', 'Classroom', 'Storage')),
        capacity INTEGER,
        is_accessible BOOLEAN NOT NULL DEFAULT 0
    )",
    r"CREATE TABLE IF NOT EXISTS fixtures (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        name VARCHAR(255) NOT NULL,
        barcode VARCHAR(64) NOT NULL UNIQUE,
        status TEXT NOT NULL DEFAULT 'Unassigned' CHECK (status IN ('Assigned', 'Unassigned')),
        quantity INTEGER NOT NULL DEFAULT 1,
        purchased_on DATE
    )",
    r"CREATE TABLE IF NOT EXISTS materials (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER REFERENCES rooms(id),
        name VARCHAR(255) NOT NULL,
        kind TEXT NOT NULL CHECK (kind IN ('Book', 'Device', 'Kit', 'Software')),
        quantity INTEGER NOT NULL DEFAULT 1,
        is_consumable BOOLEAN NOT NULL DEFAULT 0
    )",
    r"CREATE TABLE IF NOT EXISTS transfers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fixture_id INTEGER NOT NULL REFERENCES fixtures(id),
        from_user VARCHAR(255) NOT NULL,
        to_user VARCHAR(255) NOT NULL,
        status TEXT NOT NULL DEFAULT 'Pending' CHECK (status IN ('Pending', 'Approved', 'Rejected')),
        requested_at DATETIME NOT NULL,
        note TEXT
    )",
];

/// Create every table (parents first) on a SQLite connection.
///
/// # Errors
///
/// Returns a `DbErr` when the connection is not SQLite or a statement fails.
pub async fn create_sqlite_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    if db.get_database_backend() != DatabaseBackend::Sqlite {
        return Err(DbErr::Custom(
            "schema bootstrap is only available for SQLite; run migrations for other databases".to_string(),
        ));
    }

    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    for statement in TABLES {
        db.execute_unprepared(statement).await?;
    }
    tracing::debug!(tables = TABLES.len(), "SQLite schema ready");
    Ok(())
}
