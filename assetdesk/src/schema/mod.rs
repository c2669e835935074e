//! # Column Metadata
//!
//! The bulk-edit screens accept a column name and a raw value from the
//! client. Before anything is written the value is checked against the live
//! column type, so this module answers two questions for a `(table, column)`
//! pair: what type is it, and if it is an enum, which values are allowed.
//!
//! - [`DatabaseMetadataProvider`] reads the answers from the connected
//!   database (MySQL, PostgreSQL or SQLite).
//! - [`StaticMetadataProvider`] holds a fixed set of column declarations.

pub mod fixed;
pub mod introspect;

use async_trait::async_trait;
use sea_orm::DbErr;
use std::fmt;

pub use fixed::StaticMetadataProvider;
pub use introspect::DatabaseMetadataProvider;

/// Normalized column type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    BigInt,
    SmallInt,
    String,
    Text,
    Boolean,
    Date,
    DateTime,
    Timestamp,
    Enum,
    /// Anything else, lowercased as declared
    Other(String),
}

impl ColumnType {
    /// Map a declared column type (`varchar(255)`, `int unsigned`,
    /// `enum('a','b')`, `timestamp without time zone`, ...) to its tag.
    #[must_use]
    pub fn from_declared(declared: &str) -> Self {
        let lower = declared.trim().to_ascii_lowercase();

        if parse_enum_values(&lower).is_some() {
            return Self::Enum;
        }
        // MySQL reports booleans as tinyint(1)
        if lower.starts_with("tinyint(1)") {
            return Self::Boolean;
        }

        let base = lower.split(['(', ' ']).next().unwrap_or_default();
        match base {
            "int" | "integer" | "mediumint" | "tinyint" | "int4" | "serial" => Self::Integer,
            "bigint" | "int8" | "bigserial" => Self::BigInt,
            "smallint" | "int2" => Self::SmallInt,
            "varchar" | "char" | "character" | "nvarchar" | "nchar" | "bpchar" | "string" => Self::String,
            "text" | "tinytext" | "mediumtext" | "longtext" | "clob" => Self::Text,
            "bool" | "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "timestamp" | "timestamptz" => Self::Timestamp,
            _ => Self::Other(lower),
        }
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer | Self::BigInt | Self::SmallInt)
    }

    #[must_use]
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Timestamp)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::BigInt => write!(f, "bigint"),
            Self::SmallInt => write!(f, "smallint"),
            Self::String => write!(f, "string"),
            Self::Text => write!(f, "text"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
            Self::DateTime => write!(f, "datetime"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Enum => write!(f, "enum"),
            Self::Other(declared) => write!(f, "{declared}"),
        }
    }
}

/// Keep only ASCII letters, digits and underscores.
#[must_use]
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect()
}

/// Allowed values of an `enum('a','b',...)` declaration, or `None` when the
/// declaration is not an enum.
#[must_use]
pub fn parse_enum_values(declared: &str) -> Option<Vec<String>> {
    let trimmed = declared.trim();
    let head = trimmed.get(..4)?;
    if !head.eq_ignore_ascii_case("enum") {
        return None;
    }
    let rest = trimmed[4..].trim_start();
    let inner = rest.strip_prefix('(')?;
    let close = inner.rfind(')')?;
    Some(split_value_list(&inner[..close]))
}

/// Split a comma-separated list of (optionally single-quoted) values.
pub(crate) fn split_value_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|item| item.trim().trim_matches('\'').to_string())
        .collect()
}

/// Failure while reading column metadata.
#[derive(Debug)]
pub enum MetadataError {
    Database(DbErr),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(err) => write!(f, "failed to read column metadata: {err}"),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
        }
    }
}

impl From<DbErr> for MetadataError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

/// Source of column types and enum values.
///
/// Both lookups return `Ok(None)` when the table or column does not exist.
#[async_trait]
pub trait ColumnMetadataProvider: Send + Sync {
    /// Normalized type of `table.column`.
    async fn column_type(&self, table: &str, column: &str) -> Result<Option<ColumnType>, MetadataError>;

    /// Allowed values when `table.column` is an enum column.
    async fn enum_values(&self, table: &str, column: &str) -> Result<Option<Vec<String>>, MetadataError>;

    async fn column_exists(&self, table: &str, column: &str) -> Result<bool, MetadataError> {
        Ok(self.column_type(table, column).await?.is_some())
    }
}
