//! Value Validation for bulk edits
//!
//! A bulk edit names a column and supplies one raw JSON value for it. The
//! value is checked against the live column type before any row is touched:
//!
//! | column type | accepted values |
//! |---|---|
//! | integer / bigint / smallint | numbers, or strings holding a finite number |
//! | string / text | strings |
//! | boolean | `true`, `false`, `0`, `1`, `"0"`, `"1"` |
//! | date / datetime / timestamp | strings that parse as a date or date-time |
//! | enum | members of the declared value list |
//! | anything else | everything |
//!
//! Invalid values are ordinary results ([`ValueCheck`]), not errors. Only a
//! failure to read the column metadata is an error.
//!
//! ```rust,ignore
//! match is_valid_value_for_column(provider, "fixtures", "status", &column_type, &value).await? {
//!     ValueCheck::Accepted => { /* write it */ }
//!     ValueCheck::AllowedValues(values) => { /* tell the user the choices */ }
//!     ValueCheck::Rejected => { /* 400 */ }
//! }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::schema::{ColumnMetadataProvider, ColumnType, MetadataError, sanitize_identifier};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Outcome of checking one value against one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueCheck {
    Accepted,
    /// Wrong type, or the column is not an enum / does not exist
    Rejected,
    /// Enum mismatch; the permitted values in declaration order
    AllowedValues(Vec<String>),
}

impl ValueCheck {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    fn from_bool(accepted: bool) -> Self {
        if accepted { Self::Accepted } else { Self::Rejected }
    }
}

/// Check `value` against the enum declaration of `table.column`.
///
/// # Errors
///
/// Returns a [`MetadataError`] when the column metadata cannot be read.
pub async fn check_enum_value(
    provider: &dyn ColumnMetadataProvider,
    table: &str,
    column: &str,
    value: &Value,
) -> Result<ValueCheck, MetadataError> {
    let table = sanitize_identifier(table);
    let column = sanitize_identifier(column);

    let Some(allowed) = provider.enum_values(&table, &column).await? else {
        tracing::debug!(table = %table, column = %column, "Column is not an enum column");
        return Ok(ValueCheck::Rejected);
    };

    let is_member = loose_text(value).is_some_and(|text| allowed.iter().any(|option| *option == text));
    if is_member {
        Ok(ValueCheck::Accepted)
    } else {
        Ok(ValueCheck::AllowedValues(allowed))
    }
}

/// Check `value` against a column whose type the caller already resolved.
///
/// Enum columns delegate to [`check_enum_value`] and return its result
/// unchanged.
///
/// # Errors
///
/// Returns a [`MetadataError`] when enum metadata cannot be read.
pub async fn is_valid_value_for_column(
    provider: &dyn ColumnMetadataProvider,
    table: &str,
    column: &str,
    column_type: &ColumnType,
    value: &Value,
) -> Result<ValueCheck, MetadataError> {
    let check = match column_type {
        integer if integer.is_integer() => ValueCheck::from_bool(is_numeric(value)),
        ColumnType::String | ColumnType::Text => ValueCheck::from_bool(value.is_string()),
        ColumnType::Boolean => ValueCheck::from_bool(is_boolean_like(value)),
        temporal if temporal.is_temporal() => ValueCheck::from_bool(value.as_str().is_some_and(is_date_like)),
        ColumnType::Enum => return check_enum_value(provider, table, column, value).await,
        _ => ValueCheck::Accepted,
    };
    Ok(check)
}

/// Text used for enum membership; numbers compare by their decimal text.
fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

/// Strict membership in `{0, 1, "0", "1"}`, plus JSON booleans.
fn is_boolean_like(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_u64(), Some(0 | 1)),
        Value::String(s) => s == "0" || s == "1",
        _ => false,
    }
}

fn is_date_like(text: &str) -> bool {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
}
