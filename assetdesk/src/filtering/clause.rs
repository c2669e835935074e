//! Structured filter clauses and dot-path field addressing.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Comparison requested by a filter clause.
///
/// Conditions arrive as free-form strings from the list screens. Anything the
/// engine does not understand becomes [`FilterCondition::Unsupported`] and
/// contributes no predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCondition {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `like` - substring match
    Like,
    /// `in` - comma-separated set membership
    In,
    /// `not in`
    NotIn,
    /// Anything else, kept for logging
    Unsupported(String),
}

impl FilterCondition {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "=" => Self::Equals,
            "!=" => Self::NotEquals,
            "like" => Self::Like,
            "in" => Self::In,
            "not in" => Self::NotIn,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// A field addressed either directly on the main table or through one
/// relation hop (`relation.column`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub relation: Option<String>,
    pub column: String,
}

impl FieldPath {
    /// Split on the first dot only; `a.b.c` is relation `a`, column `b.c`.
    #[must_use]
    pub fn parse(field: &str) -> Self {
        match field.split_once('.') {
            Some((relation, column)) => Self {
                relation: Some(relation.to_string()),
                column: column.to_string(),
            },
            None => Self {
                relation: None,
                column: field.to_string(),
            },
        }
    }
}

/// One `{ field, condition, value }` entry of the `filters` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct FilterClause {
    /// Column name or `relation.column` dot path
    #[serde(default, deserialize_with = "lenient_string")]
    pub field: String,
    /// One of `=`, `!=`, `like`, `in`, `not in`
    #[serde(default, deserialize_with = "lenient_string")]
    pub condition: String,
    /// Comparison value; comma-separated for `in` / `not in`
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, condition: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            condition: condition.into(),
            value: value.into(),
        }
    }

    /// A clause is applied only when field, condition and value are all non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.condition.is_empty() && !self.value.is_empty()
    }

    #[must_use]
    pub fn condition(&self) -> FilterCondition {
        FilterCondition::parse(&self.condition)
    }

    #[must_use]
    pub fn path(&self) -> FieldPath {
        FieldPath::parse(&self.field)
    }
}

/// Decode the JSON-encoded `filters` query parameter.
///
/// Malformed input is not an error: the list screen simply gets no filters.
#[must_use]
pub fn parse_filters_json(raw: Option<&str>) -> Vec<FilterClause> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<FilterClause>>(raw) {
        Ok(clauses) => clauses,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed filters parameter");
            Vec::new()
        }
    }
}

/// Accept strings, numbers and booleans; `null` and missing become "".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => String::new(),
    })
}
