//! Bulk edit and bulk delete over a list of primary keys.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::{Alias, SimpleExpr},
};
use serde_json::Value as JsonValue;

use super::traits::Filterable;
use crate::errors::ApiError;
use crate::models::{BulkDeleteRequest, BulkDeleteResponse, BulkUpdateRequest, BulkUpdateResponse};
use crate::schema::{ColumnMetadataProvider, ColumnType, sanitize_identifier};
use crate::validation::{ValueCheck, is_valid_value_for_column};

/// Set one column to one value on every row in `ids`.
///
/// # Errors
///
/// - 422 when `ids`, `field` or `value` is missing
/// - 400 for an unknown field, a value the column does not accept, or rows
///   still referenced elsewhere
/// - 404 when none of the ids exist
/// - 409 on a unique constraint violation
/// - 500 on any other database failure
pub async fn bulk_update<R: Filterable>(
    db: &DatabaseConnection,
    provider: &dyn ColumnMetadataProvider,
    request: BulkUpdateRequest,
) -> Result<BulkUpdateResponse, ApiError> {
    let (ids, field, value) = require_update_fields(request)?;
    let table = R::table();

    if sanitize_identifier(&field) != field {
        return Err(invalid_field(&field));
    }
    let Some(column_type) = provider.column_type(&table, &field).await? else {
        return Err(invalid_field(&field));
    };

    match is_valid_value_for_column(provider, &table, &field, &column_type, &value).await? {
        ValueCheck::Accepted => {}
        ValueCheck::Rejected => {
            return Err(ApiError::bad_request(format!(
                "Invalid value '{}' for field '{field}'",
                display_value(&value)
            )));
        }
        ValueCheck::AllowedValues(allowed) => {
            return Err(ApiError::bad_request(format!(
                "Invalid value '{}' for field '{field}'. Allowed values: {}",
                display_value(&value),
                allowed.join(", ")
            )));
        }
    }

    let matching = R::find()
        .filter(R::id_column().is_in(ids.clone()))
        .count(db)
        .await
        .map_err(ApiError::database)?;
    if matching == 0 {
        return Err(ApiError::none_matched(R::RESOURCE_NAME_PLURAL, ids.len()));
    }

    let result = R::update_many()
        .col_expr(Alias::new(field.as_str()), SimpleExpr::Value(coerce_value(&column_type, &value)))
        .filter(R::id_column().is_in(ids))
        .exec(db)
        .await
        .map_err(|e| ApiError::from_write_error(e, "updated", R::RESOURCE_NAME_PLURAL))?;

    tracing::info!(
        resource = R::RESOURCE_NAME_PLURAL,
        field = %field,
        updated = result.rows_affected,
        "Bulk update applied"
    );

    Ok(BulkUpdateResponse {
        message: format!("{} {} updated successfully", result.rows_affected, R::RESOURCE_NAME_PLURAL),
        updated: result.rows_affected,
    })
}

/// Delete every row in `ids`.
///
/// Rows that other records still reference are not deleted; the whole batch
/// fails with 400 and nothing changes.
///
/// # Errors
///
/// - 422 when `ids` is missing or empty
/// - 404 when none of the ids exist
/// - 400 on a foreign key violation
/// - 500 on any other database failure
pub async fn bulk_delete<R: Filterable>(
    db: &DatabaseConnection,
    request: BulkDeleteRequest,
) -> Result<BulkDeleteResponse, ApiError> {
    let ids = request.ids.filter(|ids| !ids.is_empty()).ok_or_else(|| {
        ApiError::validation_failed(vec!["The ids field is required.".to_string()])
    })?;

    let matching = R::find()
        .filter(R::id_column().is_in(ids.clone()))
        .count(db)
        .await
        .map_err(ApiError::database)?;
    if matching == 0 {
        return Err(ApiError::none_matched(R::RESOURCE_NAME_PLURAL, ids.len()));
    }

    let result = R::delete_many()
        .filter(R::id_column().is_in(ids))
        .exec(db)
        .await
        .map_err(|e| ApiError::from_write_error(e, "deleted", R::RESOURCE_NAME_PLURAL))?;

    tracing::info!(
        resource = R::RESOURCE_NAME_PLURAL,
        deleted = result.rows_affected,
        "Bulk delete applied"
    );

    Ok(BulkDeleteResponse {
        message: format!("{} {} deleted successfully", result.rows_affected, R::RESOURCE_NAME_PLURAL),
        deleted: result.rows_affected,
    })
}

fn require_update_fields(request: BulkUpdateRequest) -> Result<(Vec<i32>, String, JsonValue), ApiError> {
    let mut errors = Vec::new();

    let ids = request.ids.filter(|ids| !ids.is_empty());
    if ids.is_none() {
        errors.push("The ids field is required.".to_string());
    }
    let field = request.field.filter(|field| !field.is_empty());
    if field.is_none() {
        errors.push("The field field is required.".to_string());
    }
    let value = request.value.filter(|value| !value.is_null());
    if value.is_none() {
        errors.push("The value field is required.".to_string());
    }

    match (ids, field, value) {
        (Some(ids), Some(field), Some(value)) => Ok((ids, field, value)),
        _ => Err(ApiError::validation_failed(errors)),
    }
}

fn invalid_field(field: &str) -> ApiError {
    ApiError::bad_request(format!("Invalid field '{field}'"))
}

fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert an accepted JSON value into the value bound for the column.
fn coerce_value(column_type: &ColumnType, value: &JsonValue) -> sea_orm::Value {
    if column_type.is_integer() {
        if let Some(int) = integer_value(value) {
            return int.into();
        }
    }

    match (column_type, value) {
        (ColumnType::Boolean, JsonValue::Bool(b)) => (*b).into(),
        (ColumnType::Boolean, JsonValue::Number(n)) => (n.as_u64() == Some(1)).into(),
        (ColumnType::Boolean, JsonValue::String(s)) => (s == "1").into(),
        (_, JsonValue::Number(n)) => match n.as_i64() {
            Some(int) => int.into(),
            None => n.as_f64().map_or_else(|| n.to_string().into(), Into::into),
        },
        (_, JsonValue::Bool(b)) => (*b).into(),
        (_, JsonValue::String(s)) => s.clone().into(),
        (_, other) => other.to_string().into(),
    }
}

/// Integer stored for a numeric value. Fractions round half away from zero,
/// as MySQL does when writing to an integer column; out-of-range values
/// saturate.
#[allow(clippy::cast_possible_truncation)]
fn integer_value(value: &JsonValue) -> Option<i64> {
    let float = match value {
        JsonValue::Number(n) => {
            if let Some(int) = n.as_i64() {
                return Some(int);
            }
            n.as_f64()?
        }
        JsonValue::String(s) => {
            let s = s.trim();
            if let Ok(int) = s.parse::<i64>() {
                return Some(int);
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    float.is_finite().then(|| float.round() as i64)
}
