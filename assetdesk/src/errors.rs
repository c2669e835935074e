//! # Error Handling for the back office API
//!
//! Every handler returns `Result<_, ApiError>`. The error decides its own HTTP
//! status code and renders a sanitized JSON body:
//!
//! ```json
//! { "error": "Invalid value 'Bogus' for field 'status'. Allowed values: Assigned, Unassigned" }
//! ```
//!
//! Database errors are logged with `tracing` and replaced by a generic message.
//! Integrity violations raised while writing (a foreign key that still has
//! dependent rows, a duplicate key) are translated into client errors instead
//! of leaking driver text.
//!
//! ```rust,ignore
//! async fn handler(State(state): State<AppState>) -> Result<Json<Page<Value>>, ApiError> {
//!     let page = filter_and_paginate(&state.db, query, &list_query, &scope)
//!         .await
//!         .map_err(ApiError::database)?;
//!     Ok(Json(page))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::schema::MetadataError;

/// Integrity constraint SQLSTATE `23000` as drivers print it: PDO style
/// `SQLSTATE[23000]` or MySQL style `1451 (23000):`.
static INTEGRITY_CONSTRAINT_SQLSTATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SQLSTATE\[23000\]|\b\d{4} \(23000\):").expect("sqlstate pattern compiles")
});

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        /// User-facing error message
        message: String,
    },

    /// 400 Bad Request - semantically invalid input
    BadRequest {
        /// User-facing error message
        message: String,
    },

    /// 409 Conflict - duplicate key on write
    Conflict {
        /// User-facing error message
        message: String,
    },

    /// 422 Unprocessable Entity - request shape is wrong (missing fields)
    ValidationFailed {
        /// User-facing validation errors
        errors: Vec<String>,
    },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },
}

impl ApiError {
    /// Create a 404 error for a batch of IDs that matched nothing
    #[must_use]
    pub fn none_matched(resource_plural: &str, requested: usize) -> Self {
        Self::NotFound {
            message: format!("None of the {requested} requested {resource_plural} were found"),
        }
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a 422 Validation Failed error
    ///
    /// # Example
    /// ```rust,ignore
    /// return Err(ApiError::validation_failed(vec![
    ///     "The ids field is required.".to_string(),
    /// ]));
    /// ```
    #[must_use]
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Create a 500 error from a database error. The details are logged, not sent.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Translate a failed bulk write.
    ///
    /// `action` is the past-tense verb shown to the user ("deleted", "updated").
    #[must_use]
    pub fn from_write_error(err: DbErr, action: &str, resource_plural: &str) -> Self {
        if is_foreign_key_violation(&err) {
            tracing::info!(error = %err, action, resource = resource_plural, "Bulk write blocked by related records");
            return Self::bad_request(format!(
                "The selected {resource_plural} could not be {action} because related records exist"
            ));
        }
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return Self::conflict(format!(
                "The selected {resource_plural} could not be {action} because the value must be unique"
            ));
        }
        Self::database(err)
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Database { message, .. } => message.clone(),
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// True when the error is a referential-integrity failure.
///
/// SeaORM classifies the driver codes it knows (MySQL 1451/1452, PostgreSQL
/// 23503, SQLite 787). Drivers that only report the generic SQLSTATE `23000`
/// are caught by matching the SQLSTATE token in the message, so a bare number
/// such as a row id never counts.
#[must_use]
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => true,
        Some(_) => false,
        None => {
            let text = err.to_string();
            INTEGRITY_CONSTRAINT_SQLSTATE.is_match(&text) || text.contains("FOREIGN KEY constraint failed")
        }
    }
}

/// Error response sent to users
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Convert SeaORM `DbErr` to `ApiError`
///
/// - `DbErr::RecordNotFound` -> 404
/// - foreign key violations -> 400 related-records message
/// - unique violations -> 409
/// - anything else -> 500, logged and sanitized
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(msg) = &err {
            return Self::NotFound {
                message: msg.clone(),
            };
        }
        Self::from_write_error(err, "saved", "records")
    }
}

impl From<MetadataError> for ApiError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Database(internal) => Self::database(internal),
        }
    }
}
