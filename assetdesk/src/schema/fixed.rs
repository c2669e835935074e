use async_trait::async_trait;
use std::collections::HashMap;

use super::{ColumnMetadataProvider, ColumnType, MetadataError, parse_enum_values, sanitize_identifier};

#[derive(Debug, Clone)]
struct ColumnDefinition {
    column_type: ColumnType,
    enum_values: Option<Vec<String>>,
}

/// In-memory column declarations, keyed by `(table, column)`.
///
/// ```rust,ignore
/// let provider = StaticMetadataProvider::new()
///     .with_column("fixtures", "status", "enum('Assigned','Unassigned')")
///     .with_column("fixtures", "quantity", "int(11)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataProvider {
    columns: HashMap<(String, String), ColumnDefinition>,
}

impl StaticMetadataProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column from its declared type, as MySQL would report it.
    #[must_use]
    pub fn with_column(mut self, table: &str, column: &str, declared: &str) -> Self {
        let definition = ColumnDefinition {
            column_type: ColumnType::from_declared(declared),
            enum_values: parse_enum_values(declared),
        };
        self.columns.insert(key(table, column), definition);
        self
    }

    /// Register an enum column with explicit allowed values.
    #[must_use]
    pub fn with_enum(mut self, table: &str, column: &str, values: &[&str]) -> Self {
        let definition = ColumnDefinition {
            column_type: ColumnType::Enum,
            enum_values: Some(values.iter().map(ToString::to_string).collect()),
        };
        self.columns.insert(key(table, column), definition);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn key(table: &str, column: &str) -> (String, String) {
    (sanitize_identifier(table), sanitize_identifier(column))
}

#[async_trait]
impl ColumnMetadataProvider for StaticMetadataProvider {
    async fn column_type(&self, table: &str, column: &str) -> Result<Option<ColumnType>, MetadataError> {
        Ok(self
            .columns
            .get(&key(table, column))
            .map(|definition| definition.column_type.clone()))
    }

    async fn enum_values(&self, table: &str, column: &str) -> Result<Option<Vec<String>>, MetadataError> {
        Ok(self
            .columns
            .get(&key(table, column))
            .and_then(|definition| definition.enum_values.clone()))
    }
}
