use async_trait::async_trait;
use regex::Regex;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement};
use std::sync::LazyLock;

use super::{ColumnMetadataProvider, ColumnType, MetadataError, parse_enum_values, sanitize_identifier, split_value_list};

/// `CHECK (column IN ('a', 'b'))`, the SQLite stand-in for an enum column.
static CHECK_IN_CONSTRAINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)CHECK\s*\(\s*["`\[]?(\w+)["`\]]?\s+IN\s*\(([^)]*)\)\s*\)"#)
        .expect("check constraint pattern compiles")
});

/// Quote SQL identifier (double quotes for Postgres/SQLite, backticks for MySQL)
fn quote_identifier(identifier: &str, backend: DatabaseBackend) -> String {
    match backend {
        DatabaseBackend::MySql => format!("`{}`", identifier.replace('`', "``")),
        DatabaseBackend::Postgres | DatabaseBackend::Sqlite => {
            format!("\"{}\"", identifier.replace('"', "\"\""))
        }
    }
}

/// What the database says about one column.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnDeclaration {
    column_type: ColumnType,
    enum_values: Option<Vec<String>>,
}

/// Reads column metadata from the connected database.
#[derive(Debug, Clone)]
pub struct DatabaseMetadataProvider {
    db: DatabaseConnection,
}

impl DatabaseMetadataProvider {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn describe(&self, table: &str, column: &str) -> Result<Option<ColumnDeclaration>, DbErr> {
        let table = sanitize_identifier(table);
        let column = sanitize_identifier(column);
        if table.is_empty() || column.is_empty() {
            return Ok(None);
        }

        match self.db.get_database_backend() {
            DatabaseBackend::MySql => self.describe_mysql(&table, &column).await,
            DatabaseBackend::Postgres => self.describe_postgres(&table, &column).await,
            DatabaseBackend::Sqlite => self.describe_sqlite(&table, &column).await,
        }
    }

    async fn describe_mysql(&self, table: &str, column: &str) -> Result<Option<ColumnDeclaration>, DbErr> {
        let sql = format!(
            "SHOW COLUMNS FROM {} WHERE Field = ?",
            quote_identifier(table, DatabaseBackend::MySql)
        );
        let statement = Statement::from_sql_and_values(DatabaseBackend::MySql, sql, [column.into()]);
        let Some(row) = self.db.query_one(statement).await? else {
            return Ok(None);
        };

        let declared = read_text(&row, "Type")?;
        Ok(Some(ColumnDeclaration {
            column_type: ColumnType::from_declared(&declared),
            enum_values: parse_enum_values(&declared),
        }))
    }

    async fn describe_postgres(&self, table: &str, column: &str) -> Result<Option<ColumnDeclaration>, DbErr> {
        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r"
            SELECT data_type::text AS data_type, udt_name::text AS udt_name
            FROM information_schema.columns
            WHERE table_schema = current_schema()
            AND table_name = $1
            AND column_name = $2
            ",
            [table.into(), column.into()],
        );
        let Some(row) = self.db.query_one(statement).await? else {
            return Ok(None);
        };

        let data_type: String = row.try_get("", "data_type")?;
        if data_type != "USER-DEFINED" {
            return Ok(Some(ColumnDeclaration {
                column_type: ColumnType::from_declared(&data_type),
                enum_values: None,
            }));
        }

        let udt_name: String = row.try_get("", "udt_name")?;
        let labels = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r"
            SELECT e.enumlabel::text AS label
            FROM pg_type t
            JOIN pg_enum e ON e.enumtypid = t.oid
            WHERE t.typname = $1
            ORDER BY e.enumsortorder
            ",
            [udt_name.clone().into()],
        );
        let values = self
            .db
            .query_all(labels)
            .await?
            .iter()
            .map(|row| row.try_get::<String>("", "label"))
            .collect::<Result<Vec<_>, _>>()?;

        if values.is_empty() {
            return Ok(Some(ColumnDeclaration {
                column_type: ColumnType::Other(udt_name),
                enum_values: None,
            }));
        }
        Ok(Some(ColumnDeclaration {
            column_type: ColumnType::Enum,
            enum_values: Some(values),
        }))
    }

    async fn describe_sqlite(&self, table: &str, column: &str) -> Result<Option<ColumnDeclaration>, DbErr> {
        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT type FROM pragma_table_info(?) WHERE name = ?",
            [table.into(), column.into()],
        );
        let Some(row) = self.db.query_one(statement).await? else {
            return Ok(None);
        };
        let declared: String = row.try_get("", "type")?;

        let definition = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table.into()],
        );
        let table_sql: Option<String> = match self.db.query_one(definition).await? {
            Some(row) => row.try_get("", "sql")?,
            None => None,
        };

        if let Some(values) = table_sql.as_deref().and_then(|sql| check_constraint_values(sql, column)) {
            return Ok(Some(ColumnDeclaration {
                column_type: ColumnType::Enum,
                enum_values: Some(values),
            }));
        }

        Ok(Some(ColumnDeclaration {
            column_type: ColumnType::from_declared(&declared),
            enum_values: parse_enum_values(&declared),
        }))
    }
}

#[async_trait]
impl ColumnMetadataProvider for DatabaseMetadataProvider {
    async fn column_type(&self, table: &str, column: &str) -> Result<Option<ColumnType>, MetadataError> {
        Ok(self.describe(table, column).await?.map(|declaration| declaration.column_type))
    }

    async fn enum_values(&self, table: &str, column: &str) -> Result<Option<Vec<String>>, MetadataError> {
        Ok(self
            .describe(table, column)
            .await?
            .and_then(|declaration| declaration.enum_values))
    }
}

/// MySQL returns some `SHOW COLUMNS` fields as binary strings.
fn read_text(row: &QueryResult, column: &str) -> Result<String, DbErr> {
    match row.try_get::<String>("", column) {
        Ok(text) => Ok(text),
        Err(_) => {
            let bytes: Vec<u8> = row.try_get("", column)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Values of a `CHECK (column IN (...))` constraint on `column`.
fn check_constraint_values(table_sql: &str, column: &str) -> Option<Vec<String>> {
    CHECK_IN_CONSTRAINT
        .captures_iter(table_sql)
        .find(|caps| caps[1].eq_ignore_ascii_case(column))
        .map(|caps| split_value_list(&caps[2]))
}
