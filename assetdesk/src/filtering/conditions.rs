use sea_orm::sea_query::{Alias, ColumnRef, Expr, IntoIden, LikeExpr, SimpleExpr};

use super::clause::{FieldPath, FilterClause, FilterCondition};
use super::relations::QueryScope;

/// Escape LIKE wildcards so user input is matched literally
/// Escapes: % (match any) and _ (match single char)
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `%value%` with `ESCAPE '\'`
#[must_use]
pub fn contains_pattern(value: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_wildcards(value))).escape('\\')
}

/// Qualified column reference. A column that still carries a dot
/// (`floor.name`) is taken as its own `table.column` pair.
#[must_use]
pub fn column_ref(default_table: &str, column: &str) -> ColumnRef {
    let (table, column) = column.split_once('.').unwrap_or((default_table, column));
    ColumnRef::TableColumn(Alias::new(table).into_iden(), Alias::new(column).into_iden())
}

/// `in` / `not in` values: plain comma split, no trimming.
fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Comparison on one column, or `None` for an unsupported condition.
#[must_use]
pub fn build_comparison(column: ColumnRef, condition: &FilterCondition, value: &str) -> Option<SimpleExpr> {
    let col = Expr::col(column);
    match condition {
        FilterCondition::Equals => Some(col.eq(value)),
        FilterCondition::NotEquals => Some(col.ne(value)),
        FilterCondition::Like => Some(col.like(contains_pattern(value))),
        FilterCondition::In => Some(col.is_in(split_list(value))),
        FilterCondition::NotIn => Some(col.is_not_in(split_list(value))),
        FilterCondition::Unsupported(_) => None,
    }
}

/// Predicate for a field path: direct on the main table, or an `EXISTS`
/// subquery through the named relation.
#[must_use]
pub fn build_path_predicate(
    scope: &QueryScope,
    path: &FieldPath,
    condition: &FilterCondition,
    value: &str,
) -> Option<SimpleExpr> {
    let Some(relation) = &path.relation else {
        return build_comparison(column_ref(&scope.table, &path.column), condition, value);
    };

    let Some(link) = scope.relation(relation) else {
        tracing::warn!(
            table = %scope.table,
            relation = %relation,
            "Ignoring predicate on undeclared relation"
        );
        return None;
    };

    let predicate = build_comparison(column_ref(link.table, &path.column), condition, value)?;
    Some(scope.relation_exists(link, predicate))
}

/// Predicate contributed by one filter clause, if any.
#[must_use]
pub fn build_filter_predicate(scope: &QueryScope, clause: &FilterClause) -> Option<SimpleExpr> {
    if !clause.is_complete() {
        return None;
    }

    let condition = clause.condition();
    if let FilterCondition::Unsupported(raw) = &condition {
        tracing::debug!(field = %clause.field, condition = %raw, "Skipping unsupported filter condition");
        return None;
    }

    build_path_predicate(scope, &clause.path(), &condition, &clause.value)
}
