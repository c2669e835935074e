use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    sea_query::SimpleExpr,
};

use super::clause::FilterClause;
use super::conditions::build_filter_predicate;
use super::pagination::{Page, PageRequest};
use super::relations::QueryScope;
use super::search::{SearchSpec, build_search_condition};
use super::sort::SortSpec;

/// Everything a list screen asks for in one request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<FilterClause>,
    pub search: SearchSpec,
    pub sort: SortSpec,
    pub page: PageRequest,
}

/// Apply search, filters and sort (in that order) to a base query.
#[must_use]
pub fn apply_list_query<E: EntityTrait>(mut query: Select<E>, list: &ListQuery, scope: &QueryScope) -> Select<E> {
    if let Some(search) = build_search_condition(&list.search, scope) {
        query = query.filter(search);
    }

    for clause in &list.filters {
        if let Some(predicate) = build_filter_predicate(scope, clause) {
            tracing::debug!(
                table = %scope.table,
                field = %clause.field,
                condition = %clause.condition,
                "Applying filter clause"
            );
            query = query.filter(predicate);
        }
    }

    if let Some((column, order)) = list.sort.resolve(&scope.table) {
        query = query.order_by(SimpleExpr::Column(column), order);
    }

    query
}

/// Run a list query and return one page of JSON rows.
///
/// # Errors
///
/// Returns the database error when counting or fetching fails, including an
/// unknown sort column.
pub async fn filter_and_paginate<E, C>(
    db: &C,
    query: Select<E>,
    list: &ListQuery,
    scope: &QueryScope,
) -> Result<Page<serde_json::Value>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let paginator = apply_list_query(query, list, scope)
        .into_json()
        .paginate(db, list.page.page_size);

    let total = paginator.num_items().await?;
    // Pages past the end are answered without another query
    let records = match list.page.offset() {
        Some(offset) if offset < total => paginator.fetch_page(list.page.page - 1).await?,
        _ => Vec::new(),
    };
    let page = Page::new(records, list.page, total);

    tracing::debug!(
        table = %scope.table,
        page = page.meta.current_page,
        per_page = page.meta.per_page,
        total = page.meta.total,
        "Fetched list page"
    );

    Ok(page)
}
