use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::{IntoParams, ToSchema};

use crate::config::PagingConfig;
use crate::filtering::{ListQuery, PageRequest, SearchSpec, SortSpec, parse_filters_json};

/// Query parameters accepted by every list endpoint.
///
/// # Filtering
/// `filters` is a JSON-encoded array of clauses, AND-ed in order:
/// ```json
/// [{"field": "status", "condition": "in", "value": "Assigned,Unassigned"},
///  {"field": "room.name", "condition": "like", "value": "Lab"}]
/// ```
/// Supported conditions are `=`, `!=`, `like`, `in` and `not in`. Malformed
/// JSON is ignored.
///
/// # Search
/// `search` matches any of the resource's searchable fields (substring match,
/// or exact when `exact_match=true`).
///
/// # Sorting and pagination
/// `sort_column` and `sort_direction` (`asc` / `desc`) must both be given.
/// `page_size` defaults to 10 and `page` to 1.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON-encoded array of `{field, condition, value}` clauses
    #[param(example = r#"[{"field":"status","condition":"=","value":"Assigned"}]"#)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub filters: Option<String>,
    /// Free-text search term
    #[param(example = "Lab")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,
    /// JSON boolean (`true` / `false`); anything else counts as `false`
    #[param(example = "false")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub exact_match: Option<String>,
    /// Column of the main table to sort by
    #[param(example = "name")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort_column: Option<String>,
    /// `asc` or `desc`
    #[param(example = "asc")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort_direction: Option<String>,
    /// Records per page
    #[param(example = 10)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u64>,
    /// 1-based page number
    #[param(example = 1)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u64>,
}

impl ListParams {
    /// `exact_match` decoded as a JSON boolean, `false` when absent or malformed.
    #[must_use]
    pub fn exact_match(&self) -> bool {
        self.exact_match
            .as_deref()
            .and_then(|raw| serde_json::from_str::<bool>(raw).ok())
            .unwrap_or(false)
    }

    /// Resolve the raw parameters against a resource's searchable fields.
    #[must_use]
    pub fn to_list_query(&self, searchable_fields: &[&str], paging: &PagingConfig) -> ListQuery {
        ListQuery {
            filters: parse_filters_json(self.filters.as_deref()),
            search: SearchSpec::new(self.search.clone(), self.exact_match(), searchable_fields),
            sort: SortSpec::new(self.sort_column.clone(), self.sort_direction.as_deref()),
            page: PageRequest::from_params(self.page, self.page_size, paging.default_page_size, paging.max_page_size),
        }
    }
}

/// Body of `PATCH /batch`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BulkUpdateRequest {
    /// Primary keys of the rows to update
    #[serde(default)]
    pub ids: Option<Vec<i32>>,
    /// Column to set
    #[serde(default)]
    pub field: Option<String>,
    /// New value, checked against the column type
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Body of `DELETE /batch`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BulkUpdateResponse {
    pub message: String,
    pub updated: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted: u64,
}

/// One entry of `GET /api/resources`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceInfo {
    pub name: &'static str,
    pub path: String,
    pub description: &'static str,
    pub searchable_fields: Vec<&'static str>,
    pub relations: Vec<&'static str>,
}
