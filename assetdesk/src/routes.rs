use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::config::PagingConfig;
use crate::core::{Filterable, bulk_delete, bulk_update};
use crate::errors::ApiError;
use crate::filtering::{FilterClause, Page, PageMeta, filter_and_paginate};
use crate::models::{
    BulkDeleteRequest, BulkDeleteResponse, BulkUpdateRequest, BulkUpdateResponse, ListParams, ResourceInfo,
};
use crate::registry::EntityKind;
use crate::schema::{ColumnMetadataProvider, DatabaseMetadataProvider};

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub metadata: Arc<dyn ColumnMetadataProvider>,
    pub paging: PagingConfig,
}

impl AppState {
    /// State whose column metadata is read from `db` itself.
    #[must_use]
    pub fn new(db: DatabaseConnection, paging: PagingConfig) -> Self {
        let metadata = Arc::new(DatabaseMetadataProvider::new(db.clone()));
        Self { db, metadata, paging }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Arc<dyn ColumnMetadataProvider>) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "assetdesk", description = "Facility and asset back office API"),
    components(schemas(
        FilterClause,
        PageMeta,
        BulkUpdateRequest,
        BulkUpdateResponse,
        BulkDeleteRequest,
        BulkDeleteResponse,
        ResourceInfo
    ))
)]
pub struct ApiDoc;

/// List one page of a resource.
pub async fn list_handler<R: Filterable>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<JsonValue>>, ApiError> {
    let list = params.to_list_query(&R::searchable_fields(), &state.paging);
    let page = filter_and_paginate(&state.db, R::base_query(), &list, &R::scope())
        .await
        .map_err(ApiError::database)?;
    Ok(Json(page))
}

/// Set one column on many rows.
pub async fn bulk_update_handler<R: Filterable>(
    State(state): State<AppState>,
    Json(request): Json<BulkUpdateRequest>,
) -> Result<Json<BulkUpdateResponse>, ApiError> {
    let response = bulk_update::<R>(&state.db, state.metadata.as_ref(), request).await?;
    Ok(Json(response))
}

/// Delete many rows.
pub async fn bulk_delete_handler<R: Filterable>(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    let response = bulk_delete::<R>(&state.db, request).await?;
    Ok(Json(response))
}

/// Describe every registered resource.
pub async fn resources_handler() -> Json<Vec<ResourceInfo>> {
    Json(EntityKind::ALL.iter().map(|kind| kind.info()).collect())
}

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `GET /`, `PATCH /batch` and `DELETE /batch` for one resource.
#[must_use]
pub fn resource_router<R: Filterable>() -> Router<AppState> {
    Router::new().route("/", get(list_handler::<R>)).route(
        "/batch",
        axum::routing::patch(bulk_update_handler::<R>).delete(bulk_delete_handler::<R>),
    )
}

/// The complete application router.
#[must_use]
pub fn api_router(state: AppState) -> Router {
    let api = EntityKind::ALL.iter().fold(
        Router::new().route("/resources", get(resources_handler)),
        |api, kind| api.nest(&format!("/{}", kind.plural()), kind.router()),
    );

    Router::new()
        .nest("/api", api)
        .route("/api-docs/openapi.json", get(openapi_handler))
        .with_state(state)
}
