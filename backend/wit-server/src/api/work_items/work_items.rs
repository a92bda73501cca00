//! Work item REST API handlers, including the filtered listing.

use crate::api::query;
use crate::{
    ApiError, ApiResult, AppState, CreateWorkItemRequest, DataResponse, ListMeta, ListResponse,
    MetricsTimer, UpdateWorkItemRequest, WorkItemDto,
};

use wit_core::criteria::fields::is_valid_path;
use wit_core::{WorkItem, WorkItemListContext, WorkItemListContextBuilder, WorkItemListing};
use wit_db::{IterationRepository, SpaceRepository, WorkItemRepository};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use log::{debug, info};
use serde_json::{Map, Value};
use uuid::Uuid;

fn validate_fields(fields: &Map<String, Value>) -> ApiResult<()> {
    match fields.keys().find(|key| !is_valid_path(key)) {
        Some(key) => Err(ApiError::validation(
            format!("Invalid field name '{}'", key),
            "fields",
        )),
        None => Ok(()),
    }
}

// =============================================================================
// Listing
// =============================================================================

/// GET /api/spaces/{space_id}/workitems
///
/// Filtered, paginated listing scoped to the space in the path
pub async fn list_space_work_items(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Query(raw): Query<Vec<(String, String)>>,
) -> Response {
    let builder = WorkItemListContext::builder()
        .space_id(space_id)
        .params(query::pairs(&raw));
    list(state, builder).await
}

/// GET /api/workitems?spacesID=...
///
/// Same listing with the space taken from the query string
pub async fn list_work_items(
    State(state): State<AppState>,
    Query(raw): Query<Vec<(String, String)>>,
) -> Response {
    let builder = WorkItemListContext::builder().params(query::pairs(&raw));
    list(state, builder).await
}

async fn list(state: AppState, builder: WorkItemListContextBuilder) -> Response {
    let metrics = state.metrics.clone();
    metrics.listing_requested();
    let timer = MetricsTimer::new(metrics.clone());

    let response = match run_listing(&state, builder).await {
        Ok(body) => {
            metrics.listing_served(body.data.len());
            (
                [(header::CACHE_CONTROL, state.api.cache_control.clone())],
                Json(body),
            )
                .into_response()
        }
        Err(e) => {
            metrics.error_occurred(e.code());
            e.into_response()
        }
    };

    timer.finish();
    response
}

async fn run_listing(
    state: &AppState,
    builder: WorkItemListContextBuilder,
) -> ApiResult<ListResponse<WorkItemDto>> {
    let context = builder.build()?;

    SpaceRepository::new(state.pool.clone())
        .find_by_id(context.space_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Space {} not found", context.space_id)))?;

    let store = WorkItemRepository::new(state.pool.clone());
    let hierarchy = IterationRepository::new(state.pool.clone());
    let listing = WorkItemListing::new(&store, &hierarchy, state.limits);

    // Links always point at the space-scoped route
    let base = state.url(&format!("/api/spaces/{}/workitems", context.space_id));
    let result = listing.list(&context, &base).await?;

    debug!(
        "Listed {} of {} work items in space {}",
        result.items.len(),
        result.total_count,
        context.space_id
    );

    Ok(ListResponse {
        data: result.items.into_iter().map(WorkItemDto::from).collect(),
        links: result.links,
        meta: ListMeta {
            total_count: result.total_count,
        },
    })
}

// =============================================================================
// Single work items
// =============================================================================

/// POST /api/spaces/{space_id}/workitems
pub async fn create_work_item(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(req): Json<CreateWorkItemRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<WorkItemDto>>)> {
    let space_id = Uuid::parse_str(&space_id)?;
    let type_id = Uuid::parse_str(&req.type_id)?;
    let parent_id = req.parent_id.as_deref().map(Uuid::parse_str).transpose()?;
    validate_fields(&req.fields)?;

    let item = WorkItem::new(space_id, type_id, req.fields, parent_id);
    let created = WorkItemRepository::new(state.pool.clone())
        .create(&item)
        .await?;

    info!(
        "Created work item #{} ({}) in space {}",
        created.number, created.id, space_id
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: created.into(),
        }),
    ))
}

/// GET /api/workitems/{id}
pub async fn get_work_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<WorkItemDto>>> {
    let work_item_id = Uuid::parse_str(&id)?;

    let item = WorkItemRepository::new(state.pool.clone())
        .find_by_id(work_item_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Work item {} not found", id)))?;

    Ok(Json(DataResponse { data: item.into() }))
}

/// PATCH /api/workitems/{id}
///
/// Fails with 409 when `version` is stale
pub async fn update_work_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWorkItemRequest>,
) -> ApiResult<Json<DataResponse<WorkItemDto>>> {
    let work_item_id = Uuid::parse_str(&id)?;
    validate_fields(&req.fields)?;
    let repo = WorkItemRepository::new(state.pool.clone());

    let mut item = repo
        .find_by_id(work_item_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Work item {} not found", id)))?;

    if let Some(type_id) = req.type_id.as_deref() {
        item.type_id = Uuid::parse_str(type_id)?;
    }
    item.merge_fields(req.fields);
    item.version = req.version;
    item.updated_at = Utc::now();

    let updated = repo.update(&item).await?;

    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}
