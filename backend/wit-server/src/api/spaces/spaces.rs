//! Space REST API handlers

use crate::api::query;
use crate::{
    ApiError, ApiResult, AppState, CreateSpaceRequest, DataResponse, ListMeta, ListResponse,
    SpaceDto, UpdateSpaceRequest,
};

use wit_core::{LinkCalculator, PagingNormalizer, PagingParams, Space, StickyFragments};
use wit_db::SpaceRepository;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use log::info;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 200;

fn validate_name(name: &str) -> ApiResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Space name must not be empty", "name"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ApiError::validation(
            format!("Space name must be at most {} characters", MAX_NAME_LENGTH),
            "name",
        ));
    }
    Ok(name.to_string())
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/spaces
///
/// One page of spaces with navigation links
pub async fn list_spaces(
    State(state): State<AppState>,
    Query(raw): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ListResponse<SpaceDto>>> {
    let page = PagingNormalizer::new(state.limits)
        .normalize(&PagingParams::from_pairs(query::pairs(&raw)))?;

    let repo = SpaceRepository::new(state.pool.clone());
    let (spaces, total_count) = repo.list(page).await?;

    let links = LinkCalculator::new(state.limits).links(
        spaces.len(),
        &page,
        total_count,
        &state.url("/api/spaces"),
        &StickyFragments::new(),
    );

    Ok(Json(ListResponse {
        data: spaces.into_iter().map(SpaceDto::from).collect(),
        links,
        meta: ListMeta { total_count },
    }))
}

/// POST /api/spaces
pub async fn create_space(
    State(state): State<AppState>,
    Json(req): Json<CreateSpaceRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<SpaceDto>>)> {
    let name = validate_name(&req.name)?;
    let owner_id = req.owner_id.as_deref().map(Uuid::parse_str).transpose()?;

    let space = Space::new(name, req.description, owner_id);
    SpaceRepository::new(state.pool.clone())
        .create(&space)
        .await?;

    info!("Created space {} ({})", space.name, space.id);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: space.into() }),
    ))
}

/// GET /api/spaces/{space_id}
pub async fn get_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<SpaceDto>>> {
    let space_id = Uuid::parse_str(&id)?;

    let space = SpaceRepository::new(state.pool.clone())
        .find_by_id(space_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Space {} not found", id)))?;

    Ok(Json(DataResponse { data: space.into() }))
}

/// PATCH /api/spaces/{space_id}
///
/// Fails with 409 when `version` is stale
pub async fn update_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSpaceRequest>,
) -> ApiResult<Json<DataResponse<SpaceDto>>> {
    let space_id = Uuid::parse_str(&id)?;
    let repo = SpaceRepository::new(state.pool.clone());

    let mut space = repo
        .find_by_id(space_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Space {} not found", id)))?;

    if let Some(name) = req.name.as_deref() {
        space.name = validate_name(name)?;
    }
    if let Some(description) = req.description {
        space.description = Some(description);
    }
    space.version = req.version;
    space.updated_at = Utc::now();

    let updated = repo.update(&space).await?;

    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// DELETE /api/spaces/{space_id}
///
/// Removes the space with its iterations and work items
pub async fn delete_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let space_id = Uuid::parse_str(&id)?;

    SpaceRepository::new(state.pool.clone())
        .delete(space_id)
        .await?;

    info!("Deleted space {}", space_id);
    Ok(StatusCode::NO_CONTENT)
}
