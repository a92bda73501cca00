//! Iteration REST API handlers

use crate::{ApiError, ApiResult, AppState, CreateIterationRequest, DataResponse, IterationDto};

use wit_core::Iteration;
use wit_db::{IterationRepository, SpaceRepository};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

async fn require_space(state: &AppState, space_id: Uuid) -> ApiResult<()> {
    SpaceRepository::new(state.pool.clone())
        .find_by_id(space_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("Space {} not found", space_id)))
}

/// GET /api/spaces/{space_id}/iterations
pub async fn list_iterations(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<IterationDto>>>> {
    let space_id = Uuid::parse_str(&space_id)?;
    require_space(&state, space_id).await?;

    let iterations = IterationRepository::new(state.pool.clone())
        .find_by_space(space_id)
        .await?;

    Ok(Json(DataResponse {
        data: iterations.into_iter().map(IterationDto::from).collect(),
    }))
}

/// POST /api/spaces/{space_id}/iterations
pub async fn create_iteration(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(req): Json<CreateIterationRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<IterationDto>>)> {
    let space_id = Uuid::parse_str(&space_id)?;
    require_space(&state, space_id).await?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation(
            "Iteration name must not be empty",
            "name",
        ));
    }
    let parent_id = req.parent_id.as_deref().map(Uuid::parse_str).transpose()?;

    let iteration = Iteration::new(space_id, parent_id, name.to_string());
    IterationRepository::new(state.pool.clone())
        .create(&iteration)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: iteration.into(),
        }),
    ))
}
