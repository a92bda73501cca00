use crate::{
    AppState, create_iteration, create_space, create_work_item, delete_space, get_space,
    get_work_item, health, list_iterations, list_space_work_items, list_spaces, list_work_items,
    update_space, update_work_item,
};

use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check endpoints
        .route("/ping", get(health::pong))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Spaces
        .route("/api/spaces", get(list_spaces).post(create_space))
        .route(
            "/api/spaces/{space_id}",
            get(get_space).patch(update_space).delete(delete_space),
        )
        .route(
            "/api/spaces/{space_id}/iterations",
            get(list_iterations).post(create_iteration),
        )
        .route(
            "/api/spaces/{space_id}/workitems",
            get(list_space_work_items).post(create_work_item),
        )
        // Work items
        .route("/api/workitems", get(list_work_items))
        .route(
            "/api/workitems/{id}",
            get(get_work_item).patch(update_work_item),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(request_timeout),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn handle_timeout(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    }
}
