pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod metrics_timer;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    iterations::{
        create_iteration_request::CreateIterationRequest,
        iteration_dto::IterationDto,
        iterations::{create_iteration, list_iterations},
    },
    list_response::{DataResponse, ListMeta, ListResponse},
    spaces::{
        create_space_request::CreateSpaceRequest,
        space_dto::SpaceDto,
        spaces::{create_space, delete_space, get_space, list_spaces, update_space},
        update_space_request::UpdateSpaceRequest,
    },
    work_items::{
        create_work_item_request::CreateWorkItemRequest,
        update_work_item_request::UpdateWorkItemRequest,
        work_item_dto::WorkItemDto,
        work_items::{
            create_work_item, get_work_item, list_space_work_items, list_work_items,
            update_work_item,
        },
    },
};
pub use app_state::AppState;
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use routes::build_router;
