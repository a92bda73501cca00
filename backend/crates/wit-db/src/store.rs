//! Listing collaborators backed by the repositories.

use crate::repositories::iteration_repository::IterationRepository;
use crate::repositories::work_item_repository::WorkItemRepository;

use wit_core::{Expression, IterationHierarchy, Page, Result as CoreResult, WorkItem, WorkItemStore};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl WorkItemStore for WorkItemRepository {
    async fn list(
        &self,
        space_id: Uuid,
        expression: &Expression,
        parent_exists: Option<bool>,
        page: Page,
    ) -> CoreResult<(Vec<WorkItem>, u64)> {
        Ok(WorkItemRepository::list(self, space_id, expression, parent_exists, page).await?)
    }
}

#[async_trait]
impl IterationHierarchy for IterationRepository {
    async fn load_descendants(&self, iteration_id: Uuid) -> CoreResult<Vec<Uuid>> {
        Ok(IterationRepository::load_descendants(self, iteration_id).await?)
    }
}
