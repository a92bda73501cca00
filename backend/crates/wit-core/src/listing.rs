//! Work item listing: paging, filtering, fetching and link computation
//! composed into one call.

use crate::criteria::Expression;
use crate::error::Result as CoreResult;
use crate::filter::{FilterBuilder, WorkItemListContext};
use crate::links::{LinkCalculator, NavigationLinks};
use crate::models::work_item::WorkItem;
use crate::paging::{Page, PageLimits, PagingNormalizer};

use async_trait::async_trait;
use uuid::Uuid;

/// Storage collaborator returning one page of matching work items and the
/// total number of matches.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    /// `parent_exists == Some(false)` restricts the result to work items
    /// without a parent. `Some(true)` and `None` add no restriction.
    async fn list(
        &self,
        space_id: Uuid,
        expression: &Expression,
        parent_exists: Option<bool>,
        page: Page,
    ) -> CoreResult<(Vec<WorkItem>, u64)>;
}

/// Iteration tree lookup used to expand an iteration filter.
#[async_trait]
pub trait IterationHierarchy: Send + Sync {
    /// All transitive descendants of `iteration_id`, excluding itself.
    /// Fails with NotFound when the iteration does not exist.
    async fn load_descendants(&self, iteration_id: Uuid) -> CoreResult<Vec<Uuid>>;
}

#[derive(Debug, Clone)]
pub struct WorkItemListResult {
    pub items: Vec<WorkItem>,
    pub total_count: u64,
    pub page: Page,
    pub links: NavigationLinks,
}

pub struct WorkItemListing<'a> {
    store: &'a dyn WorkItemStore,
    hierarchy: &'a dyn IterationHierarchy,
    normalizer: PagingNormalizer,
    links: LinkCalculator,
}

impl<'a> WorkItemListing<'a> {
    pub fn new(
        store: &'a dyn WorkItemStore,
        hierarchy: &'a dyn IterationHierarchy,
        limits: PageLimits,
    ) -> Self {
        Self {
            store,
            hierarchy,
            normalizer: PagingNormalizer::new(limits),
            links: LinkCalculator::new(limits),
        }
    }

    /// List one page of work items for `context`. Links are rendered under
    /// `base_path`.
    pub async fn list(
        &self,
        context: &WorkItemListContext,
        base_path: &str,
    ) -> CoreResult<WorkItemListResult> {
        let page = self.normalizer.normalize(&context.paging)?;
        let filter = FilterBuilder::new(self.hierarchy).build(context).await?;

        let (items, total_count) = self
            .store
            .list(
                context.space_id,
                &filter.expression,
                context.parent_exists,
                page,
            )
            .await?;

        let links = self
            .links
            .links(items.len(), &page, total_count, base_path, &filter.sticky);

        Ok(WorkItemListResult {
            items,
            total_count,
            page,
            links,
        })
    }
}
