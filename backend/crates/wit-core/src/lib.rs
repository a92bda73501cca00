pub mod criteria;
pub mod error;
pub mod filter;
pub mod links;
pub mod listing;
pub mod models;
pub mod paging;
pub mod params;
pub mod sticky;

pub use criteria::{Expression, Literal, Scalar};
pub use error::{CoreError, Result};
pub use filter::{BuiltFilter, FilterBuilder, WorkItemListContext, WorkItemListContextBuilder};
pub use links::{LinkCalculator, NavigationLinks, PageWindow, PageWindows};
pub use listing::{IterationHierarchy, WorkItemListResult, WorkItemListing, WorkItemStore};
pub use models::iteration::Iteration;
pub use models::space::Space;
pub use models::work_item::WorkItem;
pub use paging::{Page, PageLimits, PagingNormalizer, PagingParams};
pub use sticky::StickyFragments;
