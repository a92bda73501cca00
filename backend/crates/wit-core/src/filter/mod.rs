pub mod builder;
pub mod context;
pub mod search_expression;
pub mod simple_query;

/// Most field predicates a single `filter` or `filter[expression]` value may
/// contain.
pub const MAX_PREDICATES: usize = 100;

/// Most values a single sequence literal may list.
pub const MAX_SEQUENCE_VALUES: usize = 100;

pub use builder::{BuiltFilter, FilterBuilder};
pub use context::{WorkItemListContext, WorkItemListContextBuilder};
