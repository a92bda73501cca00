//! Query parameter names recognized by the work item listing.

pub const SPACE: &str = "spacesID";

pub const FILTER: &str = "filter";
pub const FILTER_EXPRESSION: &str = "filter[expression]";
pub const FILTER_ASSIGNEE: &str = "filter[assignee]";
pub const FILTER_ITERATION: &str = "filter[iteration]";
pub const FILTER_WORK_ITEM_TYPE: &str = "filter[workitemtype]";
pub const FILTER_WORK_ITEM_STATE: &str = "filter[workitemstate]";
pub const FILTER_AREA: &str = "filter[area]";
pub const FILTER_PARENT_EXISTS: &str = "filter[parentexists]";

pub const PAGE_OFFSET: &str = "page[offset]";
pub const PAGE_LIMIT: &str = "page[limit]";
pub const PAGE_NUMBER: &str = "page[number]";
pub const PAGE_SIZE: &str = "page[size]";

/// Assignee value selecting work items with nobody assigned
pub const ASSIGNEE_NONE: &str = "none";
