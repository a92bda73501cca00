use wit_core::NavigationLinks;

use serde::Serialize;

/// A single resource
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// One page of a paginated collection
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub links: NavigationLinks,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total_count: u64,
}
