pub mod error;
pub mod iterations;
pub mod list_response;
pub mod query;
pub mod spaces;
pub mod work_items;
