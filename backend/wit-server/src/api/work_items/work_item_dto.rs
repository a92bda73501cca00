use wit_core::WorkItem;

use serde::Serialize;
use serde_json::{Map, Value};

/// Work item DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct WorkItemDto {
    pub id: String,
    pub space_id: String,
    pub number: i32,
    pub type_id: String,
    pub parent_id: Option<String>,
    pub version: i32,
    pub fields: Map<String, Value>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<WorkItem> for WorkItemDto {
    fn from(w: WorkItem) -> Self {
        Self {
            id: w.id.to_string(),
            space_id: w.space_id.to_string(),
            number: w.number,
            type_id: w.type_id.to_string(),
            parent_id: w.parent_id.map(|id| id.to_string()),
            version: w.version,
            fields: w.fields,
            created_at: w.created_at.timestamp(),
            updated_at: w.updated_at.timestamp(),
        }
    }
}
