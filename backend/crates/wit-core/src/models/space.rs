//! Space entity - the top-level container scoping all work items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<Uuid>,
    /// Optimistic locking version
    pub version: i32,
    /// Next per-space work item number to hand out
    pub next_work_item_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Space {
    pub fn new(name: String, description: Option<String>, owner_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            owner_id,
            version: 1,
            next_work_item_number: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
