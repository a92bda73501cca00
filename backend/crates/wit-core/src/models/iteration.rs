use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time box inside a space. Iterations nest: each one may have a parent,
/// forming one tree per space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iteration {
    pub id: Uuid,
    pub space_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Iteration {
    pub fn new(space_id: Uuid, parent_id: Option<Uuid>, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            space_id,
            parent_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}
