use crate::criteria::fields;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A typed record with dynamic field values, tracked within a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: Uuid,
    pub space_id: Uuid,
    /// Unique per space, assigned on creation
    pub number: i32,
    pub type_id: Uuid,
    /// Optimistic locking version
    pub version: i32,

    // Hierarchy
    pub parent_id: Option<Uuid>,

    /// Field values keyed by field path (e.g. "system.state")
    pub fields: Map<String, Value>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkItem {
    pub fn new(
        space_id: Uuid,
        type_id: Uuid,
        fields: Map<String, Value>,
        parent_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            space_id,
            number: 0,
            type_id,
            version: 1,
            parent_id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn field(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    pub fn title(&self) -> Option<&str> {
        self.field(fields::TITLE).and_then(Value::as_str)
    }

    pub fn state(&self) -> Option<&str> {
        self.field(fields::STATE).and_then(Value::as_str)
    }

    /// Merge field values into this item. A `null` value removes the field.
    pub fn merge_fields(&mut self, updates: Map<String, Value>) {
        for (path, value) in updates {
            if value.is_null() {
                self.fields.remove(&path);
            } else {
                self.fields.insert(path, value);
            }
        }
    }
}
