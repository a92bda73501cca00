#![allow(dead_code)]

use wit_core::{Iteration, Space, WorkItem};
use wit_db::{IterationRepository, SpaceRepository, WorkItemRepository};

use serde_json::{Map, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates a test Space
pub fn create_test_space() -> Space {
    Space::new(
        format!("space-{}", Uuid::new_v4()),
        Some("Test space description".to_string()),
        None,
    )
}

/// Inserts a fresh space and returns it
pub async fn insert_space(pool: &SqlitePool) -> Space {
    let space = create_test_space();
    SpaceRepository::new(pool.clone())
        .create(&space)
        .await
        .expect("Failed to create test space");
    space
}

/// Inserts an iteration under `parent` (or at the root) and returns it
pub async fn insert_iteration(pool: &SqlitePool, space_id: Uuid, parent: Option<Uuid>) -> Iteration {
    let iteration = Iteration::new(space_id, parent, format!("iteration-{}", Uuid::new_v4()));
    IterationRepository::new(pool.clone())
        .create(&iteration)
        .await
        .expect("Failed to create test iteration");
    iteration
}

/// Builds a field map from a JSON object literal
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Inserts a work item with the given fields and returns the stored item
pub async fn insert_work_item(
    pool: &SqlitePool,
    space_id: Uuid,
    type_id: Uuid,
    values: Value,
) -> WorkItem {
    let item = WorkItem::new(space_id, type_id, fields(values), None);
    WorkItemRepository::new(pool.clone())
        .create(&item)
        .await
        .expect("Failed to create test work item")
}
