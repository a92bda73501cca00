mod common;

use common::{create_test_pool, insert_iteration, insert_space};

use wit_core::{Iteration, IterationHierarchy};
use wit_db::{DbError, IterationRepository};

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_iteration_tree_when_loading_descendants_then_returns_all_levels() {
    // Given: root -> (a -> a1, b)
    let pool = create_test_pool().await;
    let space = insert_space(&pool).await;
    let root = insert_iteration(&pool, space.id, None).await;
    let a = insert_iteration(&pool, space.id, Some(root.id)).await;
    let b = insert_iteration(&pool, space.id, Some(root.id)).await;
    let a1 = insert_iteration(&pool, space.id, Some(a.id)).await;
    let repo = IterationRepository::new(pool);

    // When
    let descendants = repo.load_descendants(root.id).await.unwrap();

    // Then: children first, grandchildren after
    assert_that!(descendants.len(), eq(3));
    assert_that!(descendants[2], eq(a1.id));
    assert!(descendants[..2].contains(&a.id));
    assert!(descendants[..2].contains(&b.id));
}

#[tokio::test]
async fn given_leaf_iteration_when_loading_descendants_then_empty() {
    let pool = create_test_pool().await;
    let space = insert_space(&pool).await;
    let leaf = insert_iteration(&pool, space.id, None).await;
    let repo = IterationRepository::new(pool);

    let descendants = repo.load_descendants(leaf.id).await.unwrap();

    assert_that!(descendants, is_empty());
}

#[tokio::test]
async fn given_unknown_iteration_when_loading_descendants_then_not_found() {
    let pool = create_test_pool().await;
    let repo = IterationRepository::new(pool);

    let result = repo.load_descendants(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test]
async fn given_unknown_iteration_when_used_as_hierarchy_then_core_not_found() {
    let pool = create_test_pool().await;
    let repo = IterationRepository::new(pool);
    let hierarchy: &dyn IterationHierarchy = &repo;

    let error = hierarchy.load_descendants(Uuid::new_v4()).await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn given_parent_in_other_space_when_creating_then_rejected() {
    // Given
    let pool = create_test_pool().await;
    let space_a = insert_space(&pool).await;
    let space_b = insert_space(&pool).await;
    let parent = insert_iteration(&pool, space_a.id, None).await;
    let repo = IterationRepository::new(pool);

    // When
    let child = Iteration::new(space_b.id, Some(parent.id), "child".to_string());
    let result = repo.create(&child).await;

    // Then
    assert!(matches!(result, Err(DbError::Invalid { .. })));
}

#[tokio::test]
async fn given_space_with_iterations_when_finding_by_space_then_only_that_space() {
    let pool = create_test_pool().await;
    let space_a = insert_space(&pool).await;
    let space_b = insert_space(&pool).await;
    insert_iteration(&pool, space_a.id, None).await;
    insert_iteration(&pool, space_a.id, None).await;
    insert_iteration(&pool, space_b.id, None).await;
    let repo = IterationRepository::new(pool);

    let found = repo.find_by_space(space_a.id).await.unwrap();

    assert_that!(found.len(), eq(2));
    assert!(found.iter().all(|i| i.space_id == space_a.id));
}
