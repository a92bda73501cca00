//! Integration tests for the work item listing and work item handlers
mod common;

use crate::common::{
    create_iteration, create_space, create_test_app_state, create_test_app_state_with,
    create_work_item, get, send,
};

use wit_config::Config;

use axum::http::{StatusCode, header};
use googletest::prelude::*;
use serde_json::json;
use uuid::Uuid;

const TYPE_ID: &str = "00000000-0000-0000-0000-0000000000aa";

fn numbers(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["number"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn given_five_items_when_listing_with_limit_two_then_first_page_and_links() {
    // Given
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Listing").await;
    for _ in 0..5 {
        create_work_item(&state, &space_id, TYPE_ID, json!({})).await;
    }

    // When
    let response = get(
        &state,
        &format!("/api/spaces/{}/workitems?page%5Blimit%5D=2", space_id),
    )
    .await;

    // Then
    assert_that!(response.status, eq(StatusCode::OK));
    assert_that!(numbers(&response.json), eq(&vec![5, 4]));
    assert_that!(response.json["meta"]["totalCount"].as_u64(), some(eq(5)));

    let base = format!("/api/spaces/{}/workitems", space_id);
    let links = &response.json["links"];
    assert_eq!(links["first"], format!("{base}?page[offset]=0&page[limit]=2"));
    assert_eq!(links["next"], format!("{base}?page[offset]=2&page[limit]=2"));
    assert_eq!(links["last"], format!("{base}?page[offset]=4&page[limit]=2"));
    assert!(links.get("prev").is_none());
}

#[tokio::test]
async fn given_listing_when_served_then_cache_control_header_is_set() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Cache").await;

    let response = get(&state, &format!("/api/spaces/{}/workitems", space_id)).await;

    assert_that!(response.status, eq(StatusCode::OK));
    assert_eq!(
        response.headers.get(header::CACHE_CONTROL).unwrap(),
        "max-age=2"
    );
}

#[tokio::test]
async fn given_last_page_when_listing_then_prev_but_no_next() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Last page").await;
    for _ in 0..5 {
        create_work_item(&state, &space_id, TYPE_ID, json!({})).await;
    }

    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?page%5Boffset%5D=4&page%5Blimit%5D=2",
            space_id
        ),
    )
    .await;

    let links = &response.json["links"];
    assert_that!(numbers(&response.json), eq(&vec![1]));
    assert!(links.get("next").is_none());
    assert_eq!(
        links["prev"],
        format!("/api/spaces/{}/workitems?page[offset]=2&page[limit]=2", space_id)
    );
}

#[tokio::test]
async fn given_state_filter_when_listing_then_filtered_and_links_keep_filter() {
    // Given
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "States").await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.state": "open"})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.state": "closed"})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.state": "open"})).await;

    // When
    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?filter%5Bworkitemstate%5D=open",
            space_id
        ),
    )
    .await;

    // Then
    assert_that!(response.status, eq(StatusCode::OK));
    assert_that!(numbers(&response.json), eq(&vec![3, 1]));
    let first = response.json["links"]["first"].as_str().unwrap();
    assert!(first.ends_with("&filter[workitemstate]=open"));
}

#[tokio::test]
async fn given_assignee_none_when_listing_then_only_unassigned_items() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Assignees").await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.assignees": ["u1"]})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.assignees": []})).await;

    let response = get(
        &state,
        &format!("/api/spaces/{}/workitems?filter%5Bassignee%5D=none", space_id),
    )
    .await;

    assert_that!(numbers(&response.json), eq(&vec![3, 2]));
}

#[tokio::test]
async fn given_assignee_when_listing_then_items_assigned_to_them() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Assignees").await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.assignees": ["u1", "u2"]}))
        .await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.assignees": ["u2"]})).await;

    let response = get(
        &state,
        &format!("/api/spaces/{}/workitems?filter%5Bassignee%5D=u1", space_id),
    )
    .await;

    assert_that!(numbers(&response.json), eq(&vec![1]));
}

#[tokio::test]
async fn given_iteration_with_child_when_listing_then_descendant_items_included() {
    // Given: root -> child, plus an unrelated iteration
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Iterations").await;
    let root = create_iteration(&state, &space_id, None).await;
    let child = create_iteration(&state, &space_id, Some(&root)).await;
    let other = create_iteration(&state, &space_id, None).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.iteration": root})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.iteration": child})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.iteration": other})).await;

    // When
    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?filter%5Biteration%5D={}",
            space_id, root
        ),
    )
    .await;

    // Then
    assert_that!(response.status, eq(StatusCode::OK));
    assert_that!(numbers(&response.json), eq(&vec![2, 1]));
    let first = response.json["links"]["first"].as_str().unwrap();
    assert!(first.contains(&format!("filter[iteration]={}", root)));
}

#[tokio::test]
async fn given_unknown_iteration_when_listing_then_404() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Iterations").await;

    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?filter%5Biteration%5D={}",
            space_id,
            Uuid::new_v4()
        ),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::NOT_FOUND));
    assert_eq!(response.json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn given_simple_query_filter_when_listing_then_matching_items() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Query").await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.state": "open"})).await;
    create_work_item(&state, &space_id, TYPE_ID, json!({"system.state": "closed"})).await;

    // filter={"system.state":"closed"}
    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?filter=%7B%22system.state%22%3A%22closed%22%7D",
            space_id
        ),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::OK));
    assert_that!(numbers(&response.json), eq(&vec![2]));
}

#[tokio::test]
async fn given_malformed_filter_when_listing_then_400_on_filter() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Query").await;

    let response = get(
        &state,
        &format!("/api/spaces/{}/workitems?filter=%7Bnot-json", space_id),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(response.json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(response.json["error"]["field"], "filter");
}

#[tokio::test]
async fn given_expression_over_predicate_limit_when_listing_then_400_on_expression() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Wide").await;
    let operands: Vec<String> = (0..=wit_core::filter::MAX_PREDICATES)
        .map(|i| format!(r#"{{"system.area":"a{i}"}}"#))
        .collect();
    let expression = format!(r#"{{"$OR":[{}]}}"#, operands.join(","));

    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?filter%5Bexpression%5D={}",
            space_id,
            urlencoding::encode(&expression)
        ),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(response.json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(response.json["error"]["field"], "filter[expression]");
}

#[tokio::test]
async fn given_unparsable_limit_when_listing_then_400_on_limit() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Paging").await;

    let response = get(
        &state,
        &format!("/api/spaces/{}/workitems?page%5Blimit%5D=ten", space_id),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(response.json["error"]["field"], "page[limit]");
}

#[tokio::test]
async fn given_invalid_space_id_when_listing_then_400_on_space() {
    let state = create_test_app_state().await;

    let response = get(&state, "/api/spaces/not-a-uuid/workitems").await;

    assert_that!(response.status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(response.json["error"]["field"], "spacesID");
}

#[tokio::test]
async fn given_unknown_space_when_listing_then_404() {
    let state = create_test_app_state().await;

    let response = get(
        &state,
        &format!("/api/spaces/{}/workitems", Uuid::new_v4()),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn given_spaces_id_query_when_listing_then_same_result_as_path_route() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Query route").await;
    create_work_item(&state, &space_id, TYPE_ID, json!({})).await;

    let response = get(&state, &format!("/api/workitems?spacesID={}", space_id)).await;

    assert_that!(response.status, eq(StatusCode::OK));
    assert_that!(numbers(&response.json), eq(&vec![1]));
    let first = response.json["links"]["first"].as_str().unwrap();
    assert!(first.starts_with(&format!("/api/spaces/{}/workitems?", space_id)));
}

#[tokio::test]
async fn given_no_space_when_listing_by_query_then_400() {
    let state = create_test_app_state().await;

    let response = get(&state, "/api/workitems").await;

    assert_that!(response.status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(response.json["error"]["field"], "spacesID");
}

#[tokio::test]
async fn given_service_url_when_listing_then_links_are_absolute() {
    let mut config = Config::default();
    config.api.service_url = "https://wit.example.com/".to_string();
    let state = create_test_app_state_with(config).await;
    let space_id = create_space(&state, "Absolute").await;

    let response = get(&state, &format!("/api/spaces/{}/workitems", space_id)).await;

    let first = response.json["links"]["first"].as_str().unwrap();
    assert!(first.starts_with(&format!(
        "https://wit.example.com/api/spaces/{}/workitems?",
        space_id
    )));
}

#[tokio::test]
async fn given_child_item_when_listing_without_parents_then_only_top_level() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Hierarchy").await;
    let parent = create_work_item(&state, &space_id, TYPE_ID, json!({})).await;
    let child = send(
        &state,
        "POST",
        &format!("/api/spaces/{}/workitems", space_id),
        Some(json!({ "type_id": TYPE_ID, "parent_id": parent["id"] })),
    )
    .await;
    assert_that!(child.status, eq(StatusCode::CREATED));

    let response = get(
        &state,
        &format!(
            "/api/spaces/{}/workitems?filter%5Bparentexists%5D=false",
            space_id
        ),
    )
    .await;

    assert_that!(numbers(&response.json), eq(&vec![1]));
}

// =============================================================================
// Single work items
// =============================================================================

#[tokio::test]
async fn given_created_item_when_fetched_then_fields_returned() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Items").await;
    let created =
        create_work_item(&state, &space_id, TYPE_ID, json!({"system.title": "Fix login"})).await;

    let response = get(
        &state,
        &format!("/api/workitems/{}", created["id"].as_str().unwrap()),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::OK));
    assert_eq!(response.json["data"]["fields"]["system.title"], "Fix login");
    assert_eq!(response.json["data"]["number"], 1);
}

#[tokio::test]
async fn given_missing_item_when_fetched_then_404() {
    let state = create_test_app_state().await;

    let response = get(&state, &format!("/api/workitems/{}", Uuid::new_v4())).await;

    assert_that!(response.status, eq(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn given_invalid_field_name_when_creating_then_400() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Items").await;

    let response = send(
        &state,
        "POST",
        &format!("/api/spaces/{}/workitems", space_id),
        Some(json!({ "type_id": TYPE_ID, "fields": { "bad name": 1 } })),
    )
    .await;

    assert_that!(response.status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(response.json["error"]["field"], "fields");
}

#[tokio::test]
async fn given_item_when_patched_then_fields_merged_and_version_bumped() {
    // Given
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Items").await;
    let created = create_work_item(
        &state,
        &space_id,
        TYPE_ID,
        json!({"system.title": "Old", "system.state": "open"}),
    )
    .await;
    let uri = format!("/api/workitems/{}", created["id"].as_str().unwrap());

    // When
    let response = send(
        &state,
        "PATCH",
        &uri,
        Some(json!({ "version": 1, "fields": { "system.title": "New", "system.state": null } })),
    )
    .await;

    // Then
    assert_that!(response.status, eq(StatusCode::OK));
    let data = &response.json["data"];
    assert_eq!(data["version"], 2);
    assert_eq!(data["fields"]["system.title"], "New");
    assert!(data["fields"].get("system.state").is_none());
}

#[tokio::test]
async fn given_stale_version_when_patched_then_409() {
    let state = create_test_app_state().await;
    let space_id = create_space(&state, "Items").await;
    let created = create_work_item(&state, &space_id, TYPE_ID, json!({})).await;
    let uri = format!("/api/workitems/{}", created["id"].as_str().unwrap());
    send(&state, "PATCH", &uri, Some(json!({ "version": 1 }))).await;

    let response = send(&state, "PATCH", &uri, Some(json!({ "version": 1 }))).await;

    assert_that!(response.status, eq(StatusCode::CONFLICT));
    assert_eq!(response.json["error"]["code"], "CONFLICT");
}
