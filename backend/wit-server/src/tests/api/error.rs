use crate::ApiError;

use wit_core::CoreError;
use wit_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "Item not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Item not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let error = ApiError::validation("Name must not be empty", "name");

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn given_conflict_when_rendered_then_409_with_version() {
    let error = ApiError::Conflict {
        message: "Version mismatch".into(),
        current_version: 5,
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert!(json["error"]["message"].as_str().unwrap().contains("5"));
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_500() {
    let error = ApiError::Internal {
        message: "Database operation failed".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn given_uuid_error_when_converted_then_validation() {
    let uuid_err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
    let api_err: ApiError = uuid_err.into();

    match api_err {
        ApiError::Validation { message, field, .. } => {
            assert!(message.contains("Invalid UUID"));
            assert!(field.is_none());
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn given_bad_parameter_when_converted_then_validation_on_that_parameter() {
    let api_err: ApiError = CoreError::bad_parameter("page[limit]", "not a number").into();

    assert_that!(api_err.code(), eq("VALIDATION_ERROR"));
    match api_err {
        ApiError::Validation { field, .. } => {
            assert_that!(field.as_deref(), some(eq("page[limit]")));
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn given_bad_input_without_parameter_when_converted_then_bad_request() {
    let api_err: ApiError = CoreError::bad_input("malformed").into();

    assert_that!(api_err.code(), eq("BAD_REQUEST"));
}

#[test]
fn given_core_errors_when_converted_then_codes_follow_taxonomy() {
    let not_found: ApiError = CoreError::not_found("Iteration", "abc").into();
    let conflict: ApiError = CoreError::conflict("WorkItem", "abc", 3).into();
    let storage: ApiError = CoreError::storage("disk I/O error").into();

    assert_that!(not_found.code(), eq("NOT_FOUND"));
    assert_that!(conflict.code(), eq("CONFLICT"));
    assert_that!(storage.code(), eq("INTERNAL_ERROR"));
}

#[tokio::test]
async fn given_storage_error_when_rendered_then_details_are_hidden() {
    let api_err: ApiError = CoreError::storage("disk I/O error at /var/lib/wit.db").into();

    let (_, json) = body_json(api_err).await;

    assert_eq!(json["error"]["message"], "Database operation failed");
}

#[test]
fn given_db_errors_when_converted_then_codes_follow_taxonomy() {
    let not_found: ApiError = DbError::not_found("Space", "abc").into();
    let invalid: ApiError = DbError::invalid("bad field").into();
    let row_not_found: ApiError = DbError::from(sqlx::Error::RowNotFound).into();

    assert_that!(not_found.code(), eq("NOT_FOUND"));
    assert_that!(invalid.code(), eq("BAD_REQUEST"));
    assert_that!(row_not_found.code(), eq("NOT_FOUND"));
}
