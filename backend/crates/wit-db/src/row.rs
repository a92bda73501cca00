//! Column decoding shared by the repositories.

use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub(crate) fn uuid(row: &SqliteRow, column: &str) -> DbErrorResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|e| DbError::corrupt_row(format!("Invalid UUID in {}: {}", column, e)))
}

pub(crate) fn optional_uuid(row: &SqliteRow, column: &str) -> DbErrorResult<Option<Uuid>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|s| {
        Uuid::parse_str(&s)
            .map_err(|e| DbError::corrupt_row(format!("Invalid UUID in {}: {}", column, e)))
    })
    .transpose()
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> DbErrorResult<DateTime<Utc>> {
    let raw: i64 = row.try_get(column)?;
    DateTime::<Utc>::from_timestamp(raw, 0)
        .ok_or_else(|| DbError::corrupt_row(format!("Invalid timestamp in {}", column)))
}

pub(crate) fn int(row: &SqliteRow, column: &str) -> DbErrorResult<i32> {
    let raw: i64 = row.try_get(column)?;
    i32::try_from(raw)
        .map_err(|_| DbError::corrupt_row(format!("Integer out of range in {}: {}", column, raw)))
}
