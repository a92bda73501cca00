use crate::criteria_sql::push_expression;
use crate::repositories::space_repository::SpaceRepository;
use crate::row;
use crate::{DbError, Result as DbErrorResult};

use wit_core::{Expression, Page, WorkItem};

use std::panic::Location;

use error_location::ErrorLocation;
use log::debug;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const COLUMNS: &str =
    "id, space_id, number, type_id, version, parent_id, fields, created_at, updated_at";

pub struct WorkItemRepository {
    pool: SqlitePool,
}

impl WorkItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert `work_item`, assigning it the next number of its space. Returns
    /// the stored item.
    pub async fn create(&self, work_item: &WorkItem) -> DbErrorResult<WorkItem> {
        let mut tx = self.pool.begin().await?;

        if let Some(parent_id) = work_item.parent_id {
            let parent_space: Option<String> =
                sqlx::query_scalar("SELECT space_id FROM work_items WHERE id = ?")
                    .bind(parent_id.to_string())
                    .fetch_optional(&mut *tx)
                    .await?;
            match parent_space {
                None => return Err(DbError::not_found("WorkItem", parent_id)),
                Some(space) if space != work_item.space_id.to_string() => {
                    return Err(DbError::invalid(format!(
                        "parent work item {} belongs to another space",
                        parent_id
                    )));
                }
                Some(_) => {}
            }
        }

        let number =
            SpaceRepository::get_and_increment_work_item_number(&mut tx, work_item.space_id)
                .await?;
        let fields = encode_fields(&work_item.fields)?;

        sqlx::query(
            r#"
                INSERT INTO work_items (
                    id, space_id, number, type_id, version, parent_id, fields,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(work_item.id.to_string())
        .bind(work_item.space_id.to_string())
        .bind(number)
        .bind(work_item.type_id.to_string())
        .bind(work_item.version)
        .bind(work_item.parent_id.map(|id| id.to_string()))
        .bind(fields)
        .bind(work_item.created_at.timestamp())
        .bind(work_item.updated_at.timestamp())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(WorkItem {
            number,
            ..work_item.clone()
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<WorkItem>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM work_items WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_work_item).transpose()
    }

    /// Persist `work_item` if its version still matches the stored one. The
    /// stored version is bumped and the updated item returned.
    pub async fn update(&self, work_item: &WorkItem) -> DbErrorResult<WorkItem> {
        let fields = encode_fields(&work_item.fields)?;

        let result = sqlx::query(
            r#"
              UPDATE work_items
              SET type_id = ?, parent_id = ?, fields = ?, version = version + 1,
                  updated_at = ?
              WHERE id = ? AND version = ?
              "#,
        )
        .bind(work_item.type_id.to_string())
        .bind(work_item.parent_id.map(|id| id.to_string()))
        .bind(fields)
        .bind(work_item.updated_at.timestamp())
        .bind(work_item.id.to_string())
        .bind(work_item.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(match self.find_by_id(work_item.id).await? {
                Some(current) => DbError::VersionConflict {
                    entity: "WorkItem",
                    id: work_item.id.to_string(),
                    current_version: current.version,
                    location: ErrorLocation::from(Location::caller()),
                },
                None => DbError::not_found("WorkItem", work_item.id),
            });
        }

        self.find_by_id(work_item.id)
            .await?
            .ok_or_else(|| DbError::not_found("WorkItem", work_item.id))
    }

    /// One page of the work items in `space_id` matching `expression`, and
    /// the number of matches overall. Newest number first.
    ///
    /// `parent_exists == Some(false)` keeps only items without a parent.
    pub async fn list(
        &self,
        space_id: Uuid,
        expression: &Expression,
        parent_exists: Option<bool>,
        page: Page,
    ) -> DbErrorResult<(Vec<WorkItem>, u64)> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM work_items");
        push_where(&mut count_query, space_id, expression, parent_exists)?;

        let mut select_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM work_items"));
        push_where(&mut select_query, space_id, expression, parent_exists)?;
        select_query.push(" ORDER BY number DESC, id LIMIT ");
        select_query.push_bind(page.limit() as i64);
        select_query.push(" OFFSET ");
        select_query.push_bind(page.offset() as i64);

        debug!("Listing work items: {}", select_query.sql());

        let mut tx = self.pool.begin().await?;
        let total: i64 = count_query.build_query_scalar().fetch_one(&mut *tx).await?;
        let rows = select_query.build().fetch_all(&mut *tx).await?;
        tx.commit().await?;

        let items = rows
            .iter()
            .map(map_work_item)
            .collect::<DbErrorResult<Vec<_>>>()?;
        Ok((items, total.max(0) as u64))
    }
}

fn push_where(
    builder: &mut QueryBuilder<'_, Sqlite>,
    space_id: Uuid,
    expression: &Expression,
    parent_exists: Option<bool>,
) -> DbErrorResult<()> {
    builder.push(" WHERE space_id = ");
    builder.push_bind(space_id.to_string());
    builder.push(" AND ");
    push_expression(builder, expression)?;
    if parent_exists == Some(false) {
        builder.push(" AND parent_id IS NULL");
    }
    Ok(())
}

fn encode_fields(fields: &Map<String, Value>) -> DbErrorResult<String> {
    serde_json::to_string(fields)
        .map_err(|e| DbError::invalid(format!("work item fields are not serializable: {}", e)))
}

fn map_work_item(r: &SqliteRow) -> DbErrorResult<WorkItem> {
    let raw_fields: String = r.try_get("fields")?;
    let fields = match serde_json::from_str::<Value>(&raw_fields) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(DbError::corrupt_row(
                "work_items.fields is not a JSON object",
            ));
        }
        Err(e) => {
            return Err(DbError::corrupt_row(format!(
                "Invalid JSON in work_items.fields: {}",
                e
            )));
        }
    };

    Ok(WorkItem {
        id: row::uuid(r, "id")?,
        space_id: row::uuid(r, "space_id")?,
        number: row::int(r, "number")?,
        type_id: row::uuid(r, "type_id")?,
        version: row::int(r, "version")?,
        parent_id: row::optional_uuid(r, "parent_id")?,
        fields,
        created_at: row::timestamp(r, "created_at")?,
        updated_at: row::timestamp(r, "updated_at")?,
    })
}
