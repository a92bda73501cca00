//! Space repository.
//!
//! `next_work_item_number` is the per-space counter handed out to new work
//! items. It is read and bumped inside the caller's transaction, so a rolled
//! back insert leaves a gap in the numbering. Numbers identify items, they do
//! not count them.

use crate::row;
use crate::{DbError, Result as DbErrorResult};

use wit_core::{Page, Space};

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

const COLUMNS: &str = "id, name, description, owner_id, version, next_work_item_number, \
                       created_at, updated_at";

pub struct SpaceRepository {
    pool: SqlitePool,
}

impl SpaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, space: &Space) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO spaces (
                    id, name, description, owner_id, version, next_work_item_number,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(space.id.to_string())
        .bind(&space.name)
        .bind(&space.description)
        .bind(space.owner_id.map(|id| id.to_string()))
        .bind(space.version)
        .bind(space.next_work_item_number)
        .bind(space.created_at.timestamp())
        .bind(space.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Space>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM spaces WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_space).transpose()
    }

    /// One page of spaces, newest first, plus the total number of spaces.
    pub async fn list(&self, page: Page) -> DbErrorResult<(Vec<Space>, u64)> {
        let mut tx = self.pool.begin().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM spaces")
            .fetch_one(&mut *tx)
            .await?;

        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM spaces ORDER BY created_at DESC, id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let spaces = rows.iter().map(map_space).collect::<DbErrorResult<Vec<_>>>()?;
        Ok((spaces, total.max(0) as u64))
    }

    /// Persist `space` if its version still matches the stored one. The
    /// stored version is bumped and the updated space returned.
    pub async fn update(&self, space: &Space) -> DbErrorResult<Space> {
        let result = sqlx::query(
            r#"
              UPDATE spaces
              SET name = ?, description = ?, owner_id = ?, version = version + 1,
                  updated_at = ?
              WHERE id = ? AND version = ?
              "#,
        )
        .bind(&space.name)
        .bind(&space.description)
        .bind(space.owner_id.map(|id| id.to_string()))
        .bind(space.updated_at.timestamp())
        .bind(space.id.to_string())
        .bind(space.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(match self.find_by_id(space.id).await? {
                Some(current) => DbError::VersionConflict {
                    entity: "Space",
                    id: space.id.to_string(),
                    current_version: current.version,
                    location: ErrorLocation::from(Location::caller()),
                },
                None => DbError::not_found("Space", space.id),
            });
        }

        self.find_by_id(space.id)
            .await?
            .ok_or_else(|| DbError::not_found("Space", space.id))
    }

    /// Delete a space together with its iterations and work items.
    pub async fn delete(&self, id: Uuid) -> DbErrorResult<()> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Space", id));
        }
        Ok(())
    }

    /// Return the next work item number for `space_id` and advance the
    /// counter, within `tx`.
    pub async fn get_and_increment_work_item_number(
        tx: &mut Transaction<'_, Sqlite>,
        space_id: Uuid,
    ) -> DbErrorResult<i32> {
        let space_id_str = space_id.to_string();

        let current: Option<i64> =
            sqlx::query_scalar("SELECT next_work_item_number FROM spaces WHERE id = ?")
                .bind(&space_id_str)
                .fetch_optional(&mut **tx)
                .await?;
        let current = current.ok_or_else(|| DbError::not_found("Space", space_id))?;

        sqlx::query(
            "UPDATE spaces SET next_work_item_number = next_work_item_number + 1 WHERE id = ?",
        )
        .bind(&space_id_str)
        .execute(&mut **tx)
        .await?;

        i32::try_from(current).map_err(|_| {
            DbError::corrupt_row(format!("work item counter out of range: {}", current))
        })
    }
}

fn map_space(r: &SqliteRow) -> DbErrorResult<Space> {
    use sqlx::Row;

    Ok(Space {
        id: row::uuid(r, "id")?,
        name: r.try_get("name")?,
        description: r.try_get("description")?,
        owner_id: row::optional_uuid(r, "owner_id")?,
        version: row::int(r, "version")?,
        next_work_item_number: row::int(r, "next_work_item_number")?,
        created_at: row::timestamp(r, "created_at")?,
        updated_at: row::timestamp(r, "updated_at")?,
    })
}
