use crate::row;
use crate::{DbError, Result as DbErrorResult};

use wit_core::Iteration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const COLUMNS: &str = "id, space_id, parent_id, name, created_at, updated_at";

pub struct IterationRepository {
    pool: SqlitePool,
}

impl IterationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert `iteration`. A parent must belong to the same space.
    pub async fn create(&self, iteration: &Iteration) -> DbErrorResult<()> {
        if let Some(parent_id) = iteration.parent_id {
            let parent = self
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| DbError::not_found("Iteration", parent_id))?;
            if parent.space_id != iteration.space_id {
                return Err(DbError::invalid(format!(
                    "parent iteration {} belongs to another space",
                    parent_id
                )));
            }
        }

        sqlx::query(
            r#"
                INSERT INTO iterations (id, space_id, parent_id, name, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(iteration.id.to_string())
        .bind(iteration.space_id.to_string())
        .bind(iteration.parent_id.map(|id| id.to_string()))
        .bind(&iteration.name)
        .bind(iteration.created_at.timestamp())
        .bind(iteration.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Iteration>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM iterations WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_iteration).transpose()
    }

    pub async fn find_by_space(&self, space_id: Uuid) -> DbErrorResult<Vec<Iteration>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM iterations WHERE space_id = ? ORDER BY created_at, name, id"
        ))
        .bind(space_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_iteration).collect()
    }

    /// Ids of every transitive child of `iteration_id`, nearest first.
    ///
    /// The existence check and the tree walk run in one transaction so both
    /// see the same snapshot.
    pub async fn load_descendants(&self, iteration_id: Uuid) -> DbErrorResult<Vec<Uuid>> {
        let id_str = iteration_id.to_string();
        let mut tx = self.pool.begin().await?;

        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM iterations WHERE id = ?")
            .bind(&id_str)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("Iteration", iteration_id));
        }

        let ids: Vec<String> = sqlx::query_scalar(
            r#"
                WITH RECURSIVE descendants(id, depth) AS (
                    SELECT id, 1 FROM iterations WHERE parent_id = ?
                    UNION
                    SELECT i.id, d.depth + 1
                    FROM iterations i
                    JOIN descendants d ON i.parent_id = d.id
                )
                SELECT id FROM descendants
                GROUP BY id
                ORDER BY MIN(depth), id
            "#,
        )
        .bind(&id_str)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        ids.iter()
            .map(|s| {
                Uuid::parse_str(s).map_err(|e| {
                    DbError::corrupt_row(format!("Invalid UUID in iterations.id: {}", e))
                })
            })
            .collect()
    }
}

fn map_iteration(r: &SqliteRow) -> DbErrorResult<Iteration> {
    use sqlx::Row;

    Ok(Iteration {
        id: row::uuid(r, "id")?,
        space_id: row::uuid(r, "space_id")?,
        parent_id: row::optional_uuid(r, "parent_id")?,
        name: r.try_get("name")?,
        created_at: row::timestamp(r, "created_at")?,
        updated_at: row::timestamp(r, "updated_at")?,
    })
}
