use wit_core::Iteration;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IterationDto {
    pub id: String,
    pub space_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Iteration> for IterationDto {
    fn from(i: Iteration) -> Self {
        Self {
            id: i.id.to_string(),
            space_id: i.space_id.to_string(),
            parent_id: i.parent_id.map(|id| id.to_string()),
            name: i.name,
            created_at: i.created_at.timestamp(),
            updated_at: i.updated_at.timestamp(),
        }
    }
}
