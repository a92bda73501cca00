use wit_core::Space;

use serde::Serialize;

/// Space DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct SpaceDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Space> for SpaceDto {
    fn from(s: Space) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name,
            description: s.description,
            owner_id: s.owner_id.map(|id| id.to_string()),
            version: s.version,
            created_at: s.created_at.timestamp(),
            updated_at: s.updated_at.timestamp(),
        }
    }
}
