use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
}
