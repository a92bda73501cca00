use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct CreateWorkItemRequest {
    pub type_id: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}
