use serde::Deserialize;
use serde_json::{Map, Value};

/// Partial update. Each entry of `fields` replaces the stored value; a
/// `null` entry removes the field.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkItemRequest {
    /// Version the client last saw
    pub version: i32,
    pub type_id: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}
