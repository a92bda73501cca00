use serde::Deserialize;

/// Absent fields keep their stored value
#[derive(Debug, Deserialize)]
pub struct UpdateSpaceRequest {
    /// Version the client last saw
    pub version: i32,
    pub name: Option<String>,
    pub description: Option<String>,
}
