use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateIterationRequest {
    pub name: String,
    /// Nest under this iteration of the same space
    pub parent_id: Option<String>,
}
