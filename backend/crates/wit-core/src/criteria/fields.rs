//! Well-known field paths addressable by a criteria expression.

pub const SPACE: &str = "space";
pub const TYPE: &str = "Type";
pub const NUMBER: &str = "number";
pub const TITLE: &str = "system.title";
pub const ASSIGNEES: &str = "system.assignees";
pub const ITERATION: &str = "system.iteration";
pub const AREA: &str = "system.area";
pub const STATE: &str = "system.state";

/// A caller-supplied field path must be non-empty and consist of ASCII
/// alphanumerics, `_` and `.` only.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
