//! Raw query string access. Handlers take the query as ordered pairs so
//! repeated and bracketed names reach the core untouched.

/// Borrow each pair as `(&str, &str)`.
pub fn pairs(raw: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    raw.iter().map(|(name, value)| (name.as_str(), value.as_str()))
}
