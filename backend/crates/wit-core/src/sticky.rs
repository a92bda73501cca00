use std::fmt;

use urlencoding::encode;

/// Query fragments carried on every navigation link so that following a link
/// re-applies the same filters. Order of insertion is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickyFragments {
    fragments: Vec<String>,
}

impl StickyFragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name=value`. The value is percent-encoded, the name is kept
    /// literally.
    pub fn push(&mut self, name: &str, value: &str) {
        self.fragments.push(format!("{name}={}", encode(value)));
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    /// `&a=1&b=2`, or the empty string when there are no fragments.
    pub fn query_suffix(&self) -> String {
        self.fragments
            .iter()
            .fold(String::new(), |mut acc, fragment| {
                acc.push('&');
                acc.push_str(fragment);
                acc
            })
    }
}

impl fmt::Display for StickyFragments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fragments.join("&"))
    }
}
