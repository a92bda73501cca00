use crate::{ConfigError, ConfigErrorResult, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PAGE_LIMIT_CEILING};

use serde::Deserialize;

/// Page-size bounds applied to every paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Used when the caller gives no usable limit
    pub default_limit: u64,
    /// Larger requested limits are cut down to this
    pub max_limit: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PagingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.default_limit == 0 {
            return Err(ConfigError::paging("paging.default_limit must be at least 1"));
        }

        if self.default_limit > self.max_limit {
            return Err(ConfigError::paging(format!(
                "paging.default_limit ({}) must not exceed paging.max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }

        if self.max_limit > PAGE_LIMIT_CEILING {
            return Err(ConfigError::paging(format!(
                "paging.max_limit must be at most {}, got {}",
                PAGE_LIMIT_CEILING, self.max_limit
            )));
        }

        Ok(())
    }
}
