use crate::{ConfigError, ConfigErrorResult, DEFAULT_CACHE_CONTROL};

use serde::Deserialize;

/// Configuration for the REST API layer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and authority prefixed to pagination links. Empty yields
    /// host-relative links.
    pub service_url: String,
    /// `Cache-Control` header value for listing responses
    pub cache_control: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.service_url.is_empty()
            && !self.service_url.starts_with("http://")
            && !self.service_url.starts_with("https://")
        {
            return Err(ConfigError::api(format!(
                "api.service_url must start with http:// or https://, got '{}'",
                self.service_url
            )));
        }
        Ok(())
    }

    /// `service_url` without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.service_url.trim_end_matches('/')
    }
}
