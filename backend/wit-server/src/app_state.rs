use crate::Metrics;
use crate::error::Result as ServerErrorResult;

use wit_config::{ApiConfig, Config};
use wit_core::PageLimits;

use sqlx::SqlitePool;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub limits: PageLimits,
    pub api: ApiConfig,
    pub metrics: Metrics,
}

impl AppState {
    /// Fails when the configured page limits are inconsistent.
    pub fn new(pool: SqlitePool, config: &Config) -> ServerErrorResult<Self> {
        let limits = PageLimits::new(config.paging.default_limit, config.paging.max_limit)?;
        Ok(Self {
            pool,
            limits,
            api: config.api.clone(),
            metrics: Metrics::new(),
        })
    }

    /// Absolute URL of `path` under the configured service URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api.base_url(), path)
    }
}
