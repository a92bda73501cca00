use crate::{
    ApiConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, LoggingConfig, PagingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub paging: PagingConfig,
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. Config dir from WIT_CONFIG_DIR, else ./.wit/
    /// 2. Create the config dir if missing
    /// 3. Read config.toml if present, else defaults
    /// 4. Apply WIT_* environment overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: WIT_CONFIG_DIR env var > ./.wit/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate every section. Call after load() to fail at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        self.paging.validate()?;
        self.api.validate()?;
        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (timeout {}s)",
            self.server.host, self.server.port, self.server.request_timeout_secs
        );
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("-")
        );
        info!(
            "  paging: default={}, max={}",
            self.paging.default_limit, self.paging.max_limit
        );
        info!(
            "  api: service_url='{}', cache_control='{}'",
            self.api.service_url, self.api.cache_control
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("WIT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("WIT_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "WIT_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );

        // Database
        Self::apply_env_string("WIT_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "WIT_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Logging
        Self::apply_env_parse("WIT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("WIT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("WIT_LOG_FILE", &mut self.logging.file);

        // Paging
        Self::apply_env_parse("WIT_PAGING_DEFAULT_LIMIT", &mut self.paging.default_limit);
        Self::apply_env_parse("WIT_PAGING_MAX_LIMIT", &mut self.paging.max_limit);

        // API
        Self::apply_env_string("WIT_API_SERVICE_URL", &mut self.api.service_url);
        Self::apply_env_string("WIT_API_CACHE_CONTROL", &mut self.api.cache_control);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparsable values leave the target untouched
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
