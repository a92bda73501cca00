mod api_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod paging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use paging_config::PagingConfig;
pub use server_config::ServerConfig;

const CONFIG_DIR_ENV: &str = "WIT_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".wit";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_PORT: u16 = 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

const DEFAULT_DATABASE_FILENAME: &str = "wit.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 100;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

const DEFAULT_PAGE_LIMIT: u64 = 20;
const MAX_PAGE_LIMIT: u64 = 100;
const PAGE_LIMIT_CEILING: u64 = 1000;

const DEFAULT_CACHE_CONTROL: &str = "max-age=2";
