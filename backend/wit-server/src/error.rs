use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] wit_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] wit_db::DbError),

    #[error("Invalid paging limits: {0}")]
    Paging(#[from] wit_core::CoreError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
