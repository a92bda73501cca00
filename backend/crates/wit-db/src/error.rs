use wit_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("{entity} {id} not found {location}")]
    NotFound {
        entity: &'static str,
        id: String,
        location: ErrorLocation,
    },

    #[error("{entity} {id} version conflict (current version: {current_version}) {location}")]
    VersionConflict {
        entity: &'static str,
        id: String,
        current_version: i32,
        location: ErrorLocation,
    },

    #[error("Invalid input: {message} {location}")]
    Invalid {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn corrupt_row(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for CoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id, .. } => CoreError::not_found(entity, id),
            DbError::VersionConflict {
                entity,
                id,
                current_version,
                ..
            } => CoreError::conflict(entity, id, current_version),
            DbError::Invalid { message, .. } => CoreError::bad_input(message),
            other => CoreError::storage(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
