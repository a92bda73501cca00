use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Error taxonomy shared by the listing core and its collaborators.
///
/// `BadInput` is a caller mistake and is never retried. `NotFound` is
/// reported by a collaborator for a well-formed id with no record behind it.
/// `Storage` covers every collaborator failure unrelated to the input.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Bad input: {message} {location}")]
    BadInput {
        message: String,
        parameter: Option<String>,
        location: ErrorLocation,
    },

    #[error("{entity} {id} not found {location}")]
    NotFound {
        entity: &'static str,
        id: String,
        location: ErrorLocation,
    },

    #[error(
        "Conflict: {entity} {id} was modified (current version: {current_version}) {location}"
    )]
    Conflict {
        entity: &'static str,
        id: String,
        current_version: i32,
        location: ErrorLocation,
    },

    #[error("Storage error: {message} {location}")]
    Storage {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Bad input tied to a specific query parameter
    #[track_caller]
    pub fn bad_parameter<S: Into<String>>(parameter: &str, message: S) -> Self {
        CoreError::BadInput {
            message: message.into(),
            parameter: Some(parameter.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Bad input not tied to a single parameter
    #[track_caller]
    pub fn bad_input<S: Into<String>>(message: S) -> Self {
        CoreError::BadInput {
            message: message.into(),
            parameter: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict(entity: &'static str, id: impl ToString, current_version: i32) -> Self {
        CoreError::Conflict {
            entity,
            id: id.to_string(),
            current_version,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        CoreError::Storage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_bad_input(&self) -> bool {
        matches!(self, CoreError::BadInput { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    /// Name of the offending query parameter, when known
    pub fn parameter(&self) -> Option<&str> {
        match self {
            CoreError::BadInput { parameter, .. } => parameter.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
