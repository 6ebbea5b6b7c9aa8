//! Error types and handling for the `geolookup` application

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::error::LookupError;

/// Main error type for the `geolookup` application
#[derive(Error, Debug)]
pub enum GeoLookupError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Reference data that breaks the loading contract
    #[error("Reference data error: {message}")]
    Data { message: String },

    /// Reference file that could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A query that produced no value
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl GeoLookupError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new reference data error
    pub fn data<S: Into<String>>(message: S) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GeoLookupError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            GeoLookupError::Data { message } => {
                format!("The reference data is inconsistent: {message}")
            }
            GeoLookupError::Read { path, .. } => {
                format!(
                    "Unable to read reference file {}. Please check the data directory.",
                    path.display()
                )
            }
            GeoLookupError::Lookup(err) => err.to_string(),
        }
    }
}
