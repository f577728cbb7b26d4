//! Error types for StudyPulse

use thiserror::Error;

/// Result type alias using StudyPulse's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for StudyPulse operations
#[derive(Error, Debug)]
pub enum Error {
    /// One or more query parameters fell outside their enumeration
    #[error("Invalid query parameters: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Backing data could not be read or parsed
    #[error("Data source error: {0}")]
    DataSource(String),

    /// No API key was supplied
    #[error("API key is missing")]
    MissingApiKey,

    /// The supplied API key did not match
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a data source error
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::MissingApiKey | Self::InvalidApiKey
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
