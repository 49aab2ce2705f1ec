//! Error types for Plainly

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the Plainly workflow
#[derive(Error, Debug)]
pub enum Error {
    #[error("Text is too short ({length} characters). Please enter more than {minimum} characters.")]
    Validation { length: usize, minimum: usize },

    #[error("You are offline. Waiting for internet...")]
    Offline,

    #[error("Simplification failed: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// Whether this error came back from the simplification service
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Error::Collaborator(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

/// Ways the simplification service can fail a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("service responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Other(String),
}
