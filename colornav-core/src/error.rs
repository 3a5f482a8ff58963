//! Error types for the ColorNavigator client

use thiserror::Error;

/// Result type for ColorNavigator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ColorNavigator operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API server could not be reached
    #[error("Failed to communicate with the ColorNavigator API server. Reason: {0}")]
    Transport(String),

    /// The API server answered with a 4xx/5xx status
    #[error("Status: {status}, Reason: {reason}, Message: {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    /// A success body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Rejected locally before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `GET /monitors` returned an empty list
    #[error("No monitor found.")]
    NoMonitor,

    /// Mock server error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status returned by the service, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
