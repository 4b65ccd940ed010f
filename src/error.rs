//! Error handling module for colorwise
//!
//! Provides centralized error types using thiserror. The wizard itself never
//! fails (invalid transitions are silent no-ops), so these cover the edges:
//! the pairing service, the settings file and the terminal.

use thiserror::Error;

/// Failure talking to the outfit pairing service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    /// Connection refused, DNS failure, reset mid-flight...
    #[error("Network error: {0}")]
    Network(String),

    /// The service did not answer within the configured timeout
    #[error("The pairing service timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("Pairing service returned {code}: {message}")]
    Status { code: u16, message: String },

    /// The body was not a `best_outfit` document
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for PairingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                code: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Main error type for colorwise
#[derive(Error, Debug)]
pub enum ColorwiseError {
    /// IO errors (terminal, log file, settings file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pairing service errors
    #[error(transparent)]
    Pairing(#[from] PairingError),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for colorwise operations
pub type Result<T> = std::result::Result<T, ColorwiseError>;

// Convenient error constructors
impl ColorwiseError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
