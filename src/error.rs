//! Error types for fetching statuses and persisting preferences.

use thiserror::Error;

/// Errors that can occur when fetching endpoint statuses.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("HTTP error with status code: {0}")]
    Status(u16),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Errors from the preference store backend.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No configuration directory could be determined for this platform.
    #[error("No configuration directory available")]
    NoConfigDir,
}
