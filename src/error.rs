/// Error types for the marketplace admin console.
/// Every API call, form submission and local store operation reports through `AdminError`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    /// The server answered with a non-2xx status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A form failed required-field validation before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl AdminError {
    /// True when the server rejected the request because the token is missing or stale.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::Api { status: 401, .. } | AdminError::Api { status: 403, .. })
    }
}

impl From<url::ParseError> for AdminError {
    fn from(err: url::ParseError) -> Self {
        AdminError::Config(format!("invalid API URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
