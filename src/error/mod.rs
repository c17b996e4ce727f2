// Error types for img2text
// Author: kelexine (https://github.com/kelexine)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Image file '{}' not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No API key configured (pass --api-key or set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Remote API error (HTTP {status}): {message}")]
    RemoteApi { status: u16, message: String },

    #[error("Model returned no choices")]
    NoChoices,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Maps a non-success HTTP status and its extracted message to an error kind.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ExtractError::Authentication(message),
            429 => ExtractError::TooManyRequests(message),
            502..=504 => ExtractError::ServiceUnavailable(message),
            _ => ExtractError::RemoteApi { status, message },
        }
    }

    /// True when the failure came from a missing image file.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, ExtractError::FileNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
