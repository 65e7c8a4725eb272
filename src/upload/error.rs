use std::path::PathBuf;
use thiserror::Error;

pub const NO_FILE_MESSAGE: &str = "Please select a .ino file!";

/// Failure of the HTTP exchange itself. The message is shown to the user
/// as-is.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::new(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{}", NO_FILE_MESSAGE)]
    Validation,
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Parse(String),
    #[error("Failed to open results page: {0}")]
    Navigation(String),
}

impl From<serde_json::Error> for SubmitError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
