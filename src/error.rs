use std::path::PathBuf;

use thiserror::Error;

/// Why a single guide could not be loaded. The guide is skipped, the store keeps going.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is outside the guides root")]
    OutsideRoot { path: PathBuf },
}

/// Errors raised while building or querying the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("guides directory not found: {0}")]
    MissingGuidesRoot(PathBuf),

    #[error("failed to read OpenAPI document {path}: {source}")]
    OpenApiRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse OpenAPI document {path}: {source}")]
    OpenApiParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render example: {0}")]
    Render(#[from] serde_json::Error),
}

/// Failures of the outbound feedback call.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl From<reqwest::Error> for FeedbackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err)
        }
    }
}
