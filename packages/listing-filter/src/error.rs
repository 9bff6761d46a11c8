//! Typed errors for the listing-filter library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); every error
//! propagates to the top of the pipeline and terminates the run.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for listing-filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors that abort a filtering run.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Reading the input page or writing the output page failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSS selector failed to parse
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// The classification service call failed
    #[error("classification failed: {0}")]
    Classify(#[from] openai_client::OpenAIError),

    /// JSON serialization failed while building the prompt
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FilterError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
