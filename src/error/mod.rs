use std::path::PathBuf;

use thiserror::Error;

/// Error types for the clayceo library.
///
/// Every error aborts the current pipeline run; nothing is retried and no partial
/// result is produced. Transport failures from the collaborators (`ApiError`,
/// `Timeout`, `HttpError`, `UnexpectedResponse`) are passed through unchanged.
///
/// # Examples
///
/// ```
/// use clayceo::{ClayCeoError, Result};
///
/// fn require_object(raw: &str) -> Result<()> {
///     if !raw.trim_start().starts_with('{') {
///         return Err(ClayCeoError::AnalysisParseError(format!(
///             "expected a JSON object, got: {}",
///             raw
///         )));
///     }
///     Ok(())
/// }
///
/// match require_object("I can't see a face here") {
///     Err(ClayCeoError::AnalysisParseError(msg)) => println!("Bad analysis: {}", msg),
///     other => println!("Unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ClayCeoError {
    /// Image file could not be read (or a generated image could not be written)
    #[error("File access error for {}: {source}", path.display())]
    FileAccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Vision model response was not a JSON object of the expected shape
    #[error("Analysis parse error: {0}")]
    AnalysisParseError(String),

    /// Collaborator API returned a non-success status
    #[error("API error: {0}")]
    ApiError(String),

    /// Collaborator API answered but the body lacked the expected content
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Missing or invalid client configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error (from serde_json) outside of attribute parsing
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ClayCeoError {
    /// Build a `FileAccessError` for `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccessError {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised while talking to a remote collaborator.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError(_) | Self::UnexpectedResponse(_) | Self::Timeout | Self::HttpError(_)
        )
    }
}

// reqwest::Error, serde_json::Error and io::Error don't implement PartialEq,
// so variants wrapping them never compare equal.
impl PartialEq for ClayCeoError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AnalysisParseError(a), Self::AnalysisParseError(b)) => a == b,
            (Self::ApiError(a), Self::ApiError(b)) => a == b,
            (Self::UnexpectedResponse(a), Self::UnexpectedResponse(b)) => a == b,
            (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for clayceo operations.
///
/// ```
/// use clayceo::{ClayCeoError, Result};
///
/// fn api_key(raw: &str) -> Result<&str> {
///     if raw.is_empty() {
///         return Err(ClayCeoError::ConfigError("API key is empty".into()));
///     }
///     Ok(raw)
/// }
///
/// assert!(api_key("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, ClayCeoError>;
