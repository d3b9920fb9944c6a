//! Error types for random image fetching and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ImageError`].
pub type Result<T> = std::result::Result<T, ImageError>;

/// Every failure the core can surface to a caller.
#[derive(Error, Debug)]
pub enum ImageError {
    // ─────────────────────────────────────────────────────────────
    // Provider errors
    // ─────────────────────────────────────────────────────────────
    /// Network or HTTP-layer failure while talking to a backend or image host.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status (bad key, quota, etc.).
    #[error("Provider '{provider}' returned {status}: {message}")]
    Api {
        /// Provider name.
        provider: &'static str,
        /// HTTP status code.
        status: u16,
        /// Body or reason phrase returned by the backend.
        message: String,
    },

    /// The backend payload did not have the expected shape.
    #[error("Failed to decode response from '{provider}': {source}")]
    Decode {
        /// Provider name.
        provider: &'static str,
        /// Underlying cause.
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered successfully but had no candidate images.
    #[error("Provider '{provider}': no images found")]
    EmptyResult {
        /// Provider name.
        provider: &'static str,
    },

    /// Caller supplied options outside their valid range.
    #[error("Invalid image options: {0}")]
    InvalidOptions(String),

    // ─────────────────────────────────────────────────────────────
    // Download errors
    // ─────────────────────────────────────────────────────────────
    /// The source URL cannot be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The destination already exists and `overwrite` was not requested.
    #[error("File already exists: {}", .path.display())]
    FileExists {
        /// Destination path.
        path: PathBuf,
    },

    /// Disk failure while preparing or writing the destination.
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
}

impl ImageError {
    /// Create a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// True for failures raised while fetching from a provider backend.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Api { .. } | Self::Decode { .. } | Self::EmptyResult { .. }
        )
    }

    /// True when a backend yielded zero candidates. Re-invoking may succeed.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}
