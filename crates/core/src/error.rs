//! Error types for Gist operations.
//!
//! This module defines the main error type [`GistError`] together with the
//! closed [`ErrorKind`] classification that outer layers (the HTTP server,
//! the CLI) use to decide how a failure is surfaced.
//!
//! # Example
//!
//! ```rust
//! use gist_core::{ErrorKind, GistError};
//!
//! let err = GistError::HttpStatus { status: 404 };
//! assert_eq!(err.kind(), ErrorKind::Extraction);
//! assert!(err.to_string().contains("404"));
//! ```

use thiserror::Error;

/// Main error type for extraction, generation and pipeline operations.
///
/// Every variant carries owned, printable data only so the error can be
/// cloned out of shared cache entries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GistError {
    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or uses a scheme other than http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request timeout.
    ///
    /// Returned when fetching the article exceeds the configured timeout.
    #[error("Request timed out after {timeout} seconds; the site is not responding")]
    Timeout { timeout: u64 },

    /// Connection failure (DNS, refused, TLS, reset).
    #[error("Could not connect to the URL; check the address or network settings ({0})")]
    Connection(String),

    /// The article URL answered with a non-success status.
    #[error("HTTP error while accessing the URL (status code: {status})")]
    HttpStatus { status: u16 },

    /// No extraction strategy produced usable text.
    #[error("Could not extract the article body; the site may block access or render content dynamically")]
    Unreachable,

    /// Content was found but is below the minimum viable length.
    #[error("Article body is too short to summarize ({length} characters, minimum {minimum})")]
    ContentTooShort { length: usize, minimum: usize },

    /// The generative capability could not be initialized.
    #[error("Summarization model is unavailable: {0}")]
    CapabilityUnavailable(String),

    /// A generation call failed after the capability was initialized.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),
}

/// Closed classification of [`GistError`] used at process boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network or parse failure reaching usable content.
    Extraction,
    /// Content found but below the minimum viable length.
    ContentTooShort,
    /// The generative capability failed to initialize.
    CapabilityUnavailable,
    /// Anything else. Its message is not meant for end users.
    Unknown,
}

impl GistError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GistError::InvalidUrl(_)
            | GistError::Timeout { .. }
            | GistError::Connection(_)
            | GistError::HttpStatus { .. }
            | GistError::Unreachable => ErrorKind::Extraction,
            GistError::ContentTooShort { .. } => ErrorKind::ContentTooShort,
            GistError::CapabilityUnavailable(_) => ErrorKind::CapabilityUnavailable,
            GistError::Generation(_) | GistError::HtmlParseError(_) => ErrorKind::Unknown,
        }
    }
}

/// Result type alias for GistError.
pub type Result<T> = std::result::Result<T, GistError>;
