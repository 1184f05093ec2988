//! Error types for the covidash plugin.
//!
//! [`CovidashError`] is the single error type used across the crate and
//! [`Result`] is the matching alias. Variants wrapping foreign errors use
//! `#[from]` so `?` converts them in place.

use thiserror::Error;

/// The main error type for covidash operations.
///
/// # Examples
///
/// ```
/// use covidash::CovidashError;
///
/// let err = CovidashError::Http { status: 503 };
/// assert_eq!(err.to_string(), "HTTP request failed with status 503");
/// ```
#[derive(Debug, Error)]
pub enum CovidashError {
    /// The statistics API answered with a non-success status code.
    #[error("HTTP request failed with status {status}")]
    Http {
        /// Status code returned by the API.
        status: u16,
    },

    /// The response body was not a valid summary payload.
    #[error("Failed to decode summary: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API replied with a message instead of statistics.
    ///
    /// Happens while the upstream service rebuilds its cache
    /// (`"Caching in progress"`).
    #[error("Statistics unavailable: {0}")]
    Unavailable(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme loading or parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for covidash operations.
pub type Result<T> = std::result::Result<T, CovidashError>;
