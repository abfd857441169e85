//! Error types for Tempora operations.
//!
//! This module defines the main error type [`TemporaError`] which represents
//! all possible errors that can occur during date extraction, fetching,
//! and parsing operations.
//!
//! Heuristic failures are not errors: a scan that finds nothing simply moves
//! the cascade along, and a document without a discoverable date yields
//! `Ok(None)` from the finder. The only error surfaced before extraction
//! starts is an invalid output format.
//!
//! # Example
//!
//! ```rust
//! use tempora_core::{TemporaError, Result};
//!
//! fn check_markup(html: &str) -> Result<()> {
//!     if html.is_empty() {
//!         return Err(TemporaError::HtmlParse("empty document".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for date extraction operations.
///
/// # Example
///
/// ```rust
/// use tempora_core::{TemporaError, find_date_with_config, FinderConfig};
///
/// let config = FinderConfig { output_format: "no directive".to_string(), ..Default::default() };
/// match find_date_with_config("<html></html>", &config) {
///     Err(TemporaError::InvalidFormat(fmt)) => println!("bad format: {}", fmt),
///     other => println!("{:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum TemporaError {
    /// Invalid output format template.
    ///
    /// Returned when the configured output format contains no `%`-directive
    /// or cannot render a reference date. This is checked once per call,
    /// before any extraction work begins.
    #[error("invalid output format: {0}")]
    InvalidFormat(String),

    /// A date string does not conform to the format it was parsed under.
    #[error("value {value:?} does not match format {format:?}")]
    FormatMismatch { value: String, format: String },

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("failed to parse HTML: {0}")]
    HtmlParse(String),

    /// Invalid URL provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[cfg(feature = "fetch")]
    #[error("request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },
}

/// Result type alias for TemporaError.
pub type Result<T> = std::result::Result<T, TemporaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TemporaError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("invalid URL"));
    }

    #[test]
    fn test_format_error() {
        let err = TemporaError::InvalidFormat("ABC".to_string());
        assert!(err.to_string().contains("ABC"));
    }

    #[test]
    fn test_format_mismatch() {
        let err = TemporaError::FormatMismatch { value: "2017-13-01".to_string(), format: "%Y-%m-%d".to_string() };
        assert!(err.to_string().contains("2017-13-01"));
        assert!(err.to_string().contains("%Y-%m-%d"));
    }
}
