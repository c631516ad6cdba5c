//! Analysis error types.

use thiserror::Error;

/// Errors from text analysis and the keyword API client.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input text was empty or whitespace.
    #[error("Missing input text")]
    EmptyText,

    /// HTTP transport error (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The keyword API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Failed to parse the keyword API response.
    #[error("parse error: {0}")]
    Parse(String),
}
