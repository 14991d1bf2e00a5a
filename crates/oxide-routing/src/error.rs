//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
///
/// Matching and extraction never produce these; they only show up at the
/// edges where text from the outside world is turned into routes.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A method name that is not part of [`Method`](crate::Method).
    #[error("invalid method: {0}")]
    InvalidMethod(String),

    /// The regex engine rejected an extraction pattern built from a template.
    #[error("invalid path pattern '{template}': {message}")]
    InvalidPattern {
        /// The template as registered.
        template: String,
        /// Message reported by the regex engine.
        message: String,
    },

    /// A route table could not be parsed.
    #[error("invalid route table: {0}")]
    Table(#[from] serde_json::Error),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
