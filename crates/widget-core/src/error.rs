//! Error types for loading widget layouts.

use thiserror::Error;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while reading a widget layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The layout file is not valid JSON or does not match the schema.
    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value in expression position is neither a literal nor a call.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// A condition string does not match the restricted comparison grammar.
    #[error("Invalid condition '{text}' at offset {offset}: {message}")]
    InvalidCondition {
        text: String,
        offset: usize,
        message: String,
    },
}
