//! Error types for HTML previews.

use thiserror::Error;
use widget_core::LayoutError;

/// Result type alias for preview operations.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Errors that can occur while building a preview page.
#[derive(Error, Debug)]
pub enum HtmlError {
    /// The layout could not be read or parsed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Page template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid page template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Unknown sample set name.
    #[error("Unknown sample set: {0} (expected default, hot or storm)")]
    UnknownSampleSet(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
