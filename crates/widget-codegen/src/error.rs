//! Error types for code generation.

use std::path::PathBuf;

use thiserror::Error;
use widget_core::LayoutError;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The layout could not be read or parsed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Template not found.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// A named widget has no layout file.
    #[error("Widget layout not found: {}", .0.display())]
    WidgetNotFound(PathBuf),

    /// Two layouts in one batch map to the same output file.
    #[error("Output {} already written from {}", .output.display(), .previous.display())]
    OutputCollision { output: PathBuf, previous: PathBuf },

    /// One or more files in a batch failed.
    #[error("{failed} of {total} layout files failed")]
    Batch { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
