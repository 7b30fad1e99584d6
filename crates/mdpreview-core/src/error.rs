//! Error types for mdpreview

use thiserror::Error;

/// Main error type for mdpreview operations.
///
/// Rendering itself never fails; these cover the configuration and
/// input handling around it.
#[derive(Error, Debug)]
pub enum MdPreviewError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unusable input document
    #[error("Input error: {0}")]
    Input(String),
}

/// Result type alias for mdpreview operations
pub type Result<T> = std::result::Result<T, MdPreviewError>;
