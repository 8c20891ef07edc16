// src/core/error.rs

use thiserror::Error;

/// Everything a tool run can fail with.
///
/// The `Display` text is shown to the user verbatim, in the notice bar of the
/// TUI or on stderr of the CLI.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Rejected input; never reaches an analysis task.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Cipher(String),

    #[error("Please select a PNG or JPEG image")]
    UnsupportedImage,

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    pub fn validation(message: impl Into<String>) -> Self {
        ToolError::Validation(message.into())
    }

    pub fn cipher(message: impl Into<String>) -> Self {
        ToolError::Cipher(message.into())
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
