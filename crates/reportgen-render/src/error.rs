//! Render error types.

use thiserror::Error;

/// Errors from rendering and image export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The browser executable could not be started.
    #[error("failed to start browser '{command}': {source}")]
    BrowserSpawn {
        command: String,
        source: std::io::Error,
    },

    /// The browser exited unsuccessfully.
    #[error("browser exited with {code:?}: {stderr}")]
    BrowserFailed { code: Option<i32>, stderr: String },

    /// The browser exited cleanly but produced no image.
    #[error("browser produced no image at '{0}'")]
    NoImage(String),

    /// The browser did not finish in time.
    #[error("browser timed out after {0}s")]
    Timeout(u64),

    /// The temporary page path cannot be expressed as a file URL.
    #[error("page path '{0}' is not a valid file URL")]
    PagePath(String),

    /// Filesystem error around the temporary page or the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
