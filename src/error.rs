//! Error types for the export pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or exporting an invoice
#[derive(Error, Debug)]
pub enum Error {
    /// The render target was not mounted when capture was requested
    #[error("Render target not found: {0}")]
    TargetNotFound(String),

    /// Rasterization of the render target failed
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Encoding the raster image failed
    #[error("Encoding failed: {0}")]
    EncodeFailed(String),

    /// Document construction or image embedding failed
    #[error("Assembly failed: {0}")]
    AssemblyFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error while emitting the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
