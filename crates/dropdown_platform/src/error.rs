//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to initialize platform
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// Display metrics are unusable (zero, negative or not finite)
    #[error("Invalid display density: {0}")]
    InvalidDensity(f64),

    /// Platform not supported on this OS
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
