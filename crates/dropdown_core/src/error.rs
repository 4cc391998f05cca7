//! DropDown error types

use thiserror::Error;

/// Errors raised by configuration entry points
///
/// Widget operations never fail: out-of-range writes are coerced and stale
/// native callbacks degrade to no-ops.
#[derive(Error, Debug)]
pub enum DropDownError {
    /// Declarative configuration could not be parsed
    #[error("Invalid drop down configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Color literal is not `#RGB`, `#RRGGBB` or `#AARRGGBB`
    #[error("Invalid color literal: {0}")]
    InvalidColor(String),

    /// Configuration names both `items` and `value_list`
    #[error("Configuration sets both `items` and `value_list`")]
    ConflictingItems,
}

/// Result type for drop down configuration
pub type Result<T> = std::result::Result<T, DropDownError>;
