//! # UI Error Types
//!
//! Errors raised while loading configuration and themes. The event, update
//! and paint paths never fail; they clamp or skip instead.

use thiserror::Error;

/// Errors that can occur while configuring the toolkit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Configuration document failed to parse or validate.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A color string was not `#RRGGBB`, `#RRGGBBAA`, `rgb(...)` or `rgba(...)`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Configuration file could not be read.
    #[error("failed to read {path}: {reason}")]
    ConfigRead {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

/// Result type for configuration operations.
pub type UiResult<T> = Result<T, UiError>;
