//! Error handling for the hftf library
//!
//! This module provides the crate-wide error type with detailed error
//! information for all compression, decompression, and container operations.

use thiserror::Error;

/// Main error type for the hftf library
#[derive(Error, Debug)]
pub enum HftfError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file missing or unreadable
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that could not be read
        path: String,
    },

    /// Container format violations: bad magic, bad suffix, inconsistent
    /// offsets, malformed symbol table, trailing bytes
    #[error("Invalid container format: {reason}")]
    InvalidFormat {
        /// Description of the format violation
        reason: String,
    },

    /// Container or bitstream ends before its declared contents do
    #[error("Truncated stream: {reason}")]
    TruncatedStream {
        /// Description of what was missing
        reason: String,
    },

    /// Invalid data passed to an encode operation
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },
}

impl HftfError {
    /// Create a file not found error
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(reason: S) -> Self {
        Self::InvalidFormat { reason: reason.into() }
    }

    /// Create a truncated stream error
    pub fn truncated<S: Into<String>>(reason: S) -> Self {
        Self::TruncatedStream { reason: reason.into() }
    }

    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Get the error category for diagnostic prefixes
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::FileNotFound { .. } => "not_found",
            Self::InvalidFormat { .. } => "format",
            Self::TruncatedStream { .. } => "truncated",
            Self::InvalidData { .. } => "data",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HftfError>;
