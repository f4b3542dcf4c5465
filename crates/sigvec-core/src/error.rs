//! Error types for vector kernels
//!
//! Provides a unified error type for all sigvec crates.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kernel, memory and dump operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data for {operation}: expected at least {expected} samples, got {actual}")]
    InsufficientData {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// The allocator could not satisfy the request
    #[error("Allocation of {size} bytes aligned to {alignment} failed")]
    Allocation { size: usize, alignment: usize },

    /// Requested alignment is not a power of two
    #[error("Invalid alignment: {0} is not a power of two")]
    InvalidAlignment(usize),

    /// Feature not available
    #[error("Feature not available: {0}")]
    FeatureNotAvailable(String),

    /// A dump file could not be opened for writing or reading
    #[error("Failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::InsufficientData {
            operation: operation.to_string(),
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }
}

/// Fail with a size mismatch unless `actual == expected`.
#[inline]
pub(crate) fn check_len(expected: usize, actual: usize, context: &str) -> Result<()> {
    if expected != actual {
        return Err(Error::size_mismatch(expected, actual, context));
    }
    Ok(())
}
