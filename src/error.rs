//! Error types for recipe-runner operations.
//!
//! [`RunnerError`] is the crate-level error used by configuration loading and
//! the CLI. Calls that reach the execution backend fail with
//! [`BackendError`], which converts into `RunnerError` through `?`.
//!
//! # Error Handling Strategy
//!
//! - Recipe submission propagates `BackendError` unmodified
//! - Debug recipe dumps and transaction log lookups never fail; they log and
//!   carry on
//! - Use `anyhow::Error` (via `RunnerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

pub use crate::backend::BackendError;

/// Core error type for recipe-runner operations.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A configuration value could not be interpreted.
    #[error("Invalid value for '{key}': {message}")]
    ConfigValidation { key: String, message: String },

    /// A test case file could not be read as a TestCase.
    #[error("Failed to parse test case at {path}: {message}")]
    TestCaseParse { path: PathBuf, message: String },

    /// The execution backend rejected or failed a request.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RunnerError {
    /// Process exit code for this error: 2 for an unusable test case, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::TestCaseParse { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for recipe-runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
