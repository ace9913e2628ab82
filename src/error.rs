//! Error types for the bugprep library.
//!
//! All errors are represented by the [`BugprepError`] enum. The text
//! normalization pipeline itself never fails once constructed; errors come
//! from configuration, ignore-term files and malformed input records.
//!
//! # Examples
//!
//! ```
//! use bugprep::error::{BugprepError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BugprepError::config("batch_size must be greater than zero"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for bugprep operations.
#[derive(Error, Debug)]
pub enum BugprepError {
    /// I/O errors (reading input, writing output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O errors tied to a specific file
    #[error("I/O error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Analysis-related errors (invalid character classes, regex compilation)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record whose content cannot be normalized
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A record failure tied to an input line (1-based)
    #[error("Record error on line {line}: {message}")]
    Record { line: usize, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal failures (thread pool construction, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that may fail with BugprepError.
pub type Result<T> = std::result::Result<T, BugprepError>;

impl BugprepError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BugprepError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BugprepError::Config(msg.into())
    }

    /// Create a new invalid record error.
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        BugprepError::InvalidRecord(msg.into())
    }

    /// Create a new record error for the given input line.
    pub fn record<S: Into<String>>(line: usize, msg: S) -> Self {
        BugprepError::Record {
            line,
            message: msg.into(),
        }
    }

    /// Create a new file error.
    pub fn file<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        BugprepError::File {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        BugprepError::Internal(msg.into())
    }
}
