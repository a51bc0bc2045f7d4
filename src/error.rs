//! Error types for boolmerge.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`BoolmergeError`] enum.
//!
//! # Examples
//!
//! ```
//! use boolmerge::error::{BoolmergeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BoolmergeError::invalid_argument("k must not be negative"))
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

/// The main error type for boolmerge operations.
#[derive(Error, Debug)]
pub enum BoolmergeError {
    /// I/O errors not tied to a specific input file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An index or query file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A malformed index record.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A query term is absent from the index being evaluated.
    #[error("Term not found: {0}")]
    TermNotFound(String),

    /// Invalid argument passed by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation attempted in the wrong state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with BoolmergeError.
pub type Result<T> = std::result::Result<T, BoolmergeError>;

impl BoolmergeError {
    /// Create a new file read error.
    pub fn file_read<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        BoolmergeError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        BoolmergeError::Parse(msg.into())
    }

    /// Create a new term not found error.
    pub fn term_not_found<S: Into<String>>(term: S) -> Self {
        BoolmergeError::TermNotFound(term.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        BoolmergeError::InvalidArgument(msg.into())
    }

    /// Create a new invalid state error.
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        BoolmergeError::InvalidState(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        BoolmergeError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error is the expected per-query "term not found" outcome.
    pub fn is_term_not_found(&self) -> bool {
        matches!(self, BoolmergeError::TermNotFound(_))
    }
}
