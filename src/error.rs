//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `foldertree` library. It uses the `thiserror` library to create an
//! `Error` enum covering every way a tree operation or an operation script
//! can be rejected.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Tree operations only ever produce two kinds:
//!   - `InvalidArgument` for precondition violations (unresolvable handles,
//!     empty names, duplicate sibling names, destinations outside the root
//!     hierarchy, cycle-creating reparents).
//!   - `IllegalHierarchy` for Manager-level attempts to copy or move a folder
//!     into itself or one of its own subfolders (root included).
//!
//!   The remaining variants belong to the script layer and wrapped I/O/YAML
//!   failures.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every tree operation validates before it mutates, so an `Err` always
//! means the tree is exactly as it was before the call.

use thiserror::Error;

/// Main error type for foldertree operations
#[derive(Error, Debug)]
pub enum Error {
    /// A precondition of a tree operation was violated.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// A folder was copied or moved into its own subtree.
    ///
    /// Kept apart from `InvalidArgument` so callers can tell a hierarchy
    /// violation from an ordinary bad argument.
    #[error("{message}")]
    IllegalHierarchy { message: String },

    /// An operation script could not be parsed or resolved.
    #[error("Script error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Script {
        message: String,
        /// Optional hint for how to fix the script
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn illegal_hierarchy(message: impl Into<String>) -> Self {
        Error::IllegalHierarchy {
            message: message.into(),
        }
    }

    /// Returns true for precondition violations.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Returns true for copy/move attempts into a folder's own subtree.
    pub fn is_illegal_hierarchy(&self) -> bool {
        matches!(self, Error::IllegalHierarchy { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
