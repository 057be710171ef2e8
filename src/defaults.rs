//! Default values for foldertree.
//!
//! This module provides centralized default values used by the library and
//! the CLI commands, ensuring consistency and avoiding duplication.

/// Name given to the root folder of every manager.
pub const ROOT_NAME: &str = "root";

/// Operation script read by the CLI when `--script` is not given.
///
/// Can also be set with the `FOLDERTREE_SCRIPT` environment variable.
pub const DEFAULT_SCRIPT_FILENAME: &str = ".foldertree.yaml";
