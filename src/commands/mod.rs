//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `foldertree`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic, calling into the `foldertree` library.

pub mod apply;
pub mod ls;
pub mod tree;
pub mod validate;

use anyhow::Result;
use std::path::Path;

use foldertree::manager::FileSystemManager;
use foldertree::script::{self, RunReport, Script};

/// Load a script file, with a hinted error when it does not exist.
pub(crate) fn load_script(path: &Path) -> Result<Script> {
    if !path.exists() {
        return Err(foldertree::suggestions::script_not_found(path));
    }
    script::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load script from {}: {}", path.display(), e))
}

/// Run the script at `path` against a fresh manager.
pub(crate) fn build_tree(path: &Path, keep_going: bool) -> Result<(FileSystemManager, RunReport)> {
    let script = load_script(path)?;
    let mut manager = FileSystemManager::new();
    let report = script::run(&script, &mut manager, keep_going)?;
    Ok((manager, report))
}
