//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the files in the
//! tree an operation script builds.
//!
//! ## Functionality
//!
//! - **File Listing**: Every file reachable from root, by path
//! - **Pattern Filtering**: Supports glob patterns to filter the output
//! - **Detailed Output**: Optional long format showing size and creation time
//! - **JSON Output**: Machine-readable listing with `--json`
//!
//! This command never fails on an individual step: steps that fail are
//! skipped (as with `apply --keep-going`) and the listing shows what was built.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use foldertree::defaults::DEFAULT_SCRIPT_FILENAME;
use foldertree::entity::EntityId;
use foldertree::manager::FileSystemManager;

/// List the files in the tree built by an operation script
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the operation script.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCRIPT_FILENAME, env = "FOLDERTREE_SCRIPT")]
    pub script: PathBuf,

    /// Filter files by glob pattern (e.g., "*.md", "/docs/**").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Use long listing format showing size and creation time.
    #[arg(short, long)]
    pub long: bool,

    /// Sort order for file listing.
    #[arg(long, value_enum, default_value = "path")]
    pub sort: SortOrder,

    /// Reverse the sort order.
    #[arg(short, long)]
    pub reverse: bool,

    /// Show only the total count of files.
    #[arg(long)]
    pub count: bool,

    /// Print the listing as JSON.
    #[arg(long, conflicts_with = "count")]
    pub json: bool,
}

/// Sort order options for file listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SortOrder {
    /// Sort alphabetically by file name
    Name,
    /// Sort by declared size
    Size,
    /// Sort by full path
    #[default]
    Path,
}

/// File information for listing
#[derive(Debug, Serialize)]
struct FileInfo {
    path: String,
    name: String,
    extension: String,
    size: u64,
    /// Seconds since the Unix epoch
    created: u64,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let (manager, _) = super::build_tree(&args.script, true)?;
    let files = collect(&manager, &args)?;

    if args.count {
        println!("{}", files.len());
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.is_empty() {
        println!("No files in tree.");
        return Ok(());
    }

    for file in &files {
        if args.long {
            println!("{:>8} {:>12} {}", format_size(file.size), file.created, file.path);
        } else {
            println!("{}", file.path);
        }
    }

    let total_size = files.iter().fold(0u64, |acc, f| acc.saturating_add(f.size));
    println!();
    println!("{} file(s), {} total", files.len(), format_size(total_size));

    Ok(())
}

/// Gather, filter and sort the files reachable from root
fn collect(manager: &FileSystemManager, args: &LsArgs) -> Result<Vec<FileInfo>> {
    let fs = manager.fs();
    let mut files = Vec::new();
    fs.walk(manager.root(), |_, entity| {
        if let EntityId::File(id) = entity {
            if let Some(file) = fs.get_file(id) {
                files.push(FileInfo {
                    path: manager.path_of(entity),
                    name: file.display_name(),
                    extension: file.extension().to_string(),
                    size: file.size(),
                    created: file
                        .created()
                        .duration_since(UNIX_EPOCH)
                        .map_or(0, |d| d.as_secs()),
                });
            }
        }
    });

    if let Some(pattern) = &args.pattern {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| foldertree::suggestions::invalid_glob(pattern, &e))?;
        files.retain(|f| glob_pattern.matches(&f.path));
    }

    match args.sort {
        SortOrder::Name => files.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::Size => files.sort_by_key(|f| f.size),
        SortOrder::Path => files.sort_by(|a, b| a.path.cmp(&b.path)),
    }
    if args.reverse {
        files.reverse();
    }
    Ok(files)
}

/// Format file size in human-readable format
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.1}G", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1}M", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1}K", size as f64 / KB as f64)
    } else {
        format!("{}B", size)
    }
}
