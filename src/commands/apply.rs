//! Apply command implementation
//!
//! Runs an operation script step by step against an empty root, reports how
//! many steps applied, and prints the resulting tree. With `--keep-going`
//! failed steps are reported and skipped; the command still exits non-zero
//! when any step failed.

use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use foldertree::defaults::DEFAULT_SCRIPT_FILENAME;
use foldertree::output::{emoji, OutputConfig};

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the operation script
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCRIPT_FILENAME, env = "FOLDERTREE_SCRIPT")]
    pub script: PathBuf,

    /// Skip failing steps instead of stopping at the first one
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Do not print the resulting tree
    #[arg(long)]
    pub no_tree: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    if !args.quiet {
        println!(
            "{} Applying script: {}",
            emoji(&out, "📂", "[RUN]"),
            args.script.display()
        );
    }

    let result = super::build_tree(&args.script, args.keep_going);
    let (manager, report) = match result {
        Ok(built) => built,
        Err(e) => {
            if !args.quiet {
                println!("{} Apply failed", emoji(&out, "❌", "[ERR]"));
            }
            return Err(e);
        }
    };

    let stats = manager.stats();
    info!(
        "Applied {} step(s), {} failed, in {:.2}s",
        report.applied,
        report.failures.len(),
        start_time.elapsed().as_secs_f64()
    );

    if !args.quiet {
        for failure in &report.failures {
            println!(
                "{} Step {} ({}): {}",
                emoji(&out, "⚠️", "[WARN]"),
                failure.step,
                failure.operation,
                failure.error
            );
        }
        println!(
            "{} Applied {} step(s)",
            emoji(&out, "✅", "[OK]"),
            report.applied
        );
        println!(
            "   {} folder(s), {} file(s), {} byte(s)",
            stats.folders, stats.files, stats.total_size
        );
        if !args.no_tree {
            println!();
            super::tree::print(&manager, None, &out)?;
        }
    }

    if !report.is_success() {
        anyhow::bail!("{} step(s) failed", report.failures.len());
    }
    Ok(())
}
