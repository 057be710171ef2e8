//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks an
//! operation script without applying it.
//!
//! ## Functionality
//!
//! - **Script Parsing**: Parses the script and reports the first YAML or
//!   schema error. Unknown operation keys get a did-you-mean hint.
//! - **Operation Summary**: Counts steps per operation kind.
//! - **Dry Run** (`--run`): Also applies the script to an empty root and
//!   reports every step that would fail.

use anyhow::Result;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use foldertree::defaults::DEFAULT_SCRIPT_FILENAME;
use foldertree::manager::FileSystemManager;
use foldertree::output::{emoji, OutputConfig};
use foldertree::script::{self, Operation, OPERATION_NAMES};

/// Check that an operation script parses, without running it
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the operation script to validate.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCRIPT_FILENAME, env = "FOLDERTREE_SCRIPT")]
    pub script: PathBuf,

    /// Also run the script against an empty root and report failing steps.
    #[arg(long)]
    pub run: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let script_path = &args.script;
    println!(
        "{} Validating script: {}",
        emoji(&out, "🔍", "[SCAN]"),
        script_path.display()
    );

    if !script_path.exists() {
        return Err(foldertree::suggestions::script_not_found(script_path));
    }
    let content = std::fs::read_to_string(script_path)?;

    let script = match script::parse(&content) {
        Ok(script) => {
            println!(
                "{} Script parsed successfully",
                emoji(&out, "✅", "[OK]")
            );
            script
        }
        Err(e) => {
            println!("{} Script parsing failed", emoji(&out, "❌", "[ERR]"));
            if let Some(unknown) = first_unknown_operation(&content) {
                return Err(foldertree::suggestions::unknown_operation(&unknown));
            }
            return Err(anyhow::anyhow!("Script parsing failed: {}", e));
        }
    };

    println!("\n{} Script Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Total operations: {}", script.len());
    for (kind, count) in summarize(&script) {
        println!("   {}: {}", kind, count);
    }

    if args.run {
        println!(
            "\n{} Running against an empty root...",
            emoji(&out, "🔄", "[CHECK]")
        );
        let mut manager = FileSystemManager::new();
        let report = script::run(&script, &mut manager, true)?;
        for failure in &report.failures {
            println!(
                "{} Step {} ({}): {}",
                emoji(&out, "❌", "[ERR]"),
                failure.step,
                failure.operation,
                failure.error
            );
        }
        if !report.is_success() {
            println!(
                "\n{} Script has {} failing step(s)",
                emoji(&out, "❌", "[ERR]"),
                report.failures.len()
            );
            return Err(anyhow::anyhow!("Script validation failed"));
        }
        println!("{} All steps applied", emoji(&out, "✅", "[OK]"));
    }

    println!("\n{} Script is valid", emoji(&out, "✅", "[OK]"));
    Ok(())
}

/// Step counts per operation kind, in a stable order
fn summarize(script: &[Operation]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for operation in script {
        let kind = match operation {
            Operation::Mkdir { .. } => "mkdir",
            Operation::Touch { .. } => "touch",
            Operation::Copy { .. } => "copy",
            Operation::Move { .. } => "move",
            Operation::Delete { .. } => "delete",
            Operation::Rename { .. } => "rename",
        };
        *counts.entry(kind).or_insert(0) += 1;
    }
    counts
}

/// The first step key that names no known operation, if the script is a
/// sequence of single-key mappings at all.
fn first_unknown_operation(content: &str) -> Option<String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).ok()?;
    value.as_sequence()?.iter().find_map(|step| {
        step.as_mapping()?
            .keys()
            .filter_map(|key| key.as_str())
            .find(|key| !OPERATION_NAMES.contains(key))
            .map(str::to_string)
    })
}
