//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Folder Tree - Build and inspect in-memory folder hierarchies from scripts
#[derive(Parser, Debug)]
#[command(name = "foldertree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an operation script and print the resulting tree
    Apply(commands::apply::ApplyArgs),

    /// Display the tree built by an operation script
    Tree(commands::tree::TreeArgs),

    /// List the files in the tree built by an operation script
    Ls(commands::ls::LsArgs),

    /// Check that an operation script parses, without running it
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Logs go to stderr so stdout stays parseable
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .format_target(false)
            .try_init()
            .ok();

        match self.command {
            Commands::Apply(args) => commands::apply::execute(args, &self.color),
            Commands::Tree(args) => commands::tree::execute(args, &self.color),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
        }
    }
}
