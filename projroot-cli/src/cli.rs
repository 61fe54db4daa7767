//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckIgnoreCommand, CompletionsCommand, FindRootCommand, ShowConfigCommand,
    TargetVersionsCommand, UserConfigCommand,
};
use clap::{Parser, Subcommand};

/// Inspect project root discovery and formatter configuration.
#[derive(Parser)]
#[command(name = "projroot")]
#[command(
    version,
    about = "Inspect project root discovery and formatter configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Tool whose `[tool.<NAME>]` section is read
    #[arg(
        long,
        value_name = "NAME",
        global = true,
        env = "PROJROOT_TOOL",
        default_value = projroot::config::DEFAULT_TOOL
    )]
    pub tool: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Locate the project root for a set of sources
    FindRoot(FindRootCommand),

    /// Show the normalized formatter configuration
    ShowConfig(ShowConfigCommand),

    /// Infer target Python versions from a requires-python value
    TargetVersions(TargetVersionsCommand),

    /// Show the user-level configuration path
    UserConfig(UserConfigCommand),

    /// Check paths against the project root's .gitignore
    CheckIgnore(CheckIgnoreCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
