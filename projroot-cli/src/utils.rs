//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including session construction and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use projroot::Session;
use serde::Serialize;
use std::path::Path;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Tool whose section of the project file is read.
    pub tool: String,
}

/// Output format for commands that print structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one item per line.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Open a session in the current directory for the selected tool.
pub fn open_session(global: &GlobalOptions) -> Result<Session, CliError> {
    Ok(Session::new()?.for_tool(global.tool.clone()))
}

/// Render `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Config(e.to_string()))
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
