//! Main entry point for the projroot CLI.
//!
//! This is the command-line interface for inspecting how a formatter run
//! would resolve its project root and configuration:
//! - `find-root`: Locate the project root for a set of sources
//! - `show-config`: Show the normalized formatter configuration
//! - `target-versions`: Infer target versions from `requires-python`
//! - `user-config`: Show the user-level configuration path
//! - `check-ignore`: Check paths against the root's `.gitignore`

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = projroot::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        tool: cli.tool,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::FindRoot(cmd) => cmd.execute(&global),
        cli::Command::ShowConfig(cmd) => cmd.execute(&global),
        cli::Command::TargetVersions(cmd) => cmd.execute(&global),
        cli::Command::UserConfig(cmd) => cmd.execute(&global),
        cli::Command::CheckIgnore(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
