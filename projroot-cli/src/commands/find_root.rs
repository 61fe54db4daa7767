//! Command to locate the project root for a set of sources.

use crate::error::CliError;
use crate::utils::{open_session, shorten_path, to_json, GlobalOptions, OutputFormat};
use clap::Args;
use std::path::PathBuf;

/// Locate the project root for a set of sources.
#[derive(Args)]
pub struct FindRootCommand {
    /// Source files or directories (`-` for stdin); defaults to the current directory
    #[arg(value_name = "SRC")]
    pub sources: Vec<PathBuf>,

    /// File name standing in for `-` during discovery
    #[arg(long, value_name = "PATH", env = "PROJROOT_STDIN_FILENAME")]
    pub stdin_filename: Option<String>,

    /// Also print why the directory was chosen
    #[arg(long)]
    pub reason: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl FindRootCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = open_session(global)?;
        let root = session.locate_root(self.sources.as_slice(), self.stdin_filename.as_deref())?;

        if global.verbose {
            eprintln!(
                "Identified `{}` as project root containing a {}.",
                shorten_path(&root.path),
                root.reason
            );
        }

        match self.format {
            OutputFormat::Json => println!("{}", to_json(&root)?),
            OutputFormat::Text if self.reason => {
                println!("{}\t{}", root.path.display(), root.reason);
            }
            OutputFormat::Text => println!("{}", root.path.display()),
        }
        Ok(())
    }
}
