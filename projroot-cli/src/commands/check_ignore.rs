//! Command to check paths against the project root's `.gitignore`.

use crate::error::CliError;
use crate::utils::{open_session, GlobalOptions};
use clap::Args;
use projroot::path::relative_to_root;
use std::path::PathBuf;

/// Report which paths are ignored by the project root's `.gitignore`.
///
/// Like `git check-ignore`, ignored paths are printed and the command fails
/// when none of them is ignored.
#[derive(Args)]
pub struct CheckIgnoreCommand {
    /// Paths to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Use this root instead of discovering one from the paths
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print every path with its status
    #[arg(long, short = 'n')]
    pub non_matching: bool,
}

impl CheckIgnoreCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = open_session(global)?;
        let root = match &self.root {
            Some(root) => session.resolve(root)?,
            None => session.locate_root(self.paths.as_slice(), None)?.path,
        };
        let spec = session.load_ignore(&root)?;

        let mut any_ignored = false;
        for path in &self.paths {
            let ignored = match relative_to_root(session.paths(), &root, path)? {
                Some(relative) => {
                    let is_dir = session.resolve(path)?.is_dir();
                    spec.matches(&relative, is_dir)
                }
                None => false,
            };
            any_ignored |= ignored;

            if self.non_matching {
                let status = if ignored { "ignored" } else { "not ignored" };
                println!("{}\t{status}", path.display());
            } else if ignored {
                println!("{}", path.display());
            }
        }

        if any_ignored {
            Ok(())
        } else {
            Err(CliError::SemanticFailure("no path is ignored".to_string()))
        }
    }
}
