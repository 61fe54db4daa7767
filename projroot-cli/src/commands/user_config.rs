//! Command to show the user-level configuration path.

use crate::error::CliError;
use crate::utils::{open_session, GlobalOptions};
use clap::Args;

/// Show where the user-level configuration file lives.
#[derive(Args)]
pub struct UserConfigCommand {
    /// Fail unless the file exists
    #[arg(long)]
    pub exists: bool,
}

impl UserConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = open_session(global)?;
        let path = session.user_config_path()?;

        println!("{}", path.display());
        if self.exists && !path.is_file() {
            return Err(CliError::SemanticFailure(format!(
                "no user-level configuration at {}",
                path.display()
            )));
        }
        Ok(())
    }
}
