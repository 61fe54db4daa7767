//! Command to show the normalized formatter configuration.

use crate::error::CliError;
use crate::utils::{open_session, shorten_path, to_json, GlobalOptions};
use clap::{Args, ValueEnum};
use projroot::ConfigOrigin;
use std::path::PathBuf;

/// Rendering for the configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML, as it would appear under `[tool.<name>]`.
    Toml,
    /// Pretty-printed JSON.
    Json,
}

/// Show the normalized configuration that applies to a set of sources.
#[derive(Args)]
pub struct ShowConfigCommand {
    /// Read this file instead of discovering one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sources used to discover the configuration file
    #[arg(value_name = "SRC")]
    pub sources: Vec<PathBuf>,

    /// File name standing in for `-` during discovery
    #[arg(long, value_name = "PATH", env = "PROJROOT_STDIN_FILENAME")]
    pub stdin_filename: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    pub format: ConfigFormat,
}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = open_session(global)?;

        let path = match self.config {
            Some(path) => path,
            None => {
                let found = session
                    .find_project_config(self.sources.as_slice(), self.stdin_filename.as_deref())?
                    .ok_or_else(|| {
                        CliError::Config(format!(
                            "no configuration file found for [tool.{}]",
                            session.tool()
                        ))
                    })?;
                if !global.quiet {
                    let origin = match found.origin {
                        ConfigOrigin::Project => "project",
                        ConfigOrigin::User => "user-level",
                    };
                    eprintln!("Using {origin} configuration: {}", shorten_path(&found.path));
                }
                found.path
            }
        };

        let config = session.load_config(&path)?;
        let rendered = match self.format {
            ConfigFormat::Json => to_json(&config)?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(&config).map_err(|e| CliError::Config(e.to_string()))?
            }
        };
        print!("{rendered}");
        if !rendered.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
