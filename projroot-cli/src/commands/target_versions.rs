//! Command to infer target Python versions.

use crate::error::CliError;
use crate::utils::{open_session, to_json, GlobalOptions, OutputFormat};
use clap::Args;
use projroot::config::requires_python;
use projroot::{infer_target_versions, TargetVersion};
use std::path::PathBuf;

/// Infer target Python versions from a `requires-python` value.
#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("input")
        .required(true)
        .args(["requires_python", "project"])
))]
pub struct TargetVersionsCommand {
    /// A requires-python value such as ">=3.8,<3.12"
    #[arg(value_name = "REQUIRES_PYTHON")]
    pub requires_python: Option<String>,

    /// Read `[project] requires-python` from this pyproject.toml
    #[arg(long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Print dotted versions (3.8) instead of names (py38)
    #[arg(long)]
    pub pretty: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl TargetVersionsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let value = match (self.requires_python, self.project) {
            (Some(value), _) => value,
            (None, Some(project)) => {
                let session = open_session(global)?;
                let document = session.config_loader().document(&project)?;
                requires_python(&document)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        CliError::SemanticFailure(format!(
                            "{} has no [project] requires-python",
                            project.display()
                        ))
                    })?
            }
            (None, None) => {
                return Err(CliError::InvalidArguments(
                    "give a requires-python value or --project".to_string(),
                ))
            }
        };

        let targets = infer_target_versions(&value).ok_or_else(|| {
            CliError::SemanticFailure(format!(
                "no supported target versions for requires-python `{value}`"
            ))
        })?;

        let render = |t: TargetVersion| if self.pretty { t.pretty() } else { t.name() };
        let rendered: Vec<String> = targets.into_iter().map(render).collect();
        match self.format {
            OutputFormat::Json => println!("{}", to_json(&rendered)?),
            OutputFormat::Text => {
                for line in rendered {
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}
