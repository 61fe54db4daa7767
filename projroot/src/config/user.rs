//! User-level configuration file location.
//!
//! The location depends only on a [`UserEnvironment`] snapshot, so it can be
//! computed for any platform and tested without touching the process
//! environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::expand_tilde_with;

/// Environment variable naming the base directory for user configuration.
pub const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

/// Operating-system family, as far as config location is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: the config lives directly in the home directory.
    Windows,
    /// Everything else: XDG base directories.
    Unix,
}

impl Platform {
    /// The platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// The inputs that decide where user configuration lives.
///
/// # Examples
///
/// ```
/// use projroot::config::{user_config_path, Platform, UserEnvironment};
/// use std::path::PathBuf;
///
/// let env = UserEnvironment {
///     platform: Platform::Unix,
///     xdg_config_home: None,
///     home_dir: Some(PathBuf::from("/home/ada")),
/// };
/// assert_eq!(
///     user_config_path(&env, "black").unwrap(),
///     PathBuf::from("/home/ada/.config/black"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEnvironment {
    /// The platform family.
    pub platform: Platform,
    /// Value of `XDG_CONFIG_HOME`, if set.
    pub xdg_config_home: Option<String>,
    /// The user's home directory, if known.
    pub home_dir: Option<PathBuf>,
}

impl UserEnvironment {
    /// Capture the running process's environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            platform: Platform::current(),
            xdg_config_home: env::var(XDG_CONFIG_HOME_ENV).ok(),
            home_dir: home::home_dir(),
        }
    }
}

/// Path of the user-level configuration file for `tool`.
///
/// - Windows: `<home>/.<tool>`
/// - Otherwise: `$XDG_CONFIG_HOME/<tool>`, or `<home>/.config/<tool>` when the
///   variable is unset or empty. A leading `~` in the variable is expanded.
///
/// The file need not exist.
///
/// # Errors
///
/// Returns [`Error::HomeDirectoryUnknown`] when the home directory is needed
/// but unknown.
pub fn user_config_path(env: &UserEnvironment, tool: &str) -> Result<PathBuf> {
    let home = env.home_dir.as_deref();
    match env.platform {
        Platform::Windows => {
            let home = home.ok_or(Error::HomeDirectoryUnknown)?;
            Ok(home.join(format!(".{tool}")))
        }
        Platform::Unix => {
            let config_root = match env.xdg_config_home.as_deref() {
                Some(xdg) if !xdg.is_empty() => expand_tilde_with(Path::new(xdg), home)?,
                _ => home.ok_or(Error::HomeDirectoryUnknown)?.join(".config"),
            };
            Ok(config_root.join(tool))
        }
    }
}
