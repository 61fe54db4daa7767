//! Tool configuration.
//!
//! Two sources of configuration are supported:
//!
//! 1. The project file (`pyproject.toml`) at the project root, whose
//!    `[tool.<name>]` table is loaded by [`ConfigLoader`]
//! 2. A user-level file, located by [`user_config_path`]
//!
//! Option names are normalized on load (`line-length` becomes
//! `line_length`); values are never changed. When the project does not set
//! `target_version`, it is inferred from `[project] requires-python`.
//!
//! # Examples
//!
//! ```
//! use projroot::config::{normalize_key, RawConfig};
//!
//! let table: toml::Table = "line-length = 100".parse().unwrap();
//! let config = RawConfig::new(table).normalize();
//! assert_eq!(config.get_integer("line_length"), Some(100));
//! assert_eq!(normalize_key("target-version"), "target_version");
//! ```

pub mod loader;
pub mod schema;
pub mod user;

pub use loader::{
    infer_target_versions_from, read_document, requires_python, tool_section, ConfigLoader,
    DocumentCache,
};
pub use schema::{normalize_key, NormalizedConfig, RawConfig, TARGET_VERSION_KEY};
pub use user::{user_config_path, Platform, UserEnvironment, XDG_CONFIG_HOME_ENV};

/// Tool name used when none is given.
pub const DEFAULT_TOOL: &str = "black";

/// File name of the structured project file.
pub const PROJECT_FILE: &str = "pyproject.toml";
