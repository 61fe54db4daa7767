//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `find_root`: Locate the project root for a set of sources
//! - `show_config`: Show the normalized formatter configuration
//! - `target_versions`: Infer target versions from `requires-python`
//! - `user_config`: Show the user-level configuration path
//! - `check_ignore`: Check paths against the root's `.gitignore`
//! - `completions`: Generate shell completion scripts

pub mod check_ignore;
pub mod completions;
pub mod find_root;
pub mod show_config;
pub mod target_versions;
pub mod user_config;

pub use check_ignore::CheckIgnoreCommand;
pub use completions::CompletionsCommand;
pub use find_root::FindRootCommand;
pub use show_config::ShowConfigCommand;
pub use target_versions::TargetVersionsCommand;
pub use user_config::UserConfigCommand;
