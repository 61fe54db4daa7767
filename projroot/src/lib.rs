#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # projroot
//!
//! Project root discovery and configuration resolution for source formatters.
//!
//! Given the paths a formatter was invoked on, this library finds the
//! project root, loads the formatter's section of `pyproject.toml`, infers
//! target Python versions from `requires-python`, loads the root's
//! `.gitignore` and locates the user-level configuration file.
//!
//! ## Core Types
//!
//! - [`Session`]: owns every cache for one run and exposes all operations
//! - [`ProjectRoot`] and [`DiscoveryReason`]: the result of root discovery
//! - [`NormalizedConfig`]: a tool section with normalized option names
//! - [`TargetVersion`] and [`infer_target_versions`]: version inference
//! - [`IgnoreSpec`]: a compiled `.gitignore`
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use projroot::{infer_target_versions, TargetVersion};
//!
//! let targets = infer_target_versions(">=3.11").unwrap();
//! assert!(targets.contains(&TargetVersion::Py311));
//! assert!(!targets.contains(&TargetVersion::Py310));
//! ```

pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod path;
pub mod project;
pub mod session;
pub mod version;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, NormalizedConfig, RawConfig, UserEnvironment};
pub use error::{Error, Result};
pub use ignore::IgnoreSpec;
pub use logging::{init_logger, LogLevel, Logger};
pub use path::PathCache;
pub use project::{DiscoveryReason, ProjectRoot, RootLocator};
pub use session::{ConfigOrigin, FoundConfig, Session};
pub use version::{
    infer_target_versions, SpecifierSet, TargetVersion, TargetVersionSet, Version, VersionRange,
};
