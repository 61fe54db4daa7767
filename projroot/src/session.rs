//! The owner of every cache used during one run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::config::{
    user_config_path, ConfigLoader, DocumentCache, NormalizedConfig, UserEnvironment,
    DEFAULT_TOOL, PROJECT_FILE,
};
use crate::error::Result;
use crate::ignore::{IgnoreCache, IgnoreLoader, IgnoreSpec};
use crate::path::PathCache;
use crate::project::{ProjectRoot, RootCache, RootLocator};

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// The project file at the project root.
    Project,
    /// The user-level configuration file.
    User,
}

/// A configuration file chosen for a set of sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundConfig {
    /// Path of the configuration file.
    pub path: PathBuf,
    /// Which kind of file it is.
    pub origin: ConfigOrigin,
    /// The project root the search started from.
    pub root: ProjectRoot,
}

/// Caches and settings for one formatting run.
///
/// All lookups go through the session, so each path is resolved, each
/// document parsed and each root located at most once. A session is
/// `Send + Sync` and can be shared between threads.
///
/// # Examples
///
/// ```no_run
/// use projroot::Session;
///
/// let session = Session::new().unwrap();
/// let root = session.locate_root(&["src/app.py"], None).unwrap();
/// let config = session.load_config(&root.path.join("pyproject.toml")).unwrap();
/// println!("{} ({}): {} options", root.path.display(), root.reason, config.len());
/// ```
#[derive(Debug)]
pub struct Session {
    tool: String,
    environment: UserEnvironment,
    paths: PathCache,
    documents: DocumentCache,
    roots: RootCache,
    ignores: IgnoreCache,
}

impl Session {
    /// Create a session rooted at the current directory for the default tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_paths(PathCache::new()?))
    }

    /// Create a session that resolves relative paths against `base`.
    #[must_use]
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self::with_paths(PathCache::with_base(base))
    }

    fn with_paths(paths: PathCache) -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            environment: UserEnvironment::from_process(),
            paths,
            documents: DocumentCache::new(),
            roots: RootCache::new(),
            ignores: IgnoreCache::new(),
        }
    }

    /// Use `[tool.<tool>]` instead of the default tool section.
    #[must_use]
    pub fn for_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Use `environment` to locate user-level configuration.
    #[must_use]
    pub fn with_environment(mut self, environment: UserEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// The tool whose section is read.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The path cache.
    #[must_use]
    pub fn paths(&self) -> &PathCache {
        &self.paths
    }

    /// A config loader over this session's caches.
    #[must_use]
    pub fn config_loader(&self) -> ConfigLoader<'_> {
        ConfigLoader::new(&self.paths, &self.documents, &self.tool)
    }

    /// A root locator over this session's caches.
    #[must_use]
    pub fn root_locator(&self) -> RootLocator<'_> {
        RootLocator::new(&self.paths, self.config_loader(), &self.roots)
    }

    /// Resolve `path` to an absolute, symlink-free path.
    ///
    /// # Errors
    ///
    /// See [`PathCache::resolve`].
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        self.paths.resolve(path)
    }

    /// Locate the project root for `sources`.
    ///
    /// # Errors
    ///
    /// See [`RootLocator::locate`].
    pub fn locate_root<S: AsRef<Path>>(
        &self,
        sources: &[S],
        stdin_filename: Option<&str>,
    ) -> Result<ProjectRoot> {
        self.root_locator().locate(sources, stdin_filename)
    }

    /// Load the normalized tool section of the project file at `path`.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load`].
    pub fn load_config(&self, path: &Path) -> Result<NormalizedConfig> {
        self.config_loader().load(path)
    }

    /// Load the `.gitignore` at `root`.
    ///
    /// # Errors
    ///
    /// See [`IgnoreLoader::load`].
    pub fn load_ignore(&self, root: &Path) -> Result<Arc<IgnoreSpec>> {
        IgnoreLoader::new(&self.paths, &self.ignores).load(root)
    }

    /// Path of the user-level configuration file, resolved.
    ///
    /// # Errors
    ///
    /// Fails when the home directory is needed but unknown.
    pub fn user_config_path(&self) -> Result<PathBuf> {
        let path = user_config_path(&self.environment, &self.tool)?;
        self.paths.resolve(&path)
    }

    /// Find the configuration file that applies to `sources`.
    ///
    /// The project file at the project root is used when it exists, otherwise
    /// the user-level file when it exists.
    ///
    /// # Errors
    ///
    /// Propagates root discovery errors. A missing home directory only means
    /// there is no user-level file.
    pub fn find_project_config<S: AsRef<Path>>(
        &self,
        sources: &[S],
        stdin_filename: Option<&str>,
    ) -> Result<Option<FoundConfig>> {
        let root = self.locate_root(sources, stdin_filename)?;
        let project_file = root.path.join(PROJECT_FILE);
        if project_file.is_file() {
            return Ok(Some(FoundConfig {
                path: project_file,
                origin: ConfigOrigin::Project,
                root,
            }));
        }

        match self.user_config_path() {
            Ok(user) if user.is_file() => Ok(Some(FoundConfig {
                path: user,
                origin: ConfigOrigin::User,
                root,
            })),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("ignoring user-level configuration: {e}");
                Ok(None)
            }
        }
    }
}
