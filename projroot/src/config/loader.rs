//! Project file loading and tool-section extraction.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use toml::{Table, Value};

use crate::config::schema::{NormalizedConfig, RawConfig, TARGET_VERSION_KEY};
use crate::error::{Error, Result};
use crate::path::PathCache;
use crate::version::{infer_target_versions, TargetVersionSet};

/// Parsed project documents, keyed by resolved path.
///
/// Documents are read at most once per cache. Failed reads are not cached.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: Mutex<HashMap<PathBuf, Arc<Table>>>,
}

impl DocumentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed document at `resolved`, reading it on first use.
    ///
    /// # Errors
    ///
    /// See [`read_document`].
    pub fn get_or_load(&self, resolved: &Path) -> Result<Arc<Table>> {
        if let Some(hit) = self.lock().get(resolved) {
            return Ok(Arc::clone(hit));
        }

        let document = Arc::new(read_document(resolved)?);
        let mut entries = self.lock();
        let entry = entries
            .entry(resolved.to_path_buf())
            .or_insert_with(|| Arc::clone(&document));
        Ok(Arc::clone(entry))
    }

    /// Number of cached documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no document has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Table>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read and parse a TOML document.
///
/// # Errors
///
/// - [`Error::ConfigNotFound`] if the file does not exist
/// - [`Error::PermissionDenied`] or [`Error::Io`] if it cannot be read
/// - [`Error::InvalidDocument`] if it is not valid TOML
pub fn read_document(path: &Path) -> Result<Table> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::from_io(path, e),
    })?;

    contents
        .parse::<Table>()
        .map_err(|e| Error::InvalidDocument {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
}

/// The `[tool.<tool>]` table of a document, if present and a table.
#[must_use]
pub fn tool_section<'a>(document: &'a Table, tool: &str) -> Option<&'a Table> {
    document
        .get("tool")
        .and_then(Value::as_table)
        .and_then(|tools| tools.get(tool))
        .and_then(Value::as_table)
}

/// The `[project] requires-python` string of a document, if present.
#[must_use]
pub fn requires_python(document: &Table) -> Option<&str> {
    document
        .get("project")
        .and_then(Value::as_table)
        .and_then(|project| project.get("requires-python"))
        .and_then(Value::as_str)
}

/// Targets inferred from a document's `requires-python`, if any.
#[must_use]
pub fn infer_target_versions_from(document: &Table) -> Option<TargetVersionSet> {
    requires_python(document).and_then(infer_target_versions)
}

/// Loads the tool section of project files through the session caches.
///
/// # Examples
///
/// ```no_run
/// use projroot::config::{ConfigLoader, DocumentCache};
/// use projroot::path::PathCache;
/// use std::path::Path;
///
/// let paths = PathCache::new().unwrap();
/// let documents = DocumentCache::new();
/// let loader = ConfigLoader::new(&paths, &documents, "black");
/// let config = loader.load(Path::new("pyproject.toml")).unwrap();
/// println!("line length: {:?}", config.get_integer("line_length"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader<'a> {
    paths: &'a PathCache,
    documents: &'a DocumentCache,
    tool: &'a str,
}

impl<'a> ConfigLoader<'a> {
    /// Create a loader for `[tool.<tool>]` sections.
    #[must_use]
    pub fn new(paths: &'a PathCache, documents: &'a DocumentCache, tool: &'a str) -> Self {
        Self {
            paths,
            documents,
            tool,
        }
    }

    /// The tool whose section is read.
    #[must_use]
    pub fn tool(&self) -> &str {
        self.tool
    }

    /// The parsed document at `path`.
    ///
    /// # Errors
    ///
    /// Propagates resolution and [`read_document`] errors.
    pub fn document(&self, path: &Path) -> Result<Arc<Table>> {
        let resolved = self.paths.resolve(path)?;
        self.documents.get_or_load(&resolved)
    }

    /// Whether the document at `path` has a `tool.<tool>` entry.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigLoader::document`] errors.
    pub fn has_tool_section(&self, path: &Path) -> Result<bool> {
        let document = self.document(path)?;
        Ok(document
            .get("tool")
            .and_then(Value::as_table)
            .is_some_and(|tools| tools.contains_key(self.tool)))
    }

    /// The tool section exactly as written; empty when absent.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigLoader::document`] errors.
    pub fn load_raw(&self, path: &Path) -> Result<RawConfig> {
        let document = self.document(path)?;
        Ok(RawConfig::new(
            tool_section(&document, self.tool).cloned().unwrap_or_default(),
        ))
    }

    /// The normalized tool section.
    ///
    /// When no `target_version` is configured, it is inferred from
    /// `project.requires-python`; explicit configuration always wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] for a missing file and
    /// [`Error::InvalidDocument`] for malformed TOML.
    pub fn load(&self, path: &Path) -> Result<NormalizedConfig> {
        let document = self.document(path)?;
        let raw = RawConfig::new(
            tool_section(&document, self.tool).cloned().unwrap_or_default(),
        );
        let mut config = raw.normalize();

        if !config.contains_key(TARGET_VERSION_KEY) {
            if let Some(targets) = infer_target_versions_from(&document) {
                config.set_target_versions(&targets);
            } else {
                debug!("no target versions inferred for {}", path.display());
            }
        }
        Ok(config)
    }
}
