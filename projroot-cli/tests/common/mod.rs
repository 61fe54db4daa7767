//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with an isolated environment

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated project tree and user config directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Canonical path to the temporary directory
    pub temp_path: PathBuf,
    /// Directory used as `XDG_CONFIG_HOME`
    pub xdg_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let xdg_dir = temp_path.join("xdg");
        std::fs::create_dir_all(&xdg_dir).expect("Failed to create xdg dir");

        Self {
            temp_dir,
            temp_path,
            xdg_dir,
        }
    }

    /// Get a command running in the project tree with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("projroot").expect("Failed to find projroot binary");
        cmd.current_dir(&self.temp_path)
            .env("XDG_CONFIG_HOME", &self.xdg_dir)
            .env_remove("PROJROOT_TOOL")
            .env_remove("PROJROOT_STDIN_FILENAME")
            .env_remove("PROJROOT_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file in the test environment, creating parent directories.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Mark the temp directory as a git checkout.
    pub fn init_git_marker(&self) {
        self.create_dir(".git");
    }
}
