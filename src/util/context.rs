//! Global context for Quay operations.
//!
//! Provides centralized access to the working directory, manifest discovery
//! and merged configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest as find_manifest_in, ManifestError};
use crate::core::Package;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Explicit manifest path (overrides discovery)
    manifest_path: Option<PathBuf>,

    /// Global config file, if a home directory is known
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            manifest_path: None,
            global_config: global_config_path(),
        }
    }

    /// Use an explicit manifest instead of searching for one.
    pub fn with_manifest_path(mut self, path: Option<PathBuf>) -> Self {
        self.manifest_path = path.map(|p| if p.is_absolute() { p } else { self.cwd.join(p) });
        self
    }

    /// Use a specific global config file (or none).
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find the manifest: the explicit path if given, otherwise `Quay.toml`
    /// or `Quay.json` in cwd or the nearest parent that has one.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        if let Some(ref path) = self.manifest_path {
            return Ok(path.clone());
        }

        let mut current = self.cwd.clone();
        loop {
            match find_manifest_in(&current) {
                Ok(path) => return Ok(path),
                Err(ManifestError::NotFound { .. }) => {
                    if !current.pop() {
                        return Err(ManifestError::NotFound {
                            dir: self.cwd.clone(),
                        });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Find and load the package.
    pub fn load_package(&self) -> Result<Package> {
        let manifest_path = self.find_manifest()?;
        let package = Package::load(&manifest_path)?;
        Ok(package)
    }

    /// Merged configuration for a package rooted at `project_root`.
    pub fn config(&self, project_root: &Path) -> Config {
        load_config(
            self.global_config.as_deref(),
            &project_config_path(project_root),
        )
    }
}
