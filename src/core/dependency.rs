//! Dependency declarations.
//!
//! Dependencies are parsed and validated so that a malformed declaration is
//! reported at load time, but they are never traversed: resolving a product
//! only looks at the product's own targets.

use std::path::PathBuf;

use semver::VersionReq;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::errors::DescriptorError;

/// Where a dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySource<'a> {
    Registry(VersionReq),
    Path(&'a PathBuf),
    Git(Url),
}

/// A dependency as it appears in the manifest's `dependencies` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Package name
    pub name: String,

    /// Version requirement (registry dependency)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Path to a local package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Git repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,

    /// Git branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Git tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Git revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

impl DependencySpec {
    /// Create a registry dependency.
    pub fn registry(name: impl Into<String>, version: impl Into<String>) -> Self {
        DependencySpec {
            name: name.into(),
            version: Some(version.into()),
            ..Default::default()
        }
    }

    /// Create a path dependency.
    pub fn path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        DependencySpec {
            name: name.into(),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Create a git dependency.
    pub fn git(name: impl Into<String>, url: impl Into<String>) -> Self {
        DependencySpec {
            name: name.into(),
            git: Some(url.into()),
            ..Default::default()
        }
    }

    /// Pin a git dependency to a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Check the declaration and return its source.
    pub fn source(&self) -> Result<DependencySource<'_>, DescriptorError> {
        let invalid = |message: String| DescriptorError::InvalidDependency {
            name: self.name.clone(),
            message,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("dependency name must not be empty".to_string()));
        }

        let declared = [
            self.version.is_some(),
            self.path.is_some(),
            self.git.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if declared != 1 {
            return Err(invalid(format!(
                "expected exactly one of `version`, `path` or `git`, found {}",
                declared
            )));
        }

        let git_refs = [&self.branch, &self.tag, &self.rev]
            .iter()
            .filter(|r| r.is_some())
            .count();

        if let Some(ref git) = self.git {
            if git_refs > 1 {
                return Err(invalid(
                    "only one of `branch`, `tag` or `rev` may be set".to_string(),
                ));
            }
            let url = Url::parse(git)
                .map_err(|e| invalid(format!("invalid git URL `{}`: {}", git, e)))?;
            return Ok(DependencySource::Git(url));
        }

        if git_refs > 0 {
            return Err(invalid(
                "`branch`, `tag` and `rev` require `git`".to_string(),
            ));
        }

        if let Some(ref path) = self.path {
            return Ok(DependencySource::Path(path));
        }

        let version = self.version.as_deref().unwrap_or_default();
        let req = VersionReq::parse(version)
            .map_err(|e| invalid(format!("invalid version requirement `{}`: {}", version, e)))?;
        Ok(DependencySource::Registry(req))
    }
}
