//! Prebuilt artifact bundles.
//!
//! An artifact is either a single file (`libfoo.a`) or a bundle directory
//! such as an `.xcframework`, whose immediate subdirectories are per-platform
//! slices (`ios-arm64`, `ios-arm64_x86_64-simulator`, ...). Only the layout
//! is read here; binary contents are never interpreted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::util::hash::{sha256_dir, sha256_file};

/// Header extensions searched when none are configured.
pub const DEFAULT_HEADER_EXTENSIONS: &[&str] = &["h", "hpp"];

/// A prebuilt artifact on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Artifact { path: path.into() }
    }

    pub fn is_bundle(&self) -> bool {
        self.path.is_dir()
    }

    /// Per-platform slices: non-empty immediate subdirectories, sorted.
    pub fn slices(&self) -> Result<Vec<String>> {
        if !self.is_bundle() {
            return Ok(Vec::new());
        }

        let mut slices = Vec::new();
        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("failed to read bundle: {}", self.path.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let has_content = std::fs::read_dir(entry.path())?.next().is_some();
            if has_content {
                slices.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        slices.sort();
        Ok(slices)
    }

    /// Header files inside the bundle, relative to the artifact root, sorted.
    pub fn headers(&self, extensions: &[String]) -> Result<Vec<PathBuf>> {
        if !self.is_bundle() {
            return Ok(Vec::new());
        }

        let mut headers = Vec::new();
        for entry in WalkDir::new(&self.path).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("failed to walk {}", self.path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
            if matches {
                let relative = entry
                    .path()
                    .strip_prefix(&self.path)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                headers.push(relative);
            }
        }

        Ok(headers)
    }

    /// SHA-256 of the artifact. Bundles hash every file they contain.
    pub fn checksum(&self) -> Result<String> {
        if self.is_bundle() {
            sha256_dir(&self.path)
        } else {
            sha256_file(&self.path)
        }
    }
}

/// What an inspection of a binary target found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub target: String,
    pub path: PathBuf,
    pub bundle: bool,
    pub slices: Vec<String>,
    pub headers: Vec<PathBuf>,
    pub checksum: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        DEFAULT_HEADER_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    fn create_xcframework(root: &Path) -> PathBuf {
        let bundle = root.join("libpiratelc.xcframework");
        let headers = bundle.join("ios-arm64/libpiratelc.framework/Headers");
        std::fs::create_dir_all(&headers).unwrap();
        std::fs::write(headers.join("piratelc.h"), "void piratelc_init(void);").unwrap();
        std::fs::write(bundle.join("Info.plist"), "<plist/>").unwrap();
        std::fs::create_dir_all(bundle.join("empty-slice")).unwrap();
        bundle
    }

    #[test]
    fn test_slices_skip_files_and_empty_dirs() {
        let tmp = TempDir::new().unwrap();
        let artifact = Artifact::new(create_xcframework(tmp.path()));

        assert!(artifact.is_bundle());
        assert_eq!(artifact.slices().unwrap(), vec!["ios-arm64".to_string()]);
    }

    #[test]
    fn test_headers_are_relative() {
        let tmp = TempDir::new().unwrap();
        let artifact = Artifact::new(create_xcframework(tmp.path()));

        assert_eq!(
            artifact.headers(&default_extensions()).unwrap(),
            vec![PathBuf::from(
                "ios-arm64/libpiratelc.framework/Headers/piratelc.h"
            )]
        );
        assert!(artifact.headers(&["hh".to_string()]).unwrap().is_empty());
    }

    #[test]
    fn test_file_artifact_has_no_slices() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("libx.a");
        std::fs::write(&path, "!<arch>\n").unwrap();
        let artifact = Artifact::new(&path);

        assert!(!artifact.is_bundle());
        assert!(artifact.slices().unwrap().is_empty());
        assert_eq!(artifact.checksum().unwrap(), sha256_file(&path).unwrap());
    }

    #[test]
    fn test_checksum_is_stable() {
        let tmp = TempDir::new().unwrap();
        let artifact = Artifact::new(create_xcframework(tmp.path()));

        assert_eq!(artifact.checksum().unwrap(), artifact.checksum().unwrap());
    }
}
