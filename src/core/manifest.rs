//! Manifest files: naming, formats and discovery.
//!
//! A package is described by `Quay.toml` (canonical) or `Quay.json`. Both
//! carry the same fields; the format is chosen by file extension.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Canonical manifest filename.
pub const MANIFEST_NAME: &str = "Quay.toml";

/// JSON manifest filename.
pub const MANIFEST_JSON_NAME: &str = "Quay.json";

/// Serialization format of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    #[default]
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a manifest path's extension. Anything that is not
    /// `.json` is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

/// Error locating a manifest on disk.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(
        "could not find {} or {} in {} or any parent directory",
        MANIFEST_NAME,
        MANIFEST_JSON_NAME,
        .dir.display()
    )]
    NotFound { dir: PathBuf },

    #[error(
        "found both {} and {}; remove one of them",
        .toml.display(),
        .json.display()
    )]
    AmbiguousManifest { toml: PathBuf, json: PathBuf },
}

/// Find the manifest in `dir` (no upward search).
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let toml = dir.join(MANIFEST_NAME);
    let json = dir.join(MANIFEST_JSON_NAME);

    match (toml.is_file(), json.is_file()) {
        (true, true) => Err(ManifestError::AmbiguousManifest { toml, json }),
        (true, false) => Ok(toml),
        (false, true) => Ok(json),
        (false, false) => Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("pkg/Quay.json")),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("pkg/Quay.toml")),
            ManifestFormat::Toml
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("manifest")),
            ManifestFormat::Toml
        );
    }

    #[test]
    fn test_find_manifest_prefers_single_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_JSON_NAME), "{}").unwrap();

        assert_eq!(
            find_manifest(tmp.path()).unwrap(),
            tmp.path().join(MANIFEST_JSON_NAME)
        );
    }

    #[test]
    fn test_find_manifest_ambiguous() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_NAME), "").unwrap();
        std::fs::write(tmp.path().join(MANIFEST_JSON_NAME), "{}").unwrap();

        assert!(matches!(
            find_manifest(tmp.path()),
            Err(ManifestError::AmbiguousManifest { .. })
        ));
    }
}
