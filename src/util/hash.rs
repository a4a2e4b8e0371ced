//! Hashing utilities for artifact checksums.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

/// Compute SHA256 hash of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute a SHA256 digest over every regular file below `dir`.
///
/// Each file contributes its `/`-separated relative path and its own digest,
/// visited in sorted path order, so the result does not depend on directory
/// iteration order or on the absolute location of `dir`.
pub fn sha256_dir(dir: &Path) -> Result<String> {
    let mut fingerprint = Fingerprint::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        fingerprint
            .update_str(&relative)
            .update_str(&sha256_file(entry.path())?);
    }

    Ok(fingerprint.finish())
}

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sha256_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.txt");
        std::fs::write(&path, "hello").unwrap();

        assert_eq!(
            sha256_file(&path).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_sha256_dir_is_location_independent() {
        let tmp = TempDir::new().unwrap();
        for root in ["a", "b"] {
            let slice = tmp.path().join(root).join("ios-arm64");
            std::fs::create_dir_all(&slice).unwrap();
            std::fs::write(slice.join("piratelc.h"), "int f(void);").unwrap();
        }

        let a = sha256_dir(&tmp.path().join("a")).unwrap();
        let b = sha256_dir(&tmp.path().join("b")).unwrap();
        assert_eq!(a, b);

        std::fs::write(tmp.path().join("b/ios-arm64/piratelc.h"), "int g(void);").unwrap();
        assert_ne!(a, sha256_dir(&tmp.path().join("b")).unwrap());
    }

    #[test]
    fn test_sha256_dir_sees_renames() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("one.h"), "x").unwrap();
        let before = sha256_dir(tmp.path()).unwrap();

        std::fs::rename(tmp.path().join("one.h"), tmp.path().join("two.h")).unwrap();
        assert_ne!(before, sha256_dir(tmp.path()).unwrap());
    }
}
