//! Package - a validated descriptor anchored at a filesystem root.
//!
//! Loading is all-or-nothing: either every invariant holds, including the
//! existence of each binary artifact, or the caller gets the first error.

use std::path::{Path, PathBuf};

use crate::core::descriptor::PackageDescriptor;
use crate::core::errors::DescriptorError;
use crate::core::manifest::ManifestFormat;
use crate::core::product::Product;
use crate::core::target::Target;
use crate::util::fs::{ensure_readable, normalize_path};

/// A validated package descriptor and the root its paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    descriptor: PackageDescriptor,
    root: PathBuf,
}

impl Package {
    /// Load a package from a manifest file. The root is the manifest's
    /// directory.
    pub fn load(manifest_path: &Path) -> Result<Self, DescriptorError> {
        let content =
            std::fs::read_to_string(manifest_path).map_err(|source| DescriptorError::Io {
                path: manifest_path.to_path_buf(),
                source,
            })?;

        let root = manifest_path.parent().unwrap_or(Path::new("."));
        let root = if root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            root
        };

        tracing::debug!("loading manifest {}", manifest_path.display());
        Self::parse(&content, ManifestFormat::from_path(manifest_path), root)
    }

    /// Parse and validate descriptor text, resolving relative paths against
    /// `root`.
    pub fn parse(
        content: &str,
        format: ManifestFormat,
        root: &Path,
    ) -> Result<Self, DescriptorError> {
        let descriptor = PackageDescriptor::parse(content, format)?;
        Self::new(descriptor, root)
    }

    /// Validate an in-memory descriptor against `root`.
    pub fn new(descriptor: PackageDescriptor, root: &Path) -> Result<Self, DescriptorError> {
        descriptor.validate()?;

        let root = normalize_path(root);
        check_artifacts(&descriptor, &root)?;

        tracing::debug!("{}: descriptor valid", descriptor.name);
        Ok(Package { descriptor, root })
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Get the descriptor.
    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    /// Get the package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all products.
    pub fn products(&self) -> &[Product] {
        &self.descriptor.products
    }

    /// Get all targets.
    pub fn targets(&self) -> &[Target] {
        &self.descriptor.targets
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.descriptor.target(name)
    }

    /// Get a product by name.
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.descriptor.product(name)
    }

    /// Absolute location of a binary target's artifact.
    pub fn artifact_path(&self, target: &Target) -> Option<PathBuf> {
        target.as_binary().map(|t| self.root.join(&t.path))
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.descriptor.name, self.root.display())
    }
}

fn check_artifacts(descriptor: &PackageDescriptor, root: &Path) -> Result<(), DescriptorError> {
    for binary in descriptor.targets.iter().filter_map(Target::as_binary) {
        let resolved = root.join(&binary.path);
        if let Err(e) = ensure_readable(&resolved) {
            tracing::debug!(
                "{}: artifact for `{}` unusable at {}: {}",
                descriptor.name,
                binary.name,
                resolved.display(),
                e
            );
            return Err(DescriptorError::MissingArtifact {
                path: binary.path.clone(),
                resolved,
            });
        }

        tracing::debug!("{}: found artifact {}", descriptor.name, resolved.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{MANIFEST_JSON_NAME, MANIFEST_NAME};
    use tempfile::TempDir;

    const LIB_X: &str = r#"
name = "libX"
dependencies = []

[[products]]
name = "libX"
targets = ["libX"]

[[targets]]
name = "libX"
kind = "binary"
path = "releases/libX.bundle"
"#;

    fn create_bundle(dir: &Path) {
        std::fs::create_dir_all(dir.join("releases/libX.bundle/ios-arm64")).unwrap();
    }

    #[test]
    fn test_package_load() {
        let tmp = TempDir::new().unwrap();
        create_bundle(tmp.path());
        let manifest_path = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&manifest_path, LIB_X).unwrap();

        let pkg = Package::load(&manifest_path).unwrap();
        assert_eq!(pkg.name(), "libX");
        assert_eq!(pkg.root(), tmp.path().canonicalize().unwrap());
        assert_eq!(
            pkg.artifact_path(pkg.target("libX").unwrap()),
            Some(pkg.root().join("releases/libX.bundle"))
        );
    }

    #[test]
    fn test_missing_artifact_names_exact_path() {
        let tmp = TempDir::new().unwrap();

        match Package::parse(LIB_X, ManifestFormat::Toml, tmp.path()) {
            Err(DescriptorError::MissingArtifact { path, resolved }) => {
                assert_eq!(path, PathBuf::from("releases/libX.bundle"));
                assert!(resolved.ends_with("releases/libX.bundle"));
            }
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_file_artifact_is_accepted() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("libX.a"), "!<arch>\n").unwrap();

        let descriptor = PackageDescriptor::new("libX")
            .with_product(Product::library("libX", ["libX"]))
            .with_target(Target::binary("libX", "libX.a"));

        assert!(Package::new(descriptor, tmp.path()).is_ok());
    }

    #[test]
    fn test_empty_artifact_path_does_not_resolve_to_root() {
        let tmp = TempDir::new().unwrap();
        let descriptor = PackageDescriptor::new("libX")
            .with_product(Product::library("libX", ["libX"]))
            .with_target(Target::binary("libX", ""));

        assert!(matches!(
            Package::new(descriptor, tmp.path()),
            Err(DescriptorError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_absolute_artifact_path_is_rejected_even_if_present() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let descriptor = PackageDescriptor::new("libX")
            .with_product(Product::library("libX", ["libX"]))
            .with_target(Target::binary("libX", outside.path()));

        assert!(matches!(
            Package::new(descriptor, tmp.path()),
            Err(DescriptorError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_structural_errors_precede_artifact_checks() {
        let tmp = TempDir::new().unwrap();
        let descriptor = PackageDescriptor::new("libX")
            .with_target(Target::binary("libX", "missing.bundle"))
            .with_target(Target::binary("libX", "missing.bundle"));

        assert!(matches!(
            Package::new(descriptor, tmp.path()),
            Err(DescriptorError::DuplicateTarget { .. })
        ));
    }

    #[test]
    fn test_load_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        create_bundle(tmp.path());

        let first = Package::parse(LIB_X, ManifestFormat::Toml, tmp.path()).unwrap();
        let second = Package::parse(LIB_X, ManifestFormat::Toml, tmp.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_manifest_loads_like_toml() {
        let tmp = TempDir::new().unwrap();
        create_bundle(tmp.path());
        let json = r#"{
  "name": "libX",
  "dependencies": [],
  "products": [{ "name": "libX", "targets": ["libX"] }],
  "targets": [{ "name": "libX", "kind": "binary", "path": "releases/libX.bundle" }]
}"#;
        let json_path = tmp.path().join(MANIFEST_JSON_NAME);
        std::fs::write(&json_path, json).unwrap();

        let from_json = Package::load(&json_path).unwrap();
        let from_toml = Package::parse(LIB_X, ManifestFormat::Toml, tmp.path()).unwrap();
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_unreadable_manifest() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            Package::load(&tmp.path().join(MANIFEST_NAME)),
            Err(DescriptorError::Io { .. })
        ));
    }
}
