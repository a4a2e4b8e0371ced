//! The package descriptor and its structural validation.
//!
//! A descriptor is the static declaration of a package: its name, the
//! products it exposes, the dependencies it declares and the targets backing
//! those products. Checks that need the filesystem (artifact existence) live
//! in [`crate::core::package`]; everything here is a pure function of the
//! parsed text.

use std::collections::HashSet;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::dependency::DependencySpec;
use crate::core::errors::DescriptorError;
use crate::core::manifest::ManifestFormat;
use crate::core::product::Product;
use crate::core::target::Target;

/// The declarative record describing a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Package name
    pub name: String,

    /// Manifest format version, e.g. "5.5"
    #[serde(
        default,
        rename = "tools-version",
        alias = "tools_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools_version: Option<String>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,

    #[serde(default)]
    pub targets: Vec<Target>,
}

impl PackageDescriptor {
    /// Create an empty descriptor named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        PackageDescriptor {
            name: name.into(),
            tools_version: None,
            products: Vec::new(),
            dependencies: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Set the tools version.
    pub fn with_tools_version(mut self, version: impl Into<String>) -> Self {
        self.tools_version = Some(version.into());
        self
    }

    /// Add a product.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Add a dependency.
    pub fn with_dependency(mut self, dependency: DependencySpec) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Add a target.
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Parse descriptor text without validating it.
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self, DescriptorError> {
        match format {
            ManifestFormat::Toml => {
                toml::from_str(content).map_err(|e| DescriptorError::invalid(e.to_string()))
            }
            ManifestFormat::Json => serde_json::from_str(content)
                .map_err(|e| DescriptorError::invalid(e.to_string())),
        }
    }

    /// Serialize the descriptor back to text.
    pub fn render(&self, format: ManifestFormat) -> Result<String, DescriptorError> {
        match format {
            ManifestFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| DescriptorError::invalid(e.to_string()))
            }
            ManifestFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| DescriptorError::invalid(e.to_string())),
        }
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    /// Get a product by name.
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Names of all products in declaration order.
    pub fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    /// Iterate over binary targets.
    pub fn binary_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_binary())
    }

    /// Parse the tools version. Missing components count as zero, so "5.5"
    /// reads as 5.5.0.
    pub fn tools_version(&self) -> Result<Option<Version>, DescriptorError> {
        let Some(ref raw) = self.tools_version else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        let (core, rest) = match trimmed.find(['-', '+']) {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };

        let mut normalized = core.to_string();
        for _ in core.split('.').count()..3 {
            normalized.push_str(".0");
        }
        normalized.push_str(rest);

        Version::parse(&normalized)
            .map(Some)
            .map_err(|e| DescriptorError::invalid(format!("invalid tools-version `{}`: {}", raw, e)))
    }

    /// Check every invariant that does not need the filesystem.
    ///
    /// Checks run in a fixed order and the first failure is returned: package
    /// name, target names, products, dependencies, tools version.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::invalid("package name must not be empty"));
        }

        let mut target_names = HashSet::new();
        for target in &self.targets {
            if target.name().trim().is_empty() {
                return Err(DescriptorError::invalid("target name must not be empty"));
            }
            if !target_names.insert(target.name()) {
                return Err(DescriptorError::DuplicateTarget {
                    name: target.name().to_string(),
                });
            }
            if let Some(binary) = target.as_binary() {
                if binary.path.as_os_str().is_empty() {
                    return Err(DescriptorError::invalid(format!(
                        "binary target `{}` must declare a `path`",
                        binary.name
                    )));
                }
                if binary.path.is_absolute() || binary.path.has_root() {
                    return Err(DescriptorError::invalid(format!(
                        "binary target `{}` path `{}` must be relative to the manifest directory",
                        binary.name,
                        binary.path.display()
                    )));
                }
            }
        }
        tracing::debug!("{}: {} target(s) declared", self.name, target_names.len());

        let mut product_names = HashSet::new();
        for product in &self.products {
            if product.name.trim().is_empty() {
                return Err(DescriptorError::invalid("product name must not be empty"));
            }
            if !product_names.insert(product.name.as_str()) {
                return Err(DescriptorError::DuplicateProduct {
                    name: product.name.clone(),
                });
            }
            if product.targets.is_empty() {
                return Err(DescriptorError::invalid(format!(
                    "product `{}` must expose at least one target",
                    product.name
                )));
            }

            let mut seen = HashSet::new();
            for target in &product.targets {
                if !seen.insert(target.as_str()) {
                    return Err(DescriptorError::invalid(format!(
                        "product `{}` lists target `{}` more than once",
                        product.name, target
                    )));
                }
                if !target_names.contains(target.as_str()) {
                    return Err(DescriptorError::UnknownTarget {
                        product: product.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        tracing::debug!("{}: {} product(s) declared", self.name, product_names.len());

        let mut dependency_names = HashSet::new();
        for dependency in &self.dependencies {
            dependency.source()?;
            if !dependency_names.insert(dependency.name.as_str()) {
                return Err(DescriptorError::InvalidDependency {
                    name: dependency.name.clone(),
                    message: "declared more than once".to_string(),
                });
            }
        }
        if !self.dependencies.is_empty() {
            tracing::warn!(
                "{}: {} dependency declaration(s) are recorded but not resolved",
                self.name,
                self.dependencies.len()
            );
        }

        self.tools_version()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib_x() -> PackageDescriptor {
        PackageDescriptor::new("libX")
            .with_product(Product::library("libX", ["libX"]))
            .with_target(Target::binary("libX", "releases/libX.bundle"))
    }

    #[test]
    fn test_parse_toml_descriptor() {
        let content = r#"
name = "libX"
tools-version = "5.5"
dependencies = []

[[products]]
name = "libX"
targets = ["libX"]

[[targets]]
name = "libX"
kind = "binary"
path = "releases/libX.bundle"
"#;
        let descriptor = PackageDescriptor::parse(content, ManifestFormat::Toml).unwrap();

        assert_eq!(descriptor, lib_x().with_tools_version("5.5"));
        descriptor.validate().unwrap();
    }

    #[test]
    fn test_json_and_toml_agree() {
        let json = r#"{
            "name": "libX",
            "products": [{ "name": "libX", "targets": ["libX"] }],
            "dependencies": [],
            "targets": [{ "name": "libX", "kind": "binary", "path": "releases/libX.bundle" }]
        }"#;
        let from_json = PackageDescriptor::parse(json, ManifestFormat::Json).unwrap();
        let toml = lib_x().render(ManifestFormat::Toml).unwrap();
        let from_toml = PackageDescriptor::parse(&toml, ManifestFormat::Toml).unwrap();

        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_malformed_source_is_invalid_descriptor() {
        let result = PackageDescriptor::parse("name = ", ManifestFormat::Toml);
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidDescriptor { .. })
        ));

        let result = PackageDescriptor::parse(
            "name = \"x\"\n[[targets]]\nname = \"x\"\nkind = \"prebuilt\"\n",
            ManifestFormat::Toml,
        );
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = PackageDescriptor::new("  ").validate().unwrap_err();
        assert!(err.to_string().contains("package name must not be empty"));
    }

    #[test]
    fn test_duplicate_target() {
        let descriptor = lib_x().with_target(Target::source("libX"));
        match descriptor.validate() {
            Err(DescriptorError::DuplicateTarget { name }) => assert_eq!(name, "libX"),
            other => panic!("expected DuplicateTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_target_requires_path() {
        let descriptor = PackageDescriptor::new("libX").with_target(Target::binary("libX", ""));
        match descriptor.validate() {
            Err(DescriptorError::InvalidDescriptor { message }) => {
                assert!(message.contains("must declare a `path`"))
            }
            other => panic!("expected InvalidDescriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_target_path_must_be_relative() {
        let descriptor =
            PackageDescriptor::new("libX").with_target(Target::binary("libX", "/opt/libX.bundle"));
        match descriptor.validate() {
            Err(DescriptorError::InvalidDescriptor { message }) => {
                assert!(message.contains("must be relative to the manifest directory"))
            }
            other => panic!("expected InvalidDescriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_product() {
        let descriptor = lib_x().with_product(Product::executable("libX", ["libX"]));
        assert!(matches!(
            descriptor.validate(),
            Err(DescriptorError::DuplicateProduct { .. })
        ));
    }

    #[test]
    fn test_product_referencing_undeclared_target() {
        let descriptor = lib_x().with_product(Product::library("extras", ["libX", "libY"]));
        match descriptor.validate() {
            Err(DescriptorError::UnknownTarget { product, target }) => {
                assert_eq!(product, "extras");
                assert_eq!(target, "libY");
            }
            other => panic!("expected UnknownTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_product_without_targets() {
        let descriptor = lib_x().with_product(Product::library("empty", Vec::<String>::new()));
        assert!(matches!(
            descriptor.validate(),
            Err(DescriptorError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_every_product_target_is_declared() {
        let descriptor = lib_x()
            .with_target(Target::source("glue").with_source_path("Sources/glue"))
            .with_product(Product::library("full", ["glue", "libX"]));
        descriptor.validate().unwrap();

        for product in &descriptor.products {
            for name in &product.targets {
                assert!(descriptor.target(name).is_some());
            }
        }
    }

    #[test]
    fn test_duplicate_dependency() {
        let descriptor = lib_x()
            .with_dependency(DependencySpec::registry("zlib", "1"))
            .with_dependency(DependencySpec::path("zlib", "../zlib"));
        assert!(matches!(
            descriptor.validate(),
            Err(DescriptorError::InvalidDependency { .. })
        ));
    }

    #[test]
    fn test_tools_version_lenient() {
        let version = lib_x().with_tools_version("5.5").tools_version().unwrap();
        assert_eq!(version, Some(Version::new(5, 5, 0)));

        let version = lib_x().with_tools_version("6").tools_version().unwrap();
        assert_eq!(version, Some(Version::new(6, 0, 0)));

        assert!(lib_x().with_tools_version("five").validate().is_err());
        assert_eq!(lib_x().tools_version().unwrap(), None);
    }
}
