//! Core data structures for Quay.
//!
//! This module contains the descriptor model and its loader:
//! - Products, targets and dependency declarations
//! - The package descriptor and its structural validation
//! - Packages (validated descriptors anchored at a root)
//! - Prebuilt artifact bundles

pub mod artifact;
pub mod dependency;
pub mod descriptor;
pub mod errors;
pub mod manifest;
pub mod package;
pub mod product;
pub mod target;

pub use artifact::{Artifact, ArtifactReport};
pub use dependency::DependencySpec;
pub use descriptor::PackageDescriptor;
pub use errors::DescriptorError;
pub use manifest::{find_manifest, ManifestError, ManifestFormat, MANIFEST_JSON_NAME, MANIFEST_NAME};
pub use package::Package;
pub use product::{Linkage, Product, ProductKind};
pub use target::{BinaryTarget, ResolvedTarget, SourceTarget, Target, TargetKind};
