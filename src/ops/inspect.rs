//! Artifact inspection for binary targets.

use anyhow::Result;

use crate::core::{Artifact, ArtifactReport, DescriptorError, Package, Target};

/// Look up a binary target by name.
pub fn binary_target<'a>(
    package: &'a Package,
    name: &str,
) -> Result<&'a Target, DescriptorError> {
    let target = package
        .target(name)
        .ok_or_else(|| DescriptorError::TargetNotFound {
            name: name.to_string(),
            available: package.targets().iter().map(|t| t.name().to_string()).collect(),
        })?;

    if !target.is_binary() {
        return Err(DescriptorError::NotABinaryTarget {
            name: name.to_string(),
        });
    }

    Ok(target)
}

/// Inspect the artifact behind the binary target named `target`.
pub fn inspect_target(
    package: &Package,
    target: &str,
    header_extensions: &[String],
) -> Result<ArtifactReport> {
    let declared = binary_target(package, target)?;
    let path = package
        .artifact_path(declared)
        .ok_or_else(|| DescriptorError::NotABinaryTarget {
            name: target.to_string(),
        })?;

    let artifact = Artifact::new(&path);
    tracing::debug!("inspecting {}", path.display());

    Ok(ArtifactReport {
        target: target.to_string(),
        bundle: artifact.is_bundle(),
        slices: artifact.slices()?,
        headers: artifact.headers(header_extensions)?,
        checksum: artifact.checksum()?,
        path,
    })
}

/// Checksums of every binary target, in declaration order.
pub fn checksums(package: &Package) -> Result<Vec<(String, String)>> {
    package
        .descriptor()
        .binary_targets()
        .filter_map(|target| {
            package
                .artifact_path(target)
                .map(|path| (target.name().to_string(), path))
        })
        .map(|(name, path)| -> Result<_> { Ok((name, Artifact::new(path).checksum()?)) })
        .collect()
}
