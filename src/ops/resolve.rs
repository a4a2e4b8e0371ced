//! Product resolution.
//!
//! Resolving a product yields the targets a consumer has to link, in the
//! order the product lists them, with paths anchored at the package root.
//! Only direct membership is considered; declared dependencies are not
//! traversed.

use crate::core::{DescriptorError, Package, Product, ResolvedTarget};

/// Resolve `product` into the ordered list of targets it exposes.
pub fn resolve(package: &Package, product: &str) -> Result<Vec<ResolvedTarget>, DescriptorError> {
    let product = package
        .product(product)
        .ok_or_else(|| DescriptorError::UnknownProduct {
            name: product.to_string(),
            available: package.descriptor().product_names(),
        })?;

    resolve_product(package, product)
}

/// Resolve every product in declaration order.
pub fn resolve_all(
    package: &Package,
) -> Result<Vec<(String, Vec<ResolvedTarget>)>, DescriptorError> {
    package
        .products()
        .iter()
        .map(|product| -> Result<_, DescriptorError> {
            Ok((product.name.clone(), resolve_product(package, product)?))
        })
        .collect()
}

fn resolve_product(
    package: &Package,
    product: &Product,
) -> Result<Vec<ResolvedTarget>, DescriptorError> {
    let resolved = product
        .targets
        .iter()
        .map(|name| {
            package
                .target(name)
                .map(|target| ResolvedTarget::new(target, package.root()))
                .ok_or_else(|| DescriptorError::UnknownTarget {
                    product: product.name.clone(),
                    target: name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "{}: product `{}` resolved to {} target(s)",
        package.name(),
        product.name,
        resolved.len()
    );

    Ok(resolved)
}
