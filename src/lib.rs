//! Quay - package descriptors for prebuilt native libraries
//!
//! This crate loads and validates package descriptors that expose a
//! precompiled binary bundle (such as an `.xcframework`) as a consumable
//! product, and resolves products into the targets a consumer has to link.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{
    descriptor::PackageDescriptor, errors::DescriptorError, package::Package, product::Product,
    target::ResolvedTarget, target::Target,
};

pub use ops::resolve::resolve;
pub use util::context::GlobalContext;
