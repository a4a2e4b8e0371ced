//! Products - externally consumable groupings of targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a product produces for its consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// A library linked into consumers
    #[default]
    Library,

    /// A runnable executable
    Executable,
}

/// How a library product is linked into its consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Let the consuming build decide
    #[default]
    Automatic,
    Static,
    Dynamic,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKind::Library => write!(f, "library"),
            ProductKind::Executable => write!(f, "executable"),
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Linkage::Automatic => write!(f, "automatic"),
            Linkage::Static => write!(f, "static"),
            Linkage::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// A named, externally consumable grouping of one or more targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Names of the targets this product exposes, in link order
    pub targets: Vec<String>,

    #[serde(default)]
    pub kind: ProductKind,

    /// Only meaningful for libraries
    #[serde(default)]
    pub linkage: Linkage,
}

impl Product {
    /// Create a library product exposing `targets`.
    pub fn library(
        name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Product {
            name: name.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            kind: ProductKind::Library,
            linkage: Linkage::Automatic,
        }
    }

    /// Create an executable product exposing `targets`.
    pub fn executable(
        name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Product {
            kind: ProductKind::Executable,
            ..Self::library(name, targets)
        }
    }

    pub fn is_library(&self) -> bool {
        self.kind == ProductKind::Library
    }
}
