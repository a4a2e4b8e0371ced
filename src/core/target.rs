//! Target definitions.
//!
//! A Target is either built from source or backed by a precompiled binary
//! artifact that lives next to the manifest.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Discriminant of a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Built from source by the consumer's toolchain
    Source,

    /// Precompiled bundle referenced by path
    Binary,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Source => "source",
            TargetKind::Binary => "binary",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source-built target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTarget {
    /// Target name
    pub name: String,

    /// Source directory relative to the manifest (not checked on load)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// A target backed by a precompiled artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryTarget {
    /// Target name
    pub name: String,

    /// Artifact location relative to the manifest directory
    pub path: PathBuf,
}

/// A named buildable or prebuilt unit, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Target {
    Source(SourceTarget),
    Binary(BinaryTarget),
}

impl Target {
    /// Create a source target.
    pub fn source(name: impl Into<String>) -> Self {
        Target::Source(SourceTarget {
            name: name.into(),
            path: None,
        })
    }

    /// Create a binary target pointing at `path`.
    pub fn binary(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Target::Binary(BinaryTarget {
            name: name.into(),
            path: path.into(),
        })
    }

    /// Set the source directory of a source target. No effect on binary targets.
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        if let Target::Source(ref mut source) = self {
            source.path = Some(path.into());
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Source(t) => &t.name,
            Target::Binary(t) => &t.name,
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Source(_) => TargetKind::Source,
            Target::Binary(_) => TargetKind::Binary,
        }
    }

    /// The path as declared in the manifest, if any.
    pub fn declared_path(&self) -> Option<&Path> {
        match self {
            Target::Source(t) => t.path.as_deref(),
            Target::Binary(t) => Some(&t.path),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Target::Binary(_))
    }

    pub fn as_binary(&self) -> Option<&BinaryTarget> {
        match self {
            Target::Binary(t) => Some(t),
            Target::Source(_) => None,
        }
    }
}

/// A target resolved against a package root, ready to hand to a linker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub name: String,
    pub kind: TargetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ResolvedTarget {
    /// Resolve `target` relative to `root`.
    pub fn new(target: &Target, root: &Path) -> Self {
        ResolvedTarget {
            name: target.name().to_string(),
            kind: target.kind(),
            path: target.declared_path().map(|p| root.join(p)),
        }
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path {
            Some(ref path) => write!(f, "{} ({}) {}", self.name, self.kind, path.display()),
            None => write!(f, "{} ({})", self.name, self.kind),
        }
    }
}
