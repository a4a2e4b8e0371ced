//! Descriptor error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while loading, validating, or resolving a package descriptor.
///
/// Every variant describes an authoring or packaging mistake. None of them
/// are retryable, and a failed load never yields a partial descriptor.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DescriptorError {
    #[error("failed to read manifest `{}`", .path.display())]
    #[diagnostic(code(quay::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid package descriptor: {message}")]
    #[diagnostic(code(quay::load::invalid_descriptor))]
    InvalidDescriptor { message: String },

    #[error("duplicate target `{name}`")]
    #[diagnostic(code(quay::load::duplicate_target))]
    DuplicateTarget { name: String },

    #[error("duplicate product `{name}`")]
    #[diagnostic(code(quay::load::duplicate_product))]
    DuplicateProduct { name: String },

    #[error("product `{product}` references undeclared target `{target}`")]
    #[diagnostic(code(quay::load::unknown_target))]
    UnknownTarget { product: String, target: String },

    #[error("invalid dependency `{name}`: {message}")]
    #[diagnostic(code(quay::load::invalid_dependency))]
    InvalidDependency { name: String, message: String },

    #[error("missing artifact `{}`", .path.display())]
    #[diagnostic(code(quay::load::missing_artifact))]
    MissingArtifact {
        /// The path exactly as declared in the manifest.
        path: PathBuf,
        /// The path after joining it to the package root.
        resolved: PathBuf,
    },

    #[error("unknown product `{name}`")]
    #[diagnostic(code(quay::resolve::unknown_product))]
    UnknownProduct {
        name: String,
        available: Vec<String>,
    },

    #[error("no target named `{name}`")]
    #[diagnostic(code(quay::inspect::unknown_target))]
    TargetNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("target `{name}` is not a binary target")]
    #[diagnostic(code(quay::inspect::not_binary))]
    NotABinaryTarget { name: String },
}

impl DescriptorError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DescriptorError::InvalidDescriptor {
            message: message.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DescriptorError::Io { path, source } => {
                Diagnostic::error(format!("failed to read manifest: {}", source))
                    .with_location(path)
                    .with_suggestion(suggestions::NO_MANIFEST)
            }

            DescriptorError::InvalidDescriptor { message } => {
                Diagnostic::error("invalid package descriptor")
                    .with_context(message.clone())
                    .with_suggestion(suggestions::CHECK_MANIFEST)
            }

            DescriptorError::DuplicateTarget { name } => {
                Diagnostic::error(format!("target `{}` is declared more than once", name))
                    .with_suggestion("Rename or remove one of the duplicate targets")
            }

            DescriptorError::DuplicateProduct { name } => {
                Diagnostic::error(format!("product `{}` is declared more than once", name))
                    .with_suggestion("Rename or remove one of the duplicate products")
            }

            DescriptorError::UnknownTarget { product, target } => Diagnostic::error(format!(
                "product `{}` references target `{}`, which is not declared",
                product, target
            ))
            .with_suggestion(format!("Declare a target named `{}`", target))
            .with_suggestion(format!("Remove `{}` from the product's targets", target)),

            DescriptorError::InvalidDependency { name, message } => {
                Diagnostic::error(format!("invalid dependency `{}`", name))
                    .with_context(message.clone())
                    .with_suggestion(
                        "Give each dependency exactly one of `version`, `path` or `git`",
                    )
            }

            DescriptorError::MissingArtifact { path, resolved } => {
                Diagnostic::error(format!("binary artifact `{}` not found", path.display()))
                    .with_context(format!("looked for {}", resolved.display()))
                    .with_suggestion(suggestions::MISSING_ARTIFACT)
            }

            DescriptorError::UnknownProduct { name, available } => {
                let mut diag = Diagnostic::error(format!("no product named `{}`", name));

                if !available.is_empty() {
                    diag = diag.with_context(format!(
                        "available products: {}",
                        available.join(", ")
                    ));
                }

                diag.with_suggestion(suggestions::PRODUCT_NOT_FOUND)
            }

            DescriptorError::TargetNotFound { name, available } => {
                let mut diag = Diagnostic::error(format!("no target named `{}`", name));

                if !available.is_empty() {
                    diag = diag.with_context(format!(
                        "declared targets: {}",
                        available.join(", ")
                    ));
                }

                diag.with_suggestion(suggestions::TARGET_NOT_FOUND)
            }

            DescriptorError::NotABinaryTarget { name } => {
                Diagnostic::error(format!("target `{}` is built from source", name))
                    .with_suggestion("Only targets with kind = \"binary\" carry an artifact")
            }
        }
    }
}
