//! User-facing diagnostic messages.
//!
//! Every error shown to the user names the offending item, the context it was
//! found in, and at least one concrete way to fix the manifest.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str =
        "Create a Quay.toml next to the prebuilt bundle, or pass --manifest-path";

    /// Suggestion when the manifest fails to parse or validate.
    pub const CHECK_MANIFEST: &str = "Run `quay validate --verbose` to see each validation step";

    /// Suggestion when a product is not found.
    pub const PRODUCT_NOT_FOUND: &str = "Run `quay describe` to see the declared products";

    /// Suggestion when a target is not found.
    pub const TARGET_NOT_FOUND: &str = "Run `quay describe` to see the declared targets";

    /// Suggestion when a binary artifact is absent.
    pub const MISSING_ARTIFACT: &str =
        "Check the target's `path`; it is resolved relative to the manifest directory";
}

/// An error message with optional context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let label = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", label, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("binary artifact `releases/libX.bundle` not found")
            .with_location("/pkg/Quay.toml")
            .with_context("looked for /pkg/releases/libX.bundle")
            .with_suggestion("Check the target's `path`")
            .with_suggestion("Fetch the release bundle");

        let output = diag.format(false);
        assert!(output.starts_with("error: binary artifact"));
        assert!(output.contains("  --> /pkg/Quay.toml"));
        assert!(output.contains("  = looked for /pkg/releases/libX.bundle"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Fetch the release bundle"));
    }

    #[test]
    fn test_error_without_suggestions() {
        let output = Diagnostic::error("no product named `libY`").format(false);
        assert_eq!(output, "error: no product named `libY`\n");
    }

    #[test]
    fn test_colored_label() {
        let output = Diagnostic::error("bad manifest")
            .with_suggestion("fix it")
            .format(true);
        assert!(output.starts_with("\x1b[1;31merror\x1b[0m: bad manifest"));
        assert!(output.contains("\x1b[1;32mhelp\x1b[0m: consider:"));
    }
}
