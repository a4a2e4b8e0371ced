//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Quay - package descriptors for prebuilt native libraries
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Quay.toml or Quay.json (defaults to searching upward from cwd)
    #[arg(long, global = true, env = "QUAY_MANIFEST_PATH")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the manifest and check every invariant
    Validate,

    /// Print the targets a product links, in order
    Resolve(ResolveArgs),

    /// Show the package's products, targets and dependencies
    Describe(DescribeArgs),

    /// Show the slices and headers of a binary target's artifact
    Inspect(InspectArgs),

    /// Print SHA-256 checksums of binary artifacts
    Checksum(ChecksumArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Product to resolve (all products if omitted)
    pub product: Option<String>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Binary target to inspect
    pub target: String,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ChecksumArgs {
    /// Only checksum this target
    pub target: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
