//! Quay CLI - package descriptors for prebuilt native libraries

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use quay::util::diagnostic::emit;
use quay::util::GlobalContext;
use quay::DescriptorError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<DescriptorError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("quay=debug")
    } else {
        EnvFilter::new("quay=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    let ctx = GlobalContext::new()?.with_manifest_path(cli.manifest_path);

    match cli.command {
        Commands::Validate => commands::validate::execute(&ctx),
        Commands::Resolve(args) => commands::resolve::execute(args, &ctx),
        Commands::Describe(args) => commands::describe::execute(args, &ctx),
        Commands::Inspect(args) => commands::inspect::execute(args, &ctx),
        Commands::Checksum(args) => commands::checksum::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
