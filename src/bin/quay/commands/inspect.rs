//! `quay inspect` command

use anyhow::{Context, Result};

use crate::cli::InspectArgs;
use quay::ops::inspect::inspect_target;
use quay::util::GlobalContext;

pub fn execute(args: InspectArgs, ctx: &GlobalContext) -> Result<()> {
    let package = ctx.load_package()?;
    let config = ctx.config(package.root());

    let report = inspect_target(&package, &args.target, &config.header_extensions())?;

    if args.json || config.json_output() {
        let json = serde_json::to_string_pretty(&report)
            .context("failed to serialize artifact report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}: {}", report.target, report.path.display());
    println!("  kind: {}", if report.bundle { "bundle" } else { "file" });
    println!("  sha256: {}", report.checksum);

    if !report.slices.is_empty() {
        println!("  slices:");
        for slice in &report.slices {
            println!("    {}", slice);
        }
    }

    if !report.headers.is_empty() {
        println!("  headers:");
        for header in &report.headers {
            println!("    {}", header.display());
        }
    }

    Ok(())
}
