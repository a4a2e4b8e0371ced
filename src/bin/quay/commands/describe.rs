//! `quay describe` command

use anyhow::{Context, Result};

use crate::cli::DescribeArgs;
use quay::core::manifest::ManifestFormat;
use quay::util::GlobalContext;

pub fn execute(args: DescribeArgs, ctx: &GlobalContext) -> Result<()> {
    let package = ctx.load_package()?;
    let config = ctx.config(package.root());
    let descriptor = package.descriptor();

    if args.json || config.json_output() {
        println!("{}", descriptor.render(ManifestFormat::Json)?);
        return Ok(());
    }

    println!("{}", package.name());
    if let Some(version) = descriptor
        .tools_version()
        .context("manifest passed validation but its tools-version did not parse")?
    {
        println!("  tools-version: {}", version);
    }
    println!("  root: {}", package.root().display());

    println!("products:");
    for product in &descriptor.products {
        if product.is_library() {
            println!(
                "  {} ({}, {}) -> {}",
                product.name,
                product.kind,
                product.linkage,
                product.targets.join(", ")
            );
        } else {
            println!(
                "  {} ({}) -> {}",
                product.name,
                product.kind,
                product.targets.join(", ")
            );
        }
    }

    println!("targets:");
    for target in &descriptor.targets {
        match target.declared_path() {
            Some(path) => println!("  {} [{}] {}", target.name(), target.kind(), path.display()),
            None => println!("  {} [{}]", target.name(), target.kind()),
        }
    }

    if !descriptor.dependencies.is_empty() {
        println!("dependencies:");
        for dep in &descriptor.dependencies {
            println!("  {}", dep.name);
        }
    }

    Ok(())
}
