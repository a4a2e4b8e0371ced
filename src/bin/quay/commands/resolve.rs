//! `quay resolve` command

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::ResolveArgs;
use quay::ops::resolve::{resolve, resolve_all};
use quay::util::fs::relative_path;
use quay::util::GlobalContext;
use quay::ResolvedTarget;

#[derive(Serialize)]
struct ResolvedProduct {
    product: String,
    targets: Vec<ResolvedTarget>,
}

pub fn execute(args: ResolveArgs, ctx: &GlobalContext) -> Result<()> {
    let package = ctx.load_package()?;
    let config = ctx.config(package.root());

    let single = args.product.is_some();
    let products = match args.product {
        Some(product) => {
            let targets = resolve(&package, &product)?;
            vec![ResolvedProduct { product, targets }]
        }
        None => resolve_all(&package)?
            .into_iter()
            .map(|(product, targets)| ResolvedProduct { product, targets })
            .collect(),
    };

    if args.json || config.json_output() {
        // A requested product prints as a bare target list.
        let json = match products.first() {
            Some(only) if single => serde_json::to_string_pretty(&only.targets),
            _ => serde_json::to_string_pretty(&products),
        }
        .context("failed to serialize resolved targets")?;
        println!("{}", json);
        return Ok(());
    }

    for resolved in &products {
        println!("Link order for '{}':", resolved.product);
        for (index, target) in resolved.targets.iter().enumerate() {
            match target.path {
                Some(ref path) => println!(
                    "  {}. {} [{}] {}",
                    index + 1,
                    target.name,
                    target.kind,
                    relative_path(ctx.cwd(), path).display()
                ),
                None => println!("  {}. {} [{}]", index + 1, target.name, target.kind),
            }
        }
    }

    Ok(())
}
