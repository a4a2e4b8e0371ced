//! `quay validate` command

use anyhow::Result;

use quay::util::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let package = ctx.load_package()?;
    let descriptor = package.descriptor();

    let artifacts = descriptor.binary_targets().count();
    tracing::info!(
        "{} is valid: {} product(s), {} target(s), {} artifact(s)",
        package.name(),
        descriptor.products.len(),
        descriptor.targets.len(),
        artifacts
    );

    println!("{} ok", package.name());

    Ok(())
}
