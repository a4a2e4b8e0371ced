//! `quay checksum` command

use anyhow::Result;

use crate::cli::ChecksumArgs;
use quay::ops::inspect::{binary_target, checksums};
use quay::util::GlobalContext;

pub fn execute(args: ChecksumArgs, ctx: &GlobalContext) -> Result<()> {
    let package = ctx.load_package()?;
    if let Some(ref target) = args.target {
        binary_target(&package, target)?;
    }

    let sums = checksums(&package)?;
    let selected = sums
        .iter()
        .filter(|(name, _)| args.target.as_ref().map_or(true, |target| name == target));

    for (name, sum) in selected {
        println!("{}  {}", sum, name);
    }

    Ok(())
}
