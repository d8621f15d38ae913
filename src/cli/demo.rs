use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use petrdf::fixtures;

use super::DemoKind;

/// Write a synthetic RDF9 container as JSON
pub fn run(output: PathBuf, kind: DemoKind) -> Result<()> {
    info!("Generating {:?} demo container", kind);

    let container = match kind {
        DemoKind::List => fixtures::list_mode_file(1000),
        DemoKind::Sino => fixtures::sinogram_file(),
        DemoKind::Geo => fixtures::geometry_file(),
        DemoKind::Norm => fixtures::normalisation_file(),
    };

    let json = container
        .to_json()
        .context("Failed to serialise demo container")?;
    std::fs::write(&output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}
