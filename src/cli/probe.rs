use std::path::PathBuf;

use anyhow::Result;
use log::debug;
use petrdf::reader::RdfFile;

/// Print whether `file` is a GE RDF file; exit with status 1 if not
pub fn run(file: PathBuf) -> Result<()> {
    if RdfFile::probe(&file) {
        println!("{}: GE RDF", file.display());
        return Ok(());
    }

    debug!("Signature check failed for {}", file.display());
    println!("{}: not a GE RDF file", file.display());
    std::process::exit(1);
}
