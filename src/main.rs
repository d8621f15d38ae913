//! # petrdf
//!
//! Command-line tool for inspecting GE RDF9 PET raw data files.
//!
//! ## Usage
//!
//! ```bash
//! # Summary of an RDF file
//! petrdf info rdf9_sino.h5
//!
//! # Step-by-step inspection with a custom tolerance
//! petrdf --config petrdf.toml check rdf9_norm.h5
//!
//! # Is this a GE RDF file?
//! petrdf probe unknown.h5 && echo "GE RDF"
//!
//! # Synthetic sinogram container for trying the other commands
//! petrdf demo --kind sino demo_sino.json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
