use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use petrdf::config::ReaderConfig;
use petrdf::inspect::inspect_file;

/// Inspect an RDF file and print the report
pub fn run(file: PathBuf, config: ReaderConfig, json: bool) -> Result<()> {
    info!("Inspecting {}", file.display());

    let report = match inspect_file(&file, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Inspection error: {:#}", e);
            std::process::exit(1);
        }
    };

    if json {
        let text =
            serde_json::to_string_pretty(&report).context("Failed to serialise inspection report")?;
        println!("{}", text);
    } else {
        #[cfg(feature = "colorized_output")]
        {
            println!("{}", report.format_colored());
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            println!("{}", report);
        }
    }

    if let Some(stage) = report.stopped_at() {
        info!("Stopped at stage: {}", stage);
        std::process::exit(1);
    }
    Ok(())
}
