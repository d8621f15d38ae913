use std::path::PathBuf;

use anyhow::{Context, Result};
use petrdf::config::ReaderConfig;
use petrdf::exam::ExamInfo;
use petrdf::geometry::ProjectionGeometry;
use petrdf::rdf::Classification;
use petrdf::reader::RdfFile;
use petrdf::scanner::ResolvedScanner;
use serde::Serialize;

/// Everything `info --json` prints
#[derive(Serialize)]
struct FileInfo<'a> {
    file: String,
    classification: &'a Classification,
    scanner: &'a ResolvedScanner,
    exam: &'a ExamInfo,
    geometry: &'a ProjectionGeometry,
}

/// Display information about an RDF file
pub fn run(file: PathBuf, config: ReaderConfig, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let rdf = RdfFile::open_with_config(&file, config)
        .with_context(|| format!("Failed to open RDF file: {}", file.display()))?;

    if json {
        let info = FileInfo {
            file: file.display().to_string(),
            classification: rdf.classification(),
            scanner: rdf.resolved_scanner(),
            exam: rdf.exam_info(),
            geometry: rdf.projection_geometry(),
        };
        let text = serde_json::to_string_pretty(&info).context("Failed to serialise file info")?;
        println!("{}", text);
        return Ok(());
    }

    let classification = rdf.classification();
    println!("GE RDF File Information");
    println!("=======================");
    println!("File: {}", file.display());
    println!();

    println!("Classification:");
    println!("  Kind: {}", classification.kind);
    println!("  Format version: {}", classification.format_version);
    if let Some(dims) = classification.geo_dims {
        println!("  Geometric correction: {}-D", dims.as_u32());
    }
    println!();

    let resolved = rdf.resolved_scanner();
    let scanner = &resolved.scanner;
    println!("Scanner:");
    println!("  Model: {}", scanner.name);
    println!(
        "  Rings: {} x {} detectors",
        scanner.num_rings, scanner.num_detectors_per_ring
    );
    println!(
        "  Effective ring radius: {:.2} mm",
        scanner.effective_ring_radius()
    );
    println!("  Timing resolution: {} ps", scanner.timing_resolution);
    println!(
        "  TOF: {} bins of {} ps",
        scanner.max_num_timing_poss, scanner.size_timing_pos
    );
    for adjustment in &resolved.adjustments {
        println!("  Adjusted: {}", adjustment);
    }
    println!();

    let exam = rdf.exam_info();
    println!("Exam:");
    println!("  Patient position: {}", exam.patient_position);
    println!(
        "  Energy window: {}-{} keV",
        exam.energy_window.low_kev, exam.energy_window.high_kev
    );
    match exam.scan_start() {
        Some(start) => println!("  Scan start: {}", start.to_rfc3339()),
        None => println!("  Scan start: {} s", exam.scan_start_secs),
    }
    for frame in &exam.time_frames {
        println!(
            "  Frame: {:.3}-{:.3} s ({:.3} s)",
            frame.start_secs,
            frame.end_secs,
            frame.duration_secs()
        );
    }
    println!(
        "  Radionuclide: {} (half-life {} s, branching ratio {})",
        exam.radionuclide.name, exam.radionuclide.half_life_secs, exam.radionuclide.branching_ratio
    );
    println!();

    let geometry = rdf.projection_geometry();
    println!("Projection geometry:");
    println!(
        "  Span {}, max ring difference {}",
        geometry.span, geometry.max_ring_difference
    );
    println!(
        "  {} views x {} tangential positions",
        geometry.num_views, geometry.num_tangential_poss
    );
    println!(
        "  TOF bins: {} (mash factor {})",
        geometry.num_tof_bins, geometry.tof_mash_factor
    );
    println!(
        "  Bed position: {} mm horizontal, {} mm vertical",
        geometry.bed_position_horizontal, geometry.bed_position_vertical
    );

    Ok(())
}
