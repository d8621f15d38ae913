//! # RDF Inspection
//!
//! Runs the open pipeline one [`Stage`] at a time and records what passed, what
//! needed a catalog correction and where the file stopped being readable.
//! Where [`RdfFile::open`](crate::reader::RdfFile::open) fails on the first
//! problem, the report shows every stage up to it.
//!
//! ## Stages
//!
//! 1. **Container**: the file opens as a container
//! 2. **Signature**: the manufacturer is GE
//! 3. **Version**: the major revision is 9
//! 4. **Classification**: list-mode, sinogram, normalisation or geometry
//! 5. **Scanner**: catalog entry found; each [`Adjustment`](crate::scanner::Adjustment)
//!    and [`MissingDefault`](crate::scanner::MissingDefault) is kept as its own finding
//! 6. **Geometry** and **exam** metadata
//! 7. **Payload**: the datasets for the file kind can be located
//!
//! ```rust,no_run
//! use petrdf::config::ReaderConfig;
//! use petrdf::inspect::inspect_file;
//! use std::path::Path;
//!
//! let report = inspect_file(Path::new("norm.h5"), &ReaderConfig::default())?;
//! println!("{}", report);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod payload;
mod report;

#[cfg(test)]
mod tests;

pub use report::{Finding, InspectionReport, Outcome, Severity, Stage};

use std::path::Path;

use anyhow::Result;

use crate::config::ReaderConfig;
use crate::container::{open_path, Container};
use crate::exam::{build_exam_info, BuiltinRadionuclides, Orientation, Rotation};
use crate::geometry::build_projection_geometry;
use crate::rdf::constants::{header, GE_SIGNATURE, SUPPORTED_MAJOR_VERSION};
use crate::rdf::{classify, verify_signature, Classification, RdfError};
use crate::scanner::{resolve_scanner, BuiltinCatalog, Scanner};

/// Inspect the file at `path`
///
/// Problems with the file end up in the report; the error is reserved for
/// failures of the inspection itself.
pub fn inspect_file(path: &Path, config: &ReaderConfig) -> Result<InspectionReport> {
    let mut report = InspectionReport::new(path.display().to_string());

    match open_path(path) {
        Ok(container) => {
            report.passed(Stage::Container, "opens");
            inspect_container(container.as_ref(), config, &mut report)?;
        }
        Err(e) => report.failed(Stage::Container, "opens", e),
    }

    Ok(report)
}

/// Inspect an open container, appending to `report`
pub fn inspect_container(
    container: &dyn Container,
    config: &ReaderConfig,
    report: &mut InspectionReport,
) -> Result<()> {
    if !verify_signature(container) {
        report.failed(
            Stage::Signature,
            "manufacturer",
            format!("not {}", GE_SIGNATURE),
        );
        return Ok(());
    }
    report.passed(Stage::Signature, GE_SIGNATURE);

    let Some(classification) = check_version_and_kind(container, report) else {
        return Ok(());
    };

    if let Some(scanner) = check_scanner(container, &classification, config, report) {
        check_geometry(container, &classification, &scanner, report);
    }
    check_exam(container, report);
    payload::check_payload(container, &classification, report);
    Ok(())
}

fn check_version_and_kind(
    container: &dyn Container,
    report: &mut InspectionReport,
) -> Option<Classification> {
    let version = match container.read_u32(header::MAJOR_VERSION) {
        Ok(version) => version,
        Err(e) => {
            report.failed(Stage::Version, "major revision", e);
            return None;
        }
    };
    if version != SUPPORTED_MAJOR_VERSION {
        let err = RdfError::UnsupportedVersion {
            found: version,
            supported: SUPPORTED_MAJOR_VERSION,
        };
        report.failed(Stage::Version, "major revision", err);
        return None;
    }
    report.passed(Stage::Version, format!("major revision {}", version));

    match classify(container, version) {
        Ok(classification) => {
            let subject = match classification.geo_dims {
                Some(dims) => format!("{} ({}-D geometry)", classification.kind, dims.as_u32()),
                None => classification.kind.to_string(),
            };
            report.passed(Stage::Classification, subject);
            Some(classification)
        }
        Err(e) => {
            report.failed(Stage::Classification, "file kind", e);
            None
        }
    }
}

fn check_scanner(
    container: &dyn Container,
    classification: &Classification,
    config: &ReaderConfig,
    report: &mut InspectionReport,
) -> Option<Scanner> {
    let resolved = match resolve_scanner(
        container,
        classification,
        &BuiltinCatalog::default(),
        config,
    ) {
        Ok(resolved) => resolved,
        Err(e) => {
            report.failed(Stage::Scanner, "catalog lookup", e);
            return None;
        }
    };

    let scanner = resolved.scanner;
    report.passed(
        Stage::Scanner,
        format!(
            "{} ({} rings, {} detectors per ring)",
            scanner.name, scanner.num_rings, scanner.num_detectors_per_ring
        ),
    );
    for adjustment in resolved.adjustments {
        report.push(
            Stage::Scanner,
            adjustment.field.to_string(),
            Outcome::Adjusted(adjustment),
        );
    }
    for missing in resolved.missing {
        report.push(Stage::Scanner, "defaults", Outcome::MissingDefault(missing));
    }
    Some(scanner)
}

fn check_geometry(
    container: &dyn Container,
    classification: &Classification,
    scanner: &Scanner,
    report: &mut InspectionReport,
) {
    match build_projection_geometry(container, classification, scanner) {
        Ok(geometry) => {
            let subject = format!(
                "{} views, {} tangential positions, span {}",
                geometry.num_views, geometry.num_tangential_poss, geometry.span
            );
            if geometry.num_tof_bins > 1 {
                report.caveat(
                    Stage::Geometry,
                    subject,
                    format!("{} TOF bins stored; data are read as non-TOF", geometry.num_tof_bins),
                );
            } else {
                report.passed(Stage::Geometry, subject);
            }
        }
        Err(e) => report.failed(Stage::Geometry, "projection layout", e),
    }
}

fn check_exam(container: &dyn Container, report: &mut InspectionReport) {
    match build_exam_info(container, &BuiltinRadionuclides) {
        Ok(exam) => {
            let position = exam.patient_position;
            if position.orientation == Orientation::Unknown || position.rotation == Rotation::Unknown
            {
                report.caveat(Stage::Exam, "patient position", "position code not recognised");
            } else {
                report.passed(Stage::Exam, format!("{}, {}", position, exam.radionuclide.name));
            }
        }
        Err(e) => report.failed(Stage::Exam, "header fields", e),
    }
}
