use crate::container::Container;
use crate::rdf::constants::system;
use crate::rdf::{Classification, FileKind, Result};
use crate::region::{
    initialise_efficiency, initialise_geo_factors, initialise_listmode, initialise_singles,
    initialise_sinogram, Region,
};

use super::{InspectionReport, Stage};

fn describe(region: &Region) -> String {
    format!("{} {:?}", region.path, region.extent)
}

fn record<T>(
    report: &mut InspectionReport,
    name: &str,
    outcome: Result<Option<T>>,
    describe: impl FnOnce(&T) -> String,
) {
    match outcome {
        Ok(Some(found)) => report.passed(Stage::Payload, format!("{}: {}", name, describe(&found))),
        Ok(None) => report.caveat(Stage::Payload, name, "no layout for this format revision"),
        Err(e) => report.failed(Stage::Payload, name, e),
    }
}

/// Views per sinogram, read straight from the block structure
fn num_views(container: &dyn Container) -> Result<u32> {
    let detectors = container
        .read_u32(system::RADIAL_BLOCKS_PER_MODULE)?
        .saturating_mul(container.read_u32(system::RADIAL_CRYSTALS_PER_BLOCK)?)
        .saturating_mul(container.read_u32(system::RADIAL_MODULES_PER_SYSTEM)?);
    Ok(detectors / 2)
}

/// Locate the payload datasets of the file's kind
pub(super) fn check_payload(
    container: &dyn Container,
    classification: &Classification,
    report: &mut InspectionReport,
) {
    match classification.kind {
        FileKind::ListMode => {
            record(
                report,
                "List-mode stream",
                initialise_listmode(container, classification),
                |r| format!("{} bytes, {} singles samples", r.size(), r.num_singles_samples),
            );
            check_singles(container, classification, report);
        }
        FileKind::Sinogram => {
            let outcome = num_views(container)
                .and_then(|views| initialise_sinogram(container, classification, views, 1));
            record(report, "Sinogram view 1", outcome, describe);
            check_singles(container, classification, report);
        }
        FileKind::Normalisation => {
            record(
                report,
                "Crystal efficiencies",
                initialise_efficiency(container, classification),
                describe,
            );
            check_geo_slice(container, classification, report);
        }
        FileKind::Geometry => check_geo_slice(container, classification, report),
    }
}

fn check_singles(
    container: &dyn Container,
    classification: &Classification,
    report: &mut InspectionReport,
) {
    record(
        report,
        "Singles",
        initialise_singles(container, classification),
        |r| format!("{} samples of {:?}", r.num_samples, r.region.extent),
    );
}

fn check_geo_slice(
    container: &dyn Container,
    classification: &Classification,
    report: &mut InspectionReport,
) {
    record(
        report,
        "Geometric correction slice 1",
        initialise_geo_factors(container, classification, 1),
        describe,
    );
}
