//! # Acquisition Metadata
//!
//! Patient position, energy window, time frame and radionuclide of an RDF
//! acquisition, gathered into one [`ExamInfo`] record.
//!
//! Unrecognised patient codes map to `Unknown` rather than failing. The
//! radionuclide is looked up by name; when the lookup misses (or reports a
//! negative half-life), a record is built from the positron fraction and
//! half-life stored in the file.

mod position;
mod radionuclide;

#[cfg(test)]
mod tests;

pub use position::{Orientation, PatientPosition, Rotation};
pub use radionuclide::{BuiltinRadionuclides, Radionuclide, RadionuclideLookup};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::rdf::constants::{acquisition, header, REFERENCE_ENERGY_KEV};
use crate::rdf::Result;

/// Acceptance window of the energy discriminators (keV)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyWindow {
    /// Lower threshold
    pub low_kev: f32,
    /// Upper threshold
    pub high_kev: f32,
}

/// One acquisition frame, relative to the scan start (s)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeFrame {
    /// Frame start
    pub start_secs: f64,
    /// Frame end
    pub end_secs: f64,
}

impl TimeFrame {
    /// Frame length (s)
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Acquisition metadata of one RDF file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamInfo {
    /// Patient orientation and rotation
    pub patient_position: PatientPosition,
    /// Energy window
    pub energy_window: EnergyWindow,
    /// Scan start (s since 1970-01-01 UTC)
    pub scan_start_secs: f64,
    /// Frames; RDF files hold exactly one
    pub time_frames: Vec<TimeFrame>,
    /// Tracer isotope
    pub radionuclide: Radionuclide,
}

impl ExamInfo {
    /// Scan start as a UTC timestamp
    pub fn scan_start(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.scan_start_secs as i64, 0)
    }
}

/// Read the radionuclide, synthesising a record when the lookup cannot help
fn read_radionuclide(
    container: &dyn Container,
    lookup: &dyn RadionuclideLookup,
) -> Result<Radionuclide> {
    let name = container.read_string(header::RADIONUCLIDE_NAME)?;
    match lookup.lookup(&name) {
        Some(found) if found.half_life_secs >= 0.0 => {
            debug!("Radionuclide \"{}\" resolved to {}", name, found.name);
            Ok(found)
        }
        _ => {
            warn!(
                "Radionuclide \"{}\" not in the lookup table; using the values stored in the file",
                name
            );
            Ok(Radionuclide {
                name,
                energy_kev: REFERENCE_ENERGY_KEV,
                branching_ratio: container.read_f32(header::POSITRON_FRACTION)?,
                half_life_secs: container.read_f32(header::HALF_LIFE)?,
            })
        }
    }
}

/// Build the acquisition metadata of an RDF file
pub fn build_exam_info(
    container: &dyn Container,
    radionuclides: &dyn RadionuclideLookup,
) -> Result<ExamInfo> {
    let patient_position = PatientPosition::from_codes(
        container.read_u32(acquisition::PATIENT_ENTRY)?,
        container.read_u32(acquisition::PATIENT_POSITION)?,
    );

    let energy_window = EnergyWindow {
        low_kev: container.read_u32(acquisition::LOWER_ENERGY_LIMIT)? as f32,
        high_kev: container.read_u32(acquisition::UPPER_ENERGY_LIMIT)? as f32,
    };

    let scan_start = container.read_u32(acquisition::SCAN_START_TIME)?;
    let frame_start = container.read_u32(acquisition::FRAME_START_TIME)?;
    let frame_duration_ms = container.read_u32(acquisition::FRAME_DURATION)?;
    let start_secs = (i64::from(frame_start) - i64::from(scan_start)) as f64;
    let frame = TimeFrame {
        start_secs,
        end_secs: start_secs + f64::from(frame_duration_ms) / 1000.0,
    };

    Ok(ExamInfo {
        patient_position,
        energy_window,
        scan_start_secs: f64::from(scan_start),
        time_frames: vec![frame],
        radionuclide: read_radionuclide(container, radionuclides)?,
    })
}
