//! Logical projection geometry of an RDF acquisition.
//!
//! Span, view count, tangential bins and the rest are fixed for RDF9 data;
//! only the bed position and TOF bin count come from the file.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::rdf::constants::{acquisition, sorter};
use crate::rdf::{Classification, Result};
use crate::scanner::Scanner;

/// Axial compression of the RDF9 sinograms
pub const RDF_SPAN: u32 = 2;

/// Acquisition geometry as seen by reconstruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionGeometry {
    /// Axial compression
    pub span: u32,
    /// Largest ring difference
    pub max_ring_difference: u32,
    /// Azimuthal views
    pub num_views: u32,
    /// Tangential positions
    pub num_tangential_poss: u32,
    /// Always false for RDF data
    pub arc_corrected: bool,
    /// TOF bins stored in the file
    pub num_tof_bins: u32,
    /// TOF mash factor: 1 for list-mode data, 0 (non-TOF) for sinograms
    pub tof_mash_factor: u32,
    /// Bed horizontal position (mm)
    pub bed_position_horizontal: f32,
    /// Bed vertical position (mm)
    pub bed_position_vertical: f32,
}

impl ProjectionGeometry {
    /// Apply the fixed RDF9 policy to a resolved scanner
    pub fn from_scanner(scanner: &Scanner, is_list: bool) -> Self {
        Self {
            span: RDF_SPAN,
            max_ring_difference: scanner.num_rings.saturating_sub(1),
            num_views: scanner.num_detectors_per_ring / 2,
            num_tangential_poss: scanner.max_num_non_arccorrected_bins,
            arc_corrected: false,
            num_tof_bins: 1,
            tof_mash_factor: u32::from(is_list),
            bed_position_horizontal: 0.0,
            bed_position_vertical: 0.0,
        }
    }

    /// Set the bed position from RDF units (0.1 mm)
    pub fn with_bed_position(mut self, longitude: i32, elevation: i32) -> Self {
        self.bed_position_horizontal = longitude as f32 / 10.0;
        self.bed_position_vertical = elevation as f32 / 10.0;
        self
    }
}

/// Build the projection geometry of an open file from its resolved scanner
pub fn build_projection_geometry(
    container: &dyn Container,
    classification: &Classification,
    scanner: &Scanner,
) -> Result<ProjectionGeometry> {
    let num_tof_bins = container.read_u32(sorter::NUM_TOF_BINS)?;
    if num_tof_bins > 1 {
        warn!("GE RDF data currently still read as non-TOF ({} TOF bins stored)", num_tof_bins);
    }

    let mut geometry = ProjectionGeometry::from_scanner(scanner, classification.is_list())
        .with_bed_position(
            container.read_i32(acquisition::TABLE_LONGITUDE)?,
            container.read_i32(acquisition::TABLE_ELEVATION)?,
        );
    geometry.num_tof_bins = num_tof_bins;
    Ok(geometry)
}
