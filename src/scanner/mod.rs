//! # Scanner Model
//!
//! Scanner geometry and timing as used by reconstruction, and the resolver that
//! builds it from a catalog entry plus the values stored in an RDF file.
//!
//! The catalog provides defaults that the file does not carry (bin size,
//! energy resolution, ...). Where the file does carry a value, the catalog is
//! checked against it and corrected when the two disagree beyond tolerance.
//! Each correction is returned as an [`Adjustment`] and logged as a warning.

mod catalog;
mod reconcile;
mod resolve;


pub use catalog::{BuiltinCatalog, CatalogEntry, ScannerCatalog};
pub use reconcile::{reconcile, reconcile_exact, Adjustment, MissingDefault, Reconciled, ScannerField};
pub use resolve::{merge_readings, read_scanner_fields, resolve_scanner, DetectorHierarchy, ResolvedScanner, ScannerReadings};

use serde::{Deserialize, Serialize};

/// Scanner geometry, block structure and timing properties
///
/// Distances are in mm, angles in radians, times in ps, energies in keV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scanner {
    /// Model name
    pub name: String,
    /// Number of detector rings
    pub num_rings: u32,
    /// Detectors in one ring
    pub num_detectors_per_ring: u32,
    /// Axial distance between rings
    pub ring_spacing: f32,
    /// Radius of the inner crystal face
    pub inner_ring_radius: f32,
    /// Average depth of interaction
    pub average_depth_of_interaction: f32,
    /// Default tangential bin size; 0 when unknown
    pub default_bin_size: f32,
    /// Default number of arc-corrected bins; 0 when unknown
    pub default_num_arccorrected_bins: u32,
    /// Tangential positions of non-arc-corrected data
    pub max_num_non_arccorrected_bins: u32,
    /// Azimuthal angle of the first crystal
    pub intrinsic_tilt: f32,
    /// Axial blocks in a bucket
    pub num_axial_blocks_per_bucket: u32,
    /// Transaxial blocks in a bucket
    pub num_transaxial_blocks_per_bucket: u32,
    /// Axial crystals in a block
    pub num_axial_crystals_per_block: u32,
    /// Transaxial crystals in a block
    pub num_transaxial_crystals_per_block: u32,
    /// Crystal layers
    pub num_detector_layers: u32,
    /// Fractional energy resolution at the reference energy; 0 when unknown
    pub energy_resolution: f32,
    /// Energy at which the energy resolution is quoted
    pub reference_energy: f32,
    /// Coincidence timing resolution
    pub timing_resolution: f32,
    /// Number of unmashed TOF bins
    pub max_num_timing_poss: u32,
    /// Width of an unmashed TOF bin
    pub size_timing_pos: f32,
}

impl Scanner {
    /// Inner ring radius plus average depth of interaction
    pub fn effective_ring_radius(&self) -> f32 {
        self.inner_ring_radius + self.average_depth_of_interaction
    }

    /// True when the scanner records time-of-flight
    pub fn is_tof_ready(&self) -> bool {
        self.max_num_timing_poss > 1 && self.size_timing_pos > 0.0
    }
}
