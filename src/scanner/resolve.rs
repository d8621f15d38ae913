use log::{debug, warn};
use serde::Serialize;

use crate::config::ReaderConfig;
use crate::container::Container;
use crate::rdf::constants::{header, sorter, system, REFERENCE_ENERGY_KEV, SUPPORTED_MAJOR_VERSION};
use crate::rdf::{Classification, RdfError, Result};

use super::reconcile::{reconcile, reconcile_exact, Adjustment, MissingDefault, ScannerField};
use super::{Scanner, ScannerCatalog};

/// Block/unit/module counts stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetectorHierarchy {
    /// Axial blocks per module (a module is a bucket)
    pub axial_blocks_per_module: u32,
    /// Radial (transaxial) blocks per module
    pub radial_blocks_per_module: u32,
    /// Axial blocks per unit
    pub axial_blocks_per_unit: u32,
    /// Radial blocks per unit
    pub radial_blocks_per_unit: u32,
    /// Axial units per module
    pub axial_units_per_module: u32,
    /// Radial units per module
    pub radial_units_per_module: u32,
    /// Axial modules in the system
    pub axial_modules_per_system: u32,
    /// Radial modules in the system
    pub radial_modules_per_system: u32,
    /// Axial crystals per block
    pub axial_crystals_per_block: u32,
    /// Radial crystals per block
    pub radial_crystals_per_block: u32,
}

impl DetectorHierarchy {
    /// Detector rings in the system
    pub fn num_rings(&self) -> u32 {
        self.axial_blocks_per_module
            .saturating_mul(self.axial_crystals_per_block)
            .saturating_mul(self.axial_modules_per_system)
    }

    /// Detectors in one ring
    pub fn num_detectors_per_ring(&self) -> u32 {
        self.radial_blocks_per_module
            .saturating_mul(self.radial_crystals_per_block)
            .saturating_mul(self.radial_modules_per_system)
    }
}

/// Scanner-related values as stored in the file, converted to internal units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScannerReadings {
    /// Scanner model description
    pub name: String,
    /// Block structure
    pub hierarchy: DetectorHierarchy,
    /// Effective ring diameter (mm)
    pub effective_ring_diameter: f32,
    /// Axial extent of the detector (mm)
    pub detector_axial_size: f32,
    /// Intrinsic tilt (degrees)
    pub intrinsic_tilt_deg: f32,
    /// Tangential bin count; not read for list-mode files
    pub max_num_non_arccorrected_bins: Option<u32>,
    /// Timing resolution (ps); 0 when the acquisition left it unset
    pub timing_resolution_ps: f32,
    /// Positive coincidence window (TOF bins)
    pub pos_coincidence_window: i32,
    /// Negative coincidence window (TOF bins)
    pub neg_coincidence_window: i32,
    /// Width of one TOF bin (ps)
    pub coinc_timing_precision_ps: f32,
}

impl ScannerReadings {
    /// TOF bins spanned by the coincidence window
    pub fn num_tof_bins(&self) -> i64 {
        i64::from(self.pos_coincidence_window) + i64::from(self.neg_coincidence_window) + 1
    }
}

/// Scanner model after reconciliation, with what was corrected or is missing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedScanner {
    /// Final scanner model
    pub scanner: Scanner,
    /// Block structure read from the file
    pub hierarchy: DetectorHierarchy,
    /// Catalog values replaced by file values
    pub adjustments: Vec<Adjustment>,
    /// Values neither the catalog nor the file provides
    pub missing: Vec<MissingDefault>,
}

/// Path of the tangential bin count, if the revision stores one for this kind
///
/// RDF9 puts it in the second sorter dimension for sinogram files.
fn max_bins_path(classification: &Classification) -> Option<&'static str> {
    if classification.format_version != SUPPORTED_MAJOR_VERSION || classification.is_list() {
        return None;
    }
    Some(if classification.is_sino() {
        sorter::SINOGRAM_MAX_BINS
    } else {
        sorter::MAX_BINS
    })
}

/// Read every scanner-related field the resolver needs
pub fn read_scanner_fields(
    container: &dyn Container,
    classification: &Classification,
) -> Result<ScannerReadings> {
    let hierarchy = DetectorHierarchy {
        axial_blocks_per_module: container.read_u32(system::AXIAL_BLOCKS_PER_MODULE)?,
        radial_blocks_per_module: container.read_u32(system::RADIAL_BLOCKS_PER_MODULE)?,
        axial_blocks_per_unit: container.read_u32(system::AXIAL_BLOCKS_PER_UNIT)?,
        radial_blocks_per_unit: container.read_u32(system::RADIAL_BLOCKS_PER_UNIT)?,
        axial_units_per_module: container.read_u32(system::AXIAL_UNITS_PER_MODULE)?,
        radial_units_per_module: container.read_u32(system::RADIAL_UNITS_PER_MODULE)?,
        axial_modules_per_system: container.read_u32(system::AXIAL_MODULES_PER_SYSTEM)?,
        radial_modules_per_system: container.read_u32(system::RADIAL_MODULES_PER_SYSTEM)?,
        axial_crystals_per_block: container.read_u32(system::AXIAL_CRYSTALS_PER_BLOCK)?,
        radial_crystals_per_block: container.read_u32(system::RADIAL_CRYSTALS_PER_BLOCK)?,
    };
    if hierarchy.num_rings() == 0 || hierarchy.num_detectors_per_ring() == 0 {
        return Err(RdfError::Format(format!(
            "scanner block structure yields {} rings of {} detectors",
            hierarchy.num_rings(),
            hierarchy.num_detectors_per_ring()
        )));
    }

    let max_num_non_arccorrected_bins = match max_bins_path(classification) {
        Some(path) => Some(container.read_u32(path)?),
        None => None,
    };

    Ok(ScannerReadings {
        name: container.read_string(header::SCANNER_DESC)?,
        hierarchy,
        effective_ring_diameter: container.read_f32(system::EFFECTIVE_RING_DIAMETER)?,
        detector_axial_size: container.read_f32(system::DETECTOR_AXIAL_SIZE)?,
        intrinsic_tilt_deg: container.read_f32(system::INTRINSIC_TILT)?,
        max_num_non_arccorrected_bins,
        timing_resolution_ps: container.read_f32(system::TIMING_RESOLUTION)?,
        pos_coincidence_window: container.read_i32(system::POS_COINCIDENCE_WINDOW)?,
        neg_coincidence_window: container.read_i32(system::NEG_COINCIDENCE_WINDOW)?,
        // stored in ns
        coinc_timing_precision_ps: container.read_f32(system::COINC_TIMING_PRECISION)? * 1000.0,
    })
}

/// Overlay file readings on a catalog entry
///
/// Pure: nothing is logged, corrections are reported in the result.
pub fn merge_readings(
    mut scanner: Scanner,
    readings: &ScannerReadings,
    config: &ReaderConfig,
) -> Result<ResolvedScanner> {
    let hierarchy = readings.hierarchy;
    let mut adjustments = Vec::new();

    scanner.num_rings = hierarchy.num_rings();
    scanner.num_detectors_per_ring = hierarchy.num_detectors_per_ring();
    if let Some(bins) = readings.max_num_non_arccorrected_bins {
        scanner.max_num_non_arccorrected_bins = bins;
    }
    scanner.ring_spacing = readings.detector_axial_size / scanner.num_rings as f32;
    scanner.intrinsic_tilt = readings.intrinsic_tilt_deg.to_radians();
    scanner.num_axial_blocks_per_bucket = hierarchy.axial_blocks_per_module;
    scanner.num_transaxial_blocks_per_bucket = hierarchy.radial_blocks_per_module;
    scanner.num_axial_crystals_per_block = hierarchy.axial_crystals_per_block;
    scanner.num_transaxial_crystals_per_block = hierarchy.radial_crystals_per_block;
    scanner.num_detector_layers = 1;
    scanner.reference_energy = REFERENCE_ENERGY_KEV;

    let measured_radius = readings.effective_ring_diameter / 2.0;
    let catalog_radius = scanner.effective_ring_radius();
    if reconcile(catalog_radius, measured_radius, config.tolerance).overridden {
        scanner.inner_ring_radius = measured_radius - config.default_doi_mm;
        scanner.average_depth_of_interaction = config.default_doi_mm;
        adjustments.push(Adjustment {
            field: ScannerField::EffectiveRingRadius,
            catalog: f64::from(catalog_radius),
            measured: f64::from(measured_radius),
        });
    }

    // Some acquisitions leave the timing resolution at zero.
    if readings.timing_resolution_ps != 0.0 {
        let catalog = scanner.timing_resolution;
        let resolved = reconcile(catalog, readings.timing_resolution_ps, config.tolerance);
        if resolved.overridden {
            scanner.timing_resolution = resolved.value;
            adjustments.push(Adjustment {
                field: ScannerField::TimingResolution,
                catalog: f64::from(catalog),
                measured: f64::from(resolved.value),
            });
        }
    }

    let catalog = scanner.size_timing_pos;
    let resolved = reconcile(catalog, readings.coinc_timing_precision_ps, config.tolerance);
    if resolved.overridden {
        scanner.size_timing_pos = resolved.value;
        adjustments.push(Adjustment {
            field: ScannerField::TofBinSize,
            catalog: f64::from(catalog),
            measured: f64::from(resolved.value),
        });
    }

    let tof_bins = u32::try_from(readings.num_tof_bins()).map_err(|_| {
        RdfError::Format(format!(
            "coincidence window yields {} TOF bins",
            readings.num_tof_bins()
        ))
    })?;
    let catalog = scanner.max_num_timing_poss;
    let resolved = reconcile_exact(catalog, tof_bins);
    if resolved.overridden {
        scanner.max_num_timing_poss = resolved.value;
        adjustments.push(Adjustment {
            field: ScannerField::TofBinCount,
            catalog: f64::from(catalog),
            measured: f64::from(resolved.value),
        });
    }

    let mut missing = Vec::new();
    if scanner.default_bin_size <= 0.0 {
        missing.push(MissingDefault::BinSize);
    }
    if scanner.default_num_arccorrected_bins == 0 {
        missing.push(MissingDefault::ArcCorrectedBins);
    }
    if scanner.energy_resolution <= 0.0 {
        missing.push(MissingDefault::EnergyResolution);
    }

    Ok(ResolvedScanner {
        scanner,
        hierarchy,
        adjustments,
        missing,
    })
}

/// Build the scanner model of an open, classified file
///
/// Fails with [`RdfError::UnknownScanner`] if the catalog has no entry for the
/// stored model name. Catalog corrections and missing defaults are logged as
/// warnings.
pub fn resolve_scanner(
    container: &dyn Container,
    classification: &Classification,
    catalog: &dyn ScannerCatalog,
    config: &ReaderConfig,
) -> Result<ResolvedScanner> {
    let readings = read_scanner_fields(container, classification)?;
    let entry = catalog
        .find(&readings.name)
        .ok_or_else(|| RdfError::UnknownScanner(readings.name.clone()))?;
    debug!("Scanner \"{}\" matched catalog entry {}", readings.name, entry.name);

    let resolved = merge_readings(entry, &readings, config)?;
    for adjustment in &resolved.adjustments {
        warn!("{}", adjustment);
    }
    for missing in &resolved.missing {
        warn!("{}", missing);
    }
    Ok(resolved)
}
