//! Synthetic RDF9 containers for tests and demos.
//!
//! Each builder returns a [`MemoryContainer`] describing a small GE Signa PET/MR
//! file of one kind. The values match the built-in catalog entry, so resolving
//! the scanner produces no adjustments. Payloads are tiny ramps, which makes
//! axis reversals easy to check by hand.

use crate::container::MemoryContainer;
use crate::rdf::constants::{acquisition, header, payload, probe, sorter, system, GE_SIGNATURE};

/// Scan start used by every fixture (2020-09-13T12:26:40Z)
pub const SCAN_START: u32 = 1_600_000_000;

/// On-disk extent of each sinogram view: (NX, NY, NZ)
pub const SINOGRAM_VIEW_EXTENT: [usize; 3] = [4, 3, 2];

/// On-disk extent of each singles sample
pub const SINGLES_EXTENT: [usize; 2] = [2, 4];

/// On-disk extent of each geometric correction slice
pub const GEO_SLICE_EXTENT: [usize; 2] = [3, 4];

/// On-disk extent of the crystal efficiency dataset (second axis doubled)
pub const EFFICIENCY_EXTENT: [usize; 2] = [2, 8];

/// `0, 1, 2, ...` truncated to bytes
pub fn ramp_u8(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// `0, 1, 2, ...`
pub fn ramp_u32(len: usize) -> Vec<u32> {
    (0..len as u32).collect()
}

/// `0.0, 0.5, 1.0, ...`
pub fn ramp_f32(len: usize) -> Vec<f32> {
    (0..len).map(|i| i as f32 * 0.5).collect()
}

/// Header, scanner, acquisition and exam fields shared by every kind
pub fn signa_header() -> MemoryContainer {
    MemoryContainer::new()
        .with_string(header::MANUFACTURER, GE_SIGNATURE)
        .with_u32(header::MAJOR_VERSION, 9)
        .with_string(header::SCANNER_DESC, "GE Signa PET/MR")
        .with_string(header::RADIONUCLIDE_NAME, "F-18")
        .with_f32(header::POSITRON_FRACTION, 0.967)
        .with_f32(header::HALF_LIFE, 6586.2)
        .with_u32(probe::IS_LIST_FILE, 0)
        .with_u32(probe::IS_LIST_COMPRESSED, 0)
        // 5 x 9 x 1 = 45 rings, 4 x 4 x 28 = 448 detectors per ring
        .with_u32(system::AXIAL_BLOCKS_PER_MODULE, 5)
        .with_u32(system::RADIAL_BLOCKS_PER_MODULE, 4)
        .with_u32(system::AXIAL_BLOCKS_PER_UNIT, 5)
        .with_u32(system::RADIAL_BLOCKS_PER_UNIT, 1)
        .with_u32(system::AXIAL_UNITS_PER_MODULE, 1)
        .with_u32(system::RADIAL_UNITS_PER_MODULE, 4)
        .with_u32(system::AXIAL_MODULES_PER_SYSTEM, 1)
        .with_u32(system::RADIAL_MODULES_PER_SYSTEM, 28)
        .with_u32(system::AXIAL_CRYSTALS_PER_BLOCK, 9)
        .with_u32(system::RADIAL_CRYSTALS_PER_BLOCK, 4)
        .with_f32(system::EFFECTIVE_RING_DIAMETER, 652.8)
        .with_f32(system::DETECTOR_AXIAL_SIZE, 249.75)
        .with_f32(system::INTRINSIC_TILT, -5.23)
        .with_f32(system::TIMING_RESOLUTION, 390.0)
        .with_i32(system::POS_COINCIDENCE_WINDOW, 175)
        .with_i32(system::NEG_COINCIDENCE_WINDOW, 175)
        .with_f32(system::COINC_TIMING_PRECISION, 0.00389)
        .with_u32(sorter::MAX_BINS, 357)
        .with_u32(sorter::SINOGRAM_MAX_BINS, 357)
        .with_u32(sorter::NUM_TOF_BINS, 27)
        .with_u32(acquisition::PATIENT_ENTRY, 0)
        .with_u32(acquisition::PATIENT_POSITION, 0)
        .with_u32(acquisition::LOWER_ENERGY_LIMIT, 425)
        .with_u32(acquisition::UPPER_ENERGY_LIMIT, 650)
        .with_u32(acquisition::SCAN_START_TIME, SCAN_START)
        .with_u32(acquisition::FRAME_START_TIME, SCAN_START + 30)
        .with_u32(acquisition::FRAME_DURATION, 600_000)
        .with_i32(acquisition::TABLE_LONGITUDE, -8520)
        .with_i32(acquisition::TABLE_ELEVATION, -1230)
}

fn with_singles(container: MemoryContainer, num_valid_samples: u32, stored: u32) -> MemoryContainer {
    let len = SINGLES_EXTENT.iter().product::<usize>();
    (1..=stored).fold(
        container.with_u32(payload::NUM_VALID_SAMPLES, num_valid_samples),
        |c, n| {
            let data = ramp_u32(len).into_iter().map(|v| v + 100 * n).collect();
            c.with_u32_array(
                &format!("{}{}", payload::SINGLES_SAMPLE_PREFIX, n),
                &SINGLES_EXTENT,
                data,
            )
        },
    )
}

/// List-mode file with a 64-byte event stream and two stored singles samples
pub fn list_mode_file(num_valid_samples: u32) -> MemoryContainer {
    let container = signa_header()
        .with_u32(probe::IS_LIST_FILE, 1)
        .with_u8_array(payload::LIST_DATA, &[64], ramp_u8(64));
    with_singles(container, num_valid_samples, 2)
}

/// TOF sinogram file with views 1 and 2 and three singles samples
///
/// The sorter's first dimension holds the TOF-expanded bin count here, so
/// only the second dimension gives the tangential bins.
pub fn sinogram_file() -> MemoryContainer {
    let len = SINOGRAM_VIEW_EXTENT.iter().product::<usize>();
    let container = signa_header()
        .with_u32(sorter::MAX_BINS, 1981)
        .with_u32(sorter::SEGMENT2_COMPRESSED_SIZE, 0)
        .with_u8_array(
            &format!("{}1", payload::TOF_SINOGRAM_VIEW_PREFIX),
            &SINOGRAM_VIEW_EXTENT,
            ramp_u8(len),
        )
        .with_u8_array(
            &format!("{}2", payload::TOF_SINOGRAM_VIEW_PREFIX),
            &SINOGRAM_VIEW_EXTENT,
            ramp_u8(len).into_iter().map(|v| v + 100).collect(),
        );
    with_singles(container, 3, 3)
}

fn with_geo_slices(container: MemoryContainer) -> MemoryContainer {
    let len = GEO_SLICE_EXTENT.iter().product::<usize>();
    container
        .with_u32(probe::GEO_SEGMENT_SIZE, 16)
        .with_u32_array(
            &format!("{}1", payload::GEO_SLICE_PREFIX),
            &GEO_SLICE_EXTENT,
            ramp_u32(len),
        )
        .with_u32_array(
            &format!("{}2", payload::GEO_SLICE_PREFIX),
            &GEO_SLICE_EXTENT,
            ramp_u32(len).into_iter().map(|v| v + 1000).collect(),
        )
}

/// 3-D geometric correction file with slices 1 and 2
pub fn geometry_file() -> MemoryContainer {
    with_geo_slices(signa_header())
}

/// Normalisation file: crystal efficiencies plus the geometric correction
pub fn normalisation_file() -> MemoryContainer {
    let len = EFFICIENCY_EXTENT.iter().product::<usize>();
    with_geo_slices(signa_header()).with_f32_array(
        payload::CRYSTAL_EFFICIENCY,
        &EFFICIENCY_EXTENT,
        ramp_f32(len),
    )
}
