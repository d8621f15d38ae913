//! Dataset paths and vendor constants of the RDF version 9 layout.
//!
//! Record sizes are vendor-documented values; they are not stored in the file.

/// The only major format revision this crate reads
pub const SUPPORTED_MAJOR_VERSION: u32 = 9;

/// Manufacturer string identifying GE files
pub const GE_SIGNATURE: &str = "GE MEDICAL SYSTEMS";

/// Highest dataset rank accepted by the region reader
pub const MAX_DATASET_DIMS: usize = 5;

/// Header paths
pub mod header {
    /// Manufacturer identity string
    pub const MANUFACTURER: &str = "/HeaderData/ExamData/manufacturer";
    /// Major format revision
    pub const MAJOR_VERSION: &str = "/HeaderData/RDFConfiguration/fileVersion/majorVersion";
    /// Scanner model description
    pub const SCANNER_DESC: &str = "/HeaderData/ExamData/scannerDesc";
    /// Radionuclide name
    pub const RADIONUCLIDE_NAME: &str = "/HeaderData/ExamData/radionuclideName";
    /// Radionuclide positron fraction
    pub const POSITRON_FRACTION: &str = "/HeaderData/ExamData/positronFraction";
    /// Radionuclide half-life in seconds
    pub const HALF_LIFE: &str = "/HeaderData/ExamData/halfLife";
}

/// Classifier probe paths
pub mod probe {
    /// Non-zero in list-mode files
    pub const IS_LIST_FILE: &str = "/HeaderData/RDFConfiguration/isListFile";
    /// Non-zero when the list-mode payload is compressed
    pub const IS_LIST_COMPRESSED: &str = "/HeaderData/ListHeader/isListCompressed";
    /// Group present in sinogram files
    pub const SINOGRAM_GROUP: &str = "/SegmentData/Segment2";
    /// Group present in normalisation files
    pub const CRYSTAL_EFFICIENCY: &str = "/3DCrystalEfficiency/crystalEfficiency";
    /// First geometric correction slice
    pub const GEO_FIRST_SLICE: &str = "/SegmentData/Segment4/3D_Norm_Correction/slice1";
    /// Axial segment count of the geometric correction
    pub const GEO_SEGMENT_SIZE: &str = "/HeaderData/Sorter/Segment4/dimension3Size";
}

/// Scanner geometry and timing paths
pub mod system {
    /// Effective ring diameter (mm)
    pub const EFFECTIVE_RING_DIAMETER: &str = "/HeaderData/SystemGeometry/effectiveRingDiameter";
    /// Axial blocks per module
    pub const AXIAL_BLOCKS_PER_MODULE: &str = "/HeaderData/SystemGeometry/axialBlocksPerModule";
    /// Radial blocks per module
    pub const RADIAL_BLOCKS_PER_MODULE: &str = "/HeaderData/SystemGeometry/radialBlocksPerModule";
    /// Axial blocks per unit
    pub const AXIAL_BLOCKS_PER_UNIT: &str = "/HeaderData/SystemGeometry/axialBlocksPerUnit";
    /// Radial blocks per unit
    pub const RADIAL_BLOCKS_PER_UNIT: &str = "/HeaderData/SystemGeometry/radialBlocksPerUnit";
    /// Axial units per module
    pub const AXIAL_UNITS_PER_MODULE: &str = "/HeaderData/SystemGeometry/axialUnitsPerModule";
    /// Radial units per module
    pub const RADIAL_UNITS_PER_MODULE: &str = "/HeaderData/SystemGeometry/radialUnitsPerModule";
    /// Axial modules per system
    pub const AXIAL_MODULES_PER_SYSTEM: &str = "/HeaderData/SystemGeometry/axialModulesPerSystem";
    /// Radial modules per system
    pub const RADIAL_MODULES_PER_SYSTEM: &str = "/HeaderData/SystemGeometry/radialModulesPerSystem";
    /// Axial crystals per block
    pub const AXIAL_CRYSTALS_PER_BLOCK: &str = "/HeaderData/SystemGeometry/axialCrystalsPerBlock";
    /// Radial crystals per block
    pub const RADIAL_CRYSTALS_PER_BLOCK: &str = "/HeaderData/SystemGeometry/radialCrystalsPerBlock";
    /// Axial extent of the detector (mm)
    pub const DETECTOR_AXIAL_SIZE: &str = "/HeaderData/SystemGeometry/detectorAxialSize";
    /// Intrinsic azimuthal tilt (degrees)
    pub const INTRINSIC_TILT: &str = "/HeaderData/SystemGeometry/transaxial_crystal_0_offset";
    /// Timing resolution (ps); zero when unset
    pub const TIMING_RESOLUTION: &str = "/HeaderData/SystemGeometry/timingResolutionInPico";
    /// Positive coincidence window (TOF bins)
    pub const POS_COINCIDENCE_WINDOW: &str =
        "/HeaderData/AcqParameters/EDCATParameters/posCoincidenceWindow";
    /// Negative coincidence window (TOF bins)
    pub const NEG_COINCIDENCE_WINDOW: &str =
        "/HeaderData/AcqParameters/EDCATParameters/negCoincidenceWindow";
    /// Coincidence timing precision (ns)
    pub const COINC_TIMING_PRECISION: &str =
        "/HeaderData/AcqParameters/EDCATParameters/coincTimingPrecision";
}

/// Sorter paths
pub mod sorter {
    /// Tangential bin count of sinogram files.
    ///
    /// RDF9 stores it in the second sorter dimension for sinograms, not the first.
    pub const SINOGRAM_MAX_BINS: &str = "/HeaderData/Sorter/dimension2Size";
    /// Tangential bin count of all other file kinds
    pub const MAX_BINS: &str = "/HeaderData/Sorter/dimension1Size";
    /// TOF bins of the stored sinograms
    pub const NUM_TOF_BINS: &str = "/HeaderData/Sorter/numTOF_bins";
    /// Non-zero when sinogram segment 2 is compressed
    pub const SEGMENT2_COMPRESSED_SIZE: &str = "/HeaderData/Sorter/Segment2/compDataSegSize";
}

/// Acquisition paths
pub mod acquisition {
    /// Patient entry code (head/feet first)
    pub const PATIENT_ENTRY: &str = "/HeaderData/AcqParameters/LandmarkParameters/patientEntry";
    /// Patient position code (supine/prone/decubitus)
    pub const PATIENT_POSITION: &str =
        "/HeaderData/AcqParameters/LandmarkParameters/patientPosition";
    /// Lower energy threshold (keV)
    pub const LOWER_ENERGY_LIMIT: &str =
        "/HeaderData/AcqParameters/EDCATParameters/lower_energy_limit";
    /// Upper energy threshold (keV)
    pub const UPPER_ENERGY_LIMIT: &str =
        "/HeaderData/AcqParameters/EDCATParameters/upper_energy_limit";
    /// Scan start (seconds since 1970)
    pub const SCAN_START_TIME: &str = "/HeaderData/AcqStats/scanStartTime";
    /// Frame start (seconds since 1970)
    pub const FRAME_START_TIME: &str = "/HeaderData/AcqStats/frameStartTime";
    /// Frame duration (ms)
    pub const FRAME_DURATION: &str = "/HeaderData/AcqStats/frameDuration";
    /// Bed longitudinal position (0.1 mm)
    pub const TABLE_LONGITUDE: &str =
        "/HeaderData/AcqParameters/LandmarkParameters/absTableLongitude";
    /// Bed elevation (0.1 mm)
    pub const TABLE_ELEVATION: &str = "/HeaderData/AcqParameters/LandmarkParameters/tableElevation";
}

/// Payload datasets
pub mod payload {
    /// List-mode byte stream
    pub const LIST_DATA: &str = "/ListData/listData";
    /// Valid singles samples in list-mode and sinogram files
    pub const NUM_VALID_SAMPLES: &str = "/HeaderData/SinglesHeader/numValidSamples";
    /// Singles sample prefix; datasets are `sample1`, `sample2`, ...
    pub const SINGLES_SAMPLE_PREFIX: &str = "/Singles/CrystalSingles/sample";
    /// TOF sinogram view prefix; datasets are `view1`, `view2`, ...
    pub const TOF_SINOGRAM_VIEW_PREFIX: &str = "/SegmentData/Segment2/3D_TOF_Sinogram/view";
    /// Non-TOF sinogram view prefix
    pub const SINOGRAM_VIEW_PREFIX: &str = "/SegmentData/Segment2/3D_Sinogram/view";
    /// Geometric correction slice prefix; datasets are `slice1`, `slice2`, ...
    pub const GEO_SLICE_PREFIX: &str = "/SegmentData/Segment4/3D_Norm_Correction/slice";
    /// Crystal efficiency factors
    pub const CRYSTAL_EFFICIENCY: &str = "/3DCrystalEfficiency/crystalEfficiency";
}

/// List-mode record layout (bytes)
pub mod record {
    /// Size of the signature that identifies a record's type
    pub const SIGNATURE_SIZE: usize = 6;
    /// Largest record in the stream
    pub const MAX_RECORD_SIZE: usize = 16;
}

/// Reference energy of annihilation photons (keV)
pub const REFERENCE_ENERGY_KEV: f32 = 511.0;
