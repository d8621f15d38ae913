use super::Scanner;

/// Lookup of scanner models by the name stored in the file
pub trait ScannerCatalog {
    /// Catalog defaults for `name`, or `None` if the model is unknown
    fn find(&self, name: &str) -> Option<Scanner>;
}

/// One catalog model and the names it is known by
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Names matched case-insensitively, whitespace collapsed
    pub aliases: Vec<String>,
    /// Model defaults
    pub scanner: Scanner,
}

/// Catalog of GE PET scanners that write RDF9 files
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                entry(&["GE Signa PET/MR", "PET/MR Signa", "Signa PET/MR"], signa_pet_mr()),
                entry(
                    &["GE Discovery MI 3 rings", "Discovery MI3", "DMI3ring"],
                    discovery_mi(3),
                ),
                entry(
                    &["GE Discovery MI 4 rings", "Discovery MI4", "DMI4ring", "Discovery MI"],
                    discovery_mi(4),
                ),
                entry(
                    &["GE Discovery MI 5 rings", "Discovery MI5", "DMI5ring"],
                    discovery_mi(5),
                ),
                entry(&["GE Discovery 690", "Discovery 690", "D690"], discovery_690()),
            ],
        }
    }
}

impl BuiltinCatalog {
    /// Catalog of the built-in GE models
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with no models
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a model; later entries take precedence over earlier ones
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.insert(0, entry);
        self
    }

    /// Names of all models
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.scanner.name.as_str())
    }
}

impl ScannerCatalog for BuiltinCatalog {
    fn find(&self, name: &str) -> Option<Scanner> {
        let wanted = standardise(name);
        self.entries
            .iter()
            .find(|e| e.aliases.iter().any(|alias| standardise(alias) == wanted))
            .map(|e| e.scanner.clone())
    }
}

/// Lower-case and collapse runs of whitespace
fn standardise(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn entry(aliases: &[&str], scanner: Scanner) -> CatalogEntry {
    CatalogEntry {
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        scanner,
    }
}

fn signa_pet_mr() -> Scanner {
    Scanner {
        name: "GE Signa PET/MR".to_string(),
        num_rings: 45,
        num_detectors_per_ring: 448,
        ring_spacing: 5.55,
        inner_ring_radius: 317.0,
        average_depth_of_interaction: 9.4,
        default_bin_size: 2.1306,
        default_num_arccorrected_bins: 331,
        max_num_non_arccorrected_bins: 357,
        intrinsic_tilt: (-5.23f32).to_radians(),
        num_axial_blocks_per_bucket: 5,
        num_transaxial_blocks_per_bucket: 4,
        num_axial_crystals_per_block: 9,
        num_transaxial_crystals_per_block: 4,
        num_detector_layers: 1,
        energy_resolution: 0.105,
        reference_energy: 511.0,
        timing_resolution: 390.0,
        max_num_timing_poss: 351,
        size_timing_pos: 3.89,
    }
}

fn discovery_mi(rings_of_blocks: u32) -> Scanner {
    Scanner {
        name: format!("GE Discovery MI {} rings", rings_of_blocks),
        num_rings: 9 * rings_of_blocks,
        num_detectors_per_ring: 544,
        ring_spacing: 5.52296,
        inner_ring_radius: 380.5,
        average_depth_of_interaction: 7.0,
        default_bin_size: 2.206,
        default_num_arccorrected_bins: 415,
        max_num_non_arccorrected_bins: 415,
        intrinsic_tilt: (-4.5f32).to_radians(),
        num_axial_blocks_per_bucket: 1,
        num_transaxial_blocks_per_bucket: 2,
        num_axial_crystals_per_block: 9,
        num_transaxial_crystals_per_block: 4,
        num_detector_layers: 1,
        energy_resolution: 0.0944,
        reference_energy: 511.0,
        timing_resolution: 375.0,
        max_num_timing_poss: 29,
        size_timing_pos: 52.0,
    }
}

fn discovery_690() -> Scanner {
    Scanner {
        name: "GE Discovery 690".to_string(),
        num_rings: 24,
        num_detectors_per_ring: 576,
        ring_spacing: 6.54,
        inner_ring_radius: 405.1,
        average_depth_of_interaction: 7.0,
        default_bin_size: 2.3974,
        default_num_arccorrected_bins: 331,
        max_num_non_arccorrected_bins: 381,
        intrinsic_tilt: 0.0,
        num_axial_blocks_per_bucket: 4,
        num_transaxial_blocks_per_bucket: 1,
        num_axial_crystals_per_block: 6,
        num_transaxial_crystals_per_block: 9,
        num_detector_layers: 1,
        energy_resolution: 0.125,
        reference_energy: 511.0,
        timing_resolution: 550.0,
        max_num_timing_poss: 55,
        size_timing_pos: 89.0,
    }
}
