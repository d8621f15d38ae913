use std::path::Path;

use log::info;

use crate::config::ReaderConfig;
use crate::container::{open_path, Container, DynContainer};
use crate::exam::{build_exam_info, BuiltinRadionuclides, RadionuclideLookup};
use crate::geometry::build_projection_geometry;
use crate::rdf::{self, Result};
use crate::scanner::{resolve_scanner, BuiltinCatalog, ScannerCatalog};

use super::RdfFile;

/// Settings and lookup tables used while opening a file
///
/// ```rust,no_run
/// use petrdf::config::ReaderConfig;
/// use petrdf::reader::OpenOptions;
///
/// let file = OpenOptions::new()
///     .config(ReaderConfig { tolerance: 0.5, default_doi_mm: 9.4 })
///     .open("list.h5")?;
/// # Ok::<(), petrdf::rdf::RdfError>(())
/// ```
pub struct OpenOptions {
    config: ReaderConfig,
    catalog: Box<dyn ScannerCatalog>,
    radionuclides: Box<dyn RadionuclideLookup>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            config: ReaderConfig::default(),
            catalog: Box::new(BuiltinCatalog::default()),
            radionuclides: Box::new(BuiltinRadionuclides),
        }
    }
}

impl OpenOptions {
    /// Default config, built-in scanner catalog and radionuclide table
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these reader settings
    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve scanners with this catalog
    pub fn catalog(mut self, catalog: impl ScannerCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    /// Resolve radionuclides with this table
    pub fn radionuclides(mut self, radionuclides: impl RadionuclideLookup + 'static) -> Self {
        self.radionuclides = Box::new(radionuclides);
        self
    }

    /// Open a file on disk (HDF5, or a `.json` container dump)
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<RdfFile<DynContainer>> {
        let path = path.as_ref();
        info!("Opening RDF file {}", path.display());
        self.open_container(open_path(path)?)
    }

    /// Check, classify and resolve an already open container
    pub fn open_container<C: Container>(&self, container: C) -> Result<RdfFile<C>> {
        let classification = rdf::check_file(&container)?;
        let scanner = resolve_scanner(
            &container,
            &classification,
            self.catalog.as_ref(),
            &self.config,
        )?;
        let exam = build_exam_info(&container, self.radionuclides.as_ref())?;
        let geometry = build_projection_geometry(&container, &classification, &scanner.scanner)?;

        info!(
            "Opened RDF{} {} file from a {} ({} rings, {} detectors per ring)",
            classification.format_version,
            classification.kind,
            scanner.scanner.name,
            scanner.scanner.num_rings,
            scanner.scanner.num_detectors_per_ring
        );

        Ok(RdfFile {
            container,
            config: self.config.clone(),
            classification,
            scanner,
            exam,
            geometry,
            num_singles_samples: 0,
        })
    }
}

impl RdfFile<DynContainer> {
    /// Open a file on disk with the default settings
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        OpenOptions::default().open(path)
    }

    /// Open a file on disk with custom reader settings
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self> {
        OpenOptions::new().config(config).open(path)
    }

    /// True if `path` opens as a container carrying the GE signature
    ///
    /// Nothing beyond the signature is checked; failures to open give `false`.
    pub fn probe<P: AsRef<Path>>(path: P) -> bool {
        match open_path(path) {
            Ok(container) => rdf::verify_signature(container.as_ref()),
            Err(_) => false,
        }
    }
}

impl<C: Container> RdfFile<C> {
    /// Check, classify and resolve an open container with the default settings
    pub fn from_container(container: C) -> Result<Self> {
        OpenOptions::default().open_container(container)
    }
}
