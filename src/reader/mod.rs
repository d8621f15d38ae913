//! # RDF File Reader
//!
//! [`RdfFile`] owns one open container and everything derived from it at open
//! time: the file classification, the resolved scanner, the acquisition
//! metadata and the projection geometry.
//!
//! A value only exists once the file has passed the signature and version
//! checks and has been classified; any failure while opening drops the
//! container and returns the error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use petrdf::reader::RdfFile;
//! use petrdf::region::Selection;
//!
//! let mut file = RdfFile::open("sino.h5")?;
//! println!("{} on {}", file.classification().kind, file.scanner().name);
//!
//! if let Some(region) = file.initialise_proj_data(1)? {
//!     let view = file.read_sinogram(&region, &Selection::full(region.rank()))?;
//!     println!("view 1: {:?}", view.dim());
//! }
//! # Ok::<(), petrdf::rdf::RdfError>(())
//! ```

mod open;
mod regions;


pub use open::OpenOptions;

use crate::config::ReaderConfig;
use crate::container::{Container, DynContainer};
use crate::exam::ExamInfo;
use crate::geometry::ProjectionGeometry;
use crate::rdf::{self, Classification, GeoDims, Result};
use crate::scanner::{ResolvedScanner, Scanner};

/// An open, classified GE RDF file
pub struct RdfFile<C: Container = DynContainer> {
    container: C,
    config: ReaderConfig,
    classification: Classification,
    scanner: ResolvedScanner,
    exam: ExamInfo,
    geometry: ProjectionGeometry,
    num_singles_samples: u32,
}

impl<C: Container> RdfFile<C> {
    /// True iff the manufacturer field reads exactly `GE MEDICAL SYSTEMS`
    pub fn verify_signature(&self) -> bool {
        rdf::verify_signature(&self.container)
    }

    /// Re-run the signature and version checks and re-derive the classification
    pub fn check_file(&mut self) -> Result<Classification> {
        self.classification = rdf::check_file(&self.container)?;
        Ok(self.classification)
    }

    /// Classification computed when the file was opened
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// List-mode file
    pub fn is_list_file(&self) -> bool {
        self.classification.is_list()
    }

    /// Sinogram file
    pub fn is_sino_file(&self) -> bool {
        self.classification.is_sino()
    }

    /// Geometry or normalisation file
    pub fn is_geo_file(&self) -> bool {
        self.classification.is_geo()
    }

    /// Normalisation file
    pub fn is_norm_file(&self) -> bool {
        self.classification.is_norm()
    }

    /// 2-D or 3-D geometric correction; `None` unless geometry or normalisation
    pub fn geo_dimensionality(&self) -> Option<GeoDims> {
        self.classification.geo_dims
    }

    /// Read the geometric correction dimensionality from the file again
    pub fn determine_geo_dimensionality(&self) -> Result<GeoDims> {
        rdf::determine_geo_dimensionality(&self.container)
    }

    /// Major format revision
    pub fn format_version(&self) -> u32 {
        self.classification.format_version
    }

    /// Resolved scanner model
    pub fn scanner(&self) -> &Scanner {
        &self.scanner.scanner
    }

    /// Resolved scanner with the catalog corrections that were applied
    pub fn resolved_scanner(&self) -> &ResolvedScanner {
        &self.scanner
    }

    /// Acquisition metadata
    pub fn exam_info(&self) -> &ExamInfo {
        &self.exam
    }

    /// Projection geometry
    pub fn projection_geometry(&self) -> &ProjectionGeometry {
        &self.geometry
    }

    /// Valid singles samples recorded by the last list-mode or singles initialisation
    pub fn num_singles_samples(&self) -> u32 {
        self.num_singles_samples
    }

    /// Reader settings used while opening
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Underlying container
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Close the file and return the container
    pub fn into_container(self) -> C {
        self.container
    }
}

impl<C: Container> std::fmt::Debug for RdfFile<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfFile")
            .field("classification", &self.classification)
            .field("scanner", &self.scanner.scanner.name)
            .field("num_singles_samples", &self.num_singles_samples)
            .finish_non_exhaustive()
    }
}
