//! # petrdf - GE RDF9 PET Raw Data Reader
//!
//! `petrdf` reads the raw-data files written by GE PET scanners in the RDF
//! revision 9 layout. These are HDF5 containers holding list-mode streams,
//! sinograms, normalisation data or geometric correction factors, together
//! with header fields describing the scanner and the exam.
//!
//! ## Key Features
//!
//! - **File classification**: signature and format-version checks, then
//!   list-mode / sinogram / normalisation / geometry detection from probe
//!   fields, computed once when the file is opened.
//!
//! - **Scanner reconciliation**: the model named in the file is looked up in a
//!   catalog of known GE systems and its timing, TOF and ring-radius values are
//!   corrected from the file where they disagree.
//!
//! - **Exam metadata**: patient position, energy window, time frames and the
//!   radionuclide with its half-life and branching ratio.
//!
//! - **Region reads**: each payload is located by an `initialise_*` call that
//!   returns a region descriptor, then read in logical axis order into
//!   [`ndarray`] arrays.
//!
//! - **Pluggable containers**: everything goes through the [`container::Container`]
//!   trait. HDF5 access is behind the `hdf5` feature; an in-memory container
//!   with a JSON dump format covers tests and tooling.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use petrdf::reader::RdfFile;
//!
//! let mut file = RdfFile::open("rdf9_listmode.h5")?;
//! assert!(file.is_list_file());
//!
//! if let Some(region) = file.initialise_listmode_data()? {
//!     let mut buffer = vec![0u8; 4096.min(region.size())];
//!     file.read_list_data(&region, 0, &mut buffer)?;
//!     println!(
//!         "{} bytes of list data, {} singles samples",
//!         region.size(),
//!         file.num_singles_samples()
//!     );
//! }
//! # Ok::<(), petrdf::rdf::RdfError>(())
//! ```
//!
//! ## Axis Conventions
//!
//! | Payload | On disk | Returned |
//! |---------|---------|----------|
//! | sinogram view | `(NX, NY, NZ)` | `(NZ, NY, NX)` with the segment axis flipped |
//! | singles, geometric and efficiency factors | row-major | last axis reversed |
//! | list-mode | byte stream | unchanged |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod container;
pub mod exam;
pub mod fixtures;
pub mod geometry;
pub mod inspect;
pub mod rdf;
pub mod reader;
pub mod region;
pub mod scanner;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ReaderConfig};
    pub use crate::container::{Container, ContainerError, DynContainer, MemoryContainer};
    pub use crate::exam::{ExamInfo, PatientPosition, Radionuclide, RadionuclideLookup};
    pub use crate::geometry::ProjectionGeometry;
    pub use crate::inspect::{inspect_file, InspectionReport};
    pub use crate::rdf::{Classification, FileKind, GeoDims, RdfError};
    pub use crate::reader::{OpenOptions, RdfFile};
    pub use crate::region::{ListModeRegion, ReadKind, Region, Selection, SinglesRegion};
    pub use crate::scanner::{ResolvedScanner, Scanner, ScannerCatalog};
}
