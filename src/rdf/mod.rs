//! # RDF Format Layer
//!
//! Format-level knowledge of GE RDF version 9 files: dataset paths and vendor
//! constants, the manufacturer signature and revision check, and the
//! structural classifier that decides what kind of data a file holds.
//!
//! Classification probes, in order (first match wins):
//!
//! | Kind | Probe |
//! |------|-------|
//! | list-mode | `isListFile` reads non-zero (and the stream must not be compressed) |
//! | sinogram | `/SegmentData/Segment2` exists |
//! | normalisation | `/3DCrystalEfficiency/crystalEfficiency` exists |
//! | geometry | `/SegmentData/Segment4/3D_Norm_Correction/slice1` exists |

pub mod constants;
mod classify;
mod error;
mod signature;

pub use classify::{classify, determine_geo_dimensionality, Classification, FileKind, GeoDims};
pub use error::{RdfError, Result};
pub use signature::{check_file, verify_signature};
