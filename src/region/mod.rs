//! # Dataset Regions
//!
//! Purpose-specific extraction of the large RDF payloads.
//!
//! Each `initialise_*` function validates the file kind, resolves the dataset
//! path for the requested view, slice or sample set, and returns a region
//! descriptor. The matching `read_*` function takes that descriptor and
//! returns the data in logical axis order:
//!
//! | Purpose | Initialise | Read | Element |
//! |---------|------------|------|---------|
//! | list-mode | [`initialise_listmode`] | [`read_list_data`] | raw bytes |
//! | singles | [`initialise_singles`] | [`read_singles`] | `u32` |
//! | sinogram view | [`initialise_sinogram`] | [`read_sinogram`] | `u8` |
//! | geometric factors | [`initialise_geo_factors`] | [`read_geometric_factors`] | `u32` |
//! | efficiency factors | [`initialise_efficiency`] | [`read_efficiency_factors`] | `f32` |
//!
//! `initialise_*` returns `Ok(None)` when the file's format revision has no
//! layout for the purpose.

mod read;
mod transform;

#[cfg(test)]
mod tests;

pub use read::{
    read_efficiency_factors, read_geometric_factors, read_list_data, read_singles, read_sinogram,
};
pub use transform::{reverse_last_axis, sinogram_to_logical};

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::container::Container;
use crate::rdf::constants::{
    payload, record, sorter, MAX_DATASET_DIMS, SUPPORTED_MAJOR_VERSION,
};
use crate::rdf::{Classification, RdfError, Result};

/// What a region is read for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadKind {
    /// List-mode event stream
    ListMode,
    /// Per-crystal singles samples
    Singles,
    /// One sinogram view
    Sinogram,
    /// One geometric correction slice
    Geometry,
    /// Crystal efficiency factors
    Efficiency,
}

impl fmt::Display for ReadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadKind::ListMode => "list-mode",
            ReadKind::Singles => "singles",
            ReadKind::Sinogram => "sinogram",
            ReadKind::Geometry => "geometric factors",
            ReadKind::Efficiency => "efficiency factors",
        };
        f.write_str(name)
    }
}

/// Dataset and extent selected by an `initialise_*` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Purpose of the region
    pub kind: ReadKind,
    /// Dataset path (for singles, the per-sample prefix)
    pub path: String,
    /// On-disk extent that is read
    pub extent: Vec<usize>,
}

impl Region {
    /// Number of axes
    pub fn rank(&self) -> usize {
        self.extent.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.extent.iter().product()
    }

    /// True when the extent covers no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expect_kind(&self, kind: ReadKind) -> Result<()> {
        if self.kind != kind {
            return Err(RdfError::RegionMismatch(format!(
                "{} region passed to the {} reader",
                self.kind, kind
            )));
        }
        Ok(())
    }
}

/// Vendor record layout of the list-mode stream (not stored in the file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordLayout {
    /// Bytes identifying a record's type
    pub signature_size: usize,
    /// Largest record (bytes)
    pub max_record_size: usize,
}

impl RecordLayout {
    /// Layout of RDF9 list-mode records
    pub const RDF9: RecordLayout = RecordLayout {
        signature_size: record::SIGNATURE_SIZE,
        max_record_size: record::MAX_RECORD_SIZE,
    };
}

/// List-mode stream region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListModeRegion {
    /// The `listData` dataset
    pub region: Region,
    /// Record layout
    pub record: RecordLayout,
    /// Valid singles samples recorded alongside the stream
    pub num_singles_samples: u32,
}

impl ListModeRegion {
    /// Length of the stream (bytes)
    pub fn size(&self) -> usize {
        self.region.extent[0]
    }
}

/// Singles region: extent of `sample1` and the number of valid samples
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinglesRegion {
    /// Sample prefix and per-sample extent
    pub region: Region,
    /// Valid samples; sample numbers run from 1 to this value
    pub num_samples: u32,
}

impl SinglesRegion {
    /// Dataset path of a 1-based sample
    pub fn sample_path(&self, sample: u32) -> String {
        format!("{}{}", self.region.path, sample)
    }
}

/// Offset and stride requested by a caller; only the full region is supported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// First index on each axis
    pub offset: Vec<u64>,
    /// Step on each axis
    pub stride: Vec<u64>,
}

impl Selection {
    /// Offset and stride on every axis
    pub fn new(offset: Vec<u64>, stride: Vec<u64>) -> Self {
        Self { offset, stride }
    }

    /// Zero offset and unit stride on `rank` axes
    pub fn full(rank: usize) -> Self {
        Self {
            offset: vec![0; rank],
            stride: vec![1; rank],
        }
    }

    pub(crate) fn check(&self, region: &Region) -> Result<()> {
        let rank = region.rank();
        if self.offset.len() != rank || self.stride.len() != rank {
            return Err(RdfError::UnsupportedSelection(format!(
                "selection has {} offsets and {} strides for a {}-D region",
                self.offset.len(),
                self.stride.len(),
                rank
            )));
        }
        if self.offset.iter().any(|&o| o != 0) {
            return Err(RdfError::UnsupportedSelection(format!(
                "only a zero offset is supported, got {:?}",
                self.offset
            )));
        }
        if self.stride.iter().any(|&s| s != 1) {
            return Err(RdfError::UnsupportedSelection(format!(
                "only a unit stride is supported, got {:?}",
                self.stride
            )));
        }
        Ok(())
    }
}

/// Fail with [`RdfError::WrongFileKind`] unless `condition` holds
pub(crate) fn require(condition: bool, expected: &'static str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(RdfError::WrongFileKind { expected })
    }
}

/// Extent of `path`, rejecting ranks outside `min..=max`
fn dataset_extent(
    container: &dyn Container,
    path: &str,
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<Vec<usize>> {
    let extent = container.shape(path)?;
    let rank = extent.len();
    if rank < min || rank > max.min(MAX_DATASET_DIMS) {
        return Err(RdfError::DatasetRank {
            path: path.to_string(),
            rank,
            expected,
        });
    }
    Ok(extent)
}

fn read_num_valid_samples(container: &dyn Container) -> Result<u32> {
    let samples = container.read_u32(payload::NUM_VALID_SAMPLES)?;
    if samples == 0 {
        return Err(RdfError::EmptyDataset(
            "zero valid singles samples in data".to_string(),
        ));
    }
    Ok(samples)
}

/// Select the list-mode event stream
pub fn initialise_listmode(
    container: &dyn Container,
    classification: &Classification,
) -> Result<Option<ListModeRegion>> {
    require(classification.is_list(), "list-mode")?;
    if classification.format_version != SUPPORTED_MAJOR_VERSION {
        return Ok(None);
    }

    let num_singles_samples = read_num_valid_samples(container)?;
    let extent = dataset_extent(container, payload::LIST_DATA, 1, 1, "1")?;
    debug!("List-mode stream {} holds {} bytes", payload::LIST_DATA, extent[0]);

    Ok(Some(ListModeRegion {
        region: Region {
            kind: ReadKind::ListMode,
            path: payload::LIST_DATA.to_string(),
            extent,
        },
        record: RecordLayout::RDF9,
        num_singles_samples,
    }))
}

/// Select the singles samples
pub fn initialise_singles(
    container: &dyn Container,
    classification: &Classification,
) -> Result<Option<SinglesRegion>> {
    require(
        classification.is_list() || classification.is_sino(),
        "list-mode or sinogram",
    )?;
    if classification.format_version != SUPPORTED_MAJOR_VERSION {
        return Ok(None);
    }

    let first = format!("{}1", payload::SINGLES_SAMPLE_PREFIX);
    let extent = dataset_extent(container, &first, 2, MAX_DATASET_DIMS, "2 to 5")?;
    let num_samples = read_num_valid_samples(container)?;
    debug!("Singles samples {:?}, {} valid", extent, num_samples);

    Ok(Some(SinglesRegion {
        region: Region {
            kind: ReadKind::Singles,
            path: payload::SINGLES_SAMPLE_PREFIX.to_string(),
            extent,
        },
        num_samples,
    }))
}

/// Select one sinogram view (1-based, at most `num_views`)
pub fn initialise_sinogram(
    container: &dyn Container,
    classification: &Classification,
    num_views: u32,
    view: u32,
) -> Result<Option<Region>> {
    require(classification.is_sino(), "sinogram")?;
    let rdf9 = classification.format_version == SUPPORTED_MAJOR_VERSION;
    if rdf9 && container.read_u32(sorter::SEGMENT2_COMPRESSED_SIZE)? != 0 {
        return Err(RdfError::UnsupportedEncoding("the RDF9 sinogram".to_string()));
    }
    if view == 0 || view > num_views {
        return Err(RdfError::InvalidIndex {
            what: "view",
            index: view,
            max: num_views,
        });
    }
    if !rdf9 {
        return Ok(None);
    }

    let prefix = if container.read_u32(sorter::NUM_TOF_BINS)? > 1 {
        payload::TOF_SINOGRAM_VIEW_PREFIX
    } else {
        payload::SINOGRAM_VIEW_PREFIX
    };
    let path = format!("{}{}", prefix, view);
    let extent = dataset_extent(container, &path, 2, 3, "2 or 3")?;
    debug!("Sinogram view {} at {} has extent {:?}", view, path, extent);

    Ok(Some(Region {
        kind: ReadKind::Sinogram,
        path,
        extent,
    }))
}

/// Select one geometric correction slice (1-based)
pub fn initialise_geo_factors(
    container: &dyn Container,
    classification: &Classification,
    slice: u32,
) -> Result<Option<Region>> {
    require(classification.is_geo(), "geometry")?;
    if slice == 0 {
        return Err(RdfError::InvalidIndex {
            what: "geometry slice",
            index: slice,
            max: u32::MAX,
        });
    }
    if classification.format_version != SUPPORTED_MAJOR_VERSION {
        return Ok(None);
    }

    let path = format!("{}{}", payload::GEO_SLICE_PREFIX, slice);
    let extent = dataset_extent(container, &path, 2, MAX_DATASET_DIMS, "2 to 5")?;
    debug!("Geometry slice {} has extent {:?}", slice, extent);

    Ok(Some(Region {
        kind: ReadKind::Geometry,
        path,
        extent,
    }))
}

/// Select the crystal efficiency factors
///
/// The dataset's second axis is twice the number of detectors per ring; only
/// the first half is read. Where the doubling comes from is not documented.
pub fn initialise_efficiency(
    container: &dyn Container,
    classification: &Classification,
) -> Result<Option<Region>> {
    require(classification.is_norm(), "normalisation")?;
    if classification.format_version != SUPPORTED_MAJOR_VERSION {
        return Ok(None);
    }

    let path = payload::CRYSTAL_EFFICIENCY;
    let mut extent = dataset_extent(container, path, 2, MAX_DATASET_DIMS, "2 to 5")?;
    extent[1] /= 2;
    debug!("Efficiency factors {} read with extent {:?}", path, extent);

    Ok(Some(Region {
        kind: ReadKind::Efficiency,
        path: path.to_string(),
        extent,
    }))
}
