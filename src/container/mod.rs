//! # Container Access
//!
//! Read-only access to the hierarchical container holding an RDF file.
//!
//! Everything above this module talks to a [`Container`]: typed scalar and
//! string reads by path, existence probes, extents, and rectangular
//! sub-array ("hyperslab") reads. Two backends are provided:
//!
//! - [`MemoryContainer`]: an in-memory tree of typed datasets that round-trips
//!   through JSON. Used for fixtures and tests.
//! - `Hdf5Container` (feature `hdf5`): a read-only HDF5 file session.
//!
//! [`open_path`] picks the backend from the file on disk.

mod error;
#[cfg(feature = "hdf5")]
mod h5;
mod memory;


pub use error::ContainerError;
#[cfg(feature = "hdf5")]
pub use h5::Hdf5Container;
pub use memory::{DatasetValues, MemoryContainer, MemoryDataset};

use std::path::Path;

/// Boxed container returned by [`open_path`]
pub type DynContainer = Box<dyn Container + Send + Sync>;

/// Rectangular selection within a dataset: `count[i]` elements starting at `offset[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperslab {
    /// First index on each axis
    pub offset: Vec<usize>,
    /// Number of elements on each axis
    pub count: Vec<usize>,
}

impl Hyperslab {
    /// Select `count` elements on each axis starting at `offset`
    pub fn new(offset: Vec<usize>, count: Vec<usize>) -> Self {
        Self { offset, count }
    }

    /// Select the whole of a dataset with the given extent
    pub fn full(extent: &[usize]) -> Self {
        Self {
            offset: vec![0; extent.len()],
            count: extent.to_vec(),
        }
    }

    /// Number of selected elements
    pub fn len(&self) -> usize {
        self.count.iter().product()
    }

    /// True when the selection covers no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the selection against a dataset extent
    pub(crate) fn check_within(&self, path: &str, extent: &[usize]) -> Result<(), ContainerError> {
        if self.offset.len() != extent.len() || self.count.len() != extent.len() {
            return Err(ContainerError::RankMismatch {
                path: path.to_string(),
                dataset: extent.len(),
                selection: self.count.len().max(self.offset.len()),
            });
        }
        for (axis, ((&offset, &count), &dim)) in
            self.offset.iter().zip(&self.count).zip(extent).enumerate()
        {
            let end = offset.checked_add(count).unwrap_or(usize::MAX);
            if end > dim {
                return Err(ContainerError::OutOfBounds {
                    path: path.to_string(),
                    axis,
                    end,
                    extent: dim,
                });
            }
        }
        Ok(())
    }
}

/// Read-only access to a hierarchical, self-describing container
///
/// Paths are absolute and `/`-separated (`/HeaderData/ExamData/manufacturer`).
/// Scalar reads accept rank-0 datasets and single-element arrays.
pub trait Container {
    /// True if a dataset or group exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Extent of the dataset at `path` (empty for a rank-0 scalar)
    fn shape(&self, path: &str) -> Result<Vec<usize>, ContainerError>;

    /// Read an unsigned 32-bit scalar
    fn read_u32(&self, path: &str) -> Result<u32, ContainerError>;

    /// Read a signed 32-bit scalar
    fn read_i32(&self, path: &str) -> Result<i32, ContainerError>;

    /// Read a 32-bit float scalar
    fn read_f32(&self, path: &str) -> Result<f32, ContainerError>;

    /// Read a string, with trailing NUL padding removed
    fn read_string(&self, path: &str) -> Result<String, ContainerError>;

    /// Read a byte hyperslab in row-major order
    fn read_u8_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u8>, ContainerError>;

    /// Read an unsigned 32-bit hyperslab in row-major order
    fn read_u32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u32>, ContainerError>;

    /// Read a 32-bit float hyperslab in row-major order
    fn read_f32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<f32>, ContainerError>;
}

impl<C: Container + ?Sized> Container for Box<C> {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn shape(&self, path: &str) -> Result<Vec<usize>, ContainerError> {
        (**self).shape(path)
    }

    fn read_u32(&self, path: &str) -> Result<u32, ContainerError> {
        (**self).read_u32(path)
    }

    fn read_i32(&self, path: &str) -> Result<i32, ContainerError> {
        (**self).read_i32(path)
    }

    fn read_f32(&self, path: &str) -> Result<f32, ContainerError> {
        (**self).read_f32(path)
    }

    fn read_string(&self, path: &str) -> Result<String, ContainerError> {
        (**self).read_string(path)
    }

    fn read_u8_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u8>, ContainerError> {
        (**self).read_u8_slab(path, slab)
    }

    fn read_u32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u32>, ContainerError> {
        (**self).read_u32_slab(path, slab)
    }

    fn read_f32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<f32>, ContainerError> {
        (**self).read_f32_slab(path, slab)
    }
}

/// Open a container file, choosing the backend from the file on disk
///
/// - `.json` files are parsed as [`MemoryContainer`] dumps
/// - anything else is opened as HDF5 (requires the `hdf5` feature)
pub fn open_path<P: AsRef<Path>>(path: P) -> Result<DynContainer, ContainerError> {
    let path = path.as_ref();

    if path.extension().map(|e| e == "json").unwrap_or(false) {
        return Ok(Box::new(MemoryContainer::from_json_file(path)?));
    }

    #[cfg(feature = "hdf5")]
    {
        Ok(Box::new(Hdf5Container::open(path)?))
    }

    #[cfg(not(feature = "hdf5"))]
    {
        Err(ContainerError::NotAContainer(format!(
            "{} (HDF5 support not compiled in; rebuild with the `hdf5` feature)",
            path.display()
        )))
    }
}
