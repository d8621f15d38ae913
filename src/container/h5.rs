use std::path::Path;

use ::hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use ::hdf5::{Dataset, File, H5Type};
use ndarray::{s, IxDyn};

use super::{Container, ContainerError, Hyperslab};

/// Longest fixed-length string read from a header field (bytes)
const MAX_FIXED_STRING: usize = 16384;

/// Read-only HDF5 file session
pub struct Hdf5Container {
    file: File,
}

impl Hdf5Container {
    /// Open an HDF5 file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ContainerError::NotAContainer(format!(
                "{}: no such file",
                path.display()
            )));
        }
        let file = File::open(path)
            .map_err(|e| ContainerError::NotAContainer(format!("{}: {}", path.display(), e)))?;
        Ok(Self { file })
    }

    fn dataset(&self, path: &str) -> Result<Dataset, ContainerError> {
        if !self.exists(path) {
            return Err(ContainerError::NotFound(path.to_string()));
        }
        self.file.dataset(path).map_err(backend)
    }

    fn scalar<T: H5Type + Copy>(&self, path: &str) -> Result<T, ContainerError> {
        let dataset = self.dataset(path)?;
        let values = dataset.read_raw::<T>().map_err(|e| type_error::<T>(path, e))?;
        match values.as_slice() {
            [value] => Ok(*value),
            _ => Err(ContainerError::RankMismatch {
                path: path.to_string(),
                dataset: dataset.ndim(),
                selection: 0,
            }),
        }
    }

    fn slab<T: H5Type + Copy>(&self, path: &str, slab: &Hyperslab) -> Result<Vec<T>, ContainerError> {
        let dataset = self.dataset(path)?;
        slab.check_within(path, &dataset.shape())?;

        let range = |axis: usize| slab.offset[axis]..slab.offset[axis] + slab.count[axis];
        let values = match slab.count.len() {
            1 => dataset.read_slice::<T, _, IxDyn>(s![range(0)]),
            2 => dataset.read_slice::<T, _, IxDyn>(s![range(0), range(1)]),
            3 => dataset.read_slice::<T, _, IxDyn>(s![range(0), range(1), range(2)]),
            4 => dataset.read_slice::<T, _, IxDyn>(s![range(0), range(1), range(2), range(3)]),
            5 => dataset.read_slice::<T, _, IxDyn>(s![
                range(0),
                range(1),
                range(2),
                range(3),
                range(4)
            ]),
            rank => {
                return Err(ContainerError::Backend(format!(
                    "{}: hyperslab of rank {} not supported",
                    path, rank
                )))
            }
        }
        .map_err(|e| type_error::<T>(path, e))?;

        Ok(values.iter().copied().collect())
    }
}

/// Read a fixed-length string scalar into a buffer at least `len` bytes wide
fn fixed_string(
    path: &str,
    dataset: &Dataset,
    len: usize,
    unicode: bool,
) -> ::hdf5::Result<String> {
    match len {
        0..=64 => read_fixed::<64>(dataset, unicode),
        65..=256 => read_fixed::<256>(dataset, unicode),
        257..=1024 => read_fixed::<1024>(dataset, unicode),
        1025..=MAX_FIXED_STRING => read_fixed::<MAX_FIXED_STRING>(dataset, unicode),
        _ => Err(format!("{}: fixed string of {} bytes is too long", path, len).into()),
    }
}

fn read_fixed<const N: usize>(dataset: &Dataset, unicode: bool) -> ::hdf5::Result<String> {
    if unicode {
        dataset
            .read_scalar::<FixedUnicode<N>>()
            .map(|s| s.as_str().to_string())
    } else {
        dataset
            .read_scalar::<FixedAscii<N>>()
            .map(|s| s.as_str().to_string())
    }
}

fn backend(e: ::hdf5::Error) -> ContainerError {
    ContainerError::Backend(e.to_string())
}

fn type_error<T>(path: &str, e: ::hdf5::Error) -> ContainerError {
    let message = e.to_string();
    if message.contains("conversion") {
        ContainerError::TypeMismatch {
            path: path.to_string(),
            expected: std::any::type_name::<T>(),
            found: "incompatible HDF5 type",
        }
    } else {
        ContainerError::Backend(format!("{}: {}", path, message))
    }
}

impl Container for Hdf5Container {
    fn exists(&self, path: &str) -> bool {
        // Each link along the path must be probed in turn; probing a child of a
        // missing group is an error in the HDF5 library.
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            if !self.file.link_exists(&current) {
                return false;
            }
        }
        true
    }

    fn shape(&self, path: &str) -> Result<Vec<usize>, ContainerError> {
        Ok(self.dataset(path)?.shape())
    }

    fn read_u32(&self, path: &str) -> Result<u32, ContainerError> {
        self.scalar(path)
    }

    fn read_i32(&self, path: &str) -> Result<i32, ContainerError> {
        self.scalar(path)
    }

    fn read_f32(&self, path: &str) -> Result<f32, ContainerError> {
        self.scalar(path)
    }

    fn read_string(&self, path: &str) -> Result<String, ContainerError> {
        let dataset = self.dataset(path)?;
        let descriptor = dataset
            .dtype()
            .and_then(|dtype| dtype.to_descriptor())
            .map_err(backend)?;

        let text = match descriptor {
            TypeDescriptor::VarLenUnicode => dataset
                .read_scalar::<VarLenUnicode>()
                .map(|s| s.as_str().to_string()),
            TypeDescriptor::VarLenAscii => dataset
                .read_scalar::<VarLenAscii>()
                .map(|s| s.as_str().to_string()),
            TypeDescriptor::FixedAscii(len) => fixed_string(path, &dataset, len, false),
            TypeDescriptor::FixedUnicode(len) => fixed_string(path, &dataset, len, true),
            _ => {
                return Err(ContainerError::TypeMismatch {
                    path: path.to_string(),
                    expected: "string",
                    found: "numeric",
                })
            }
        }
        .map_err(backend)?;

        Ok(text.trim_end_matches('\0').to_string())
    }

    fn read_u8_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u8>, ContainerError> {
        self.slab(path, slab)
    }

    fn read_u32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u32>, ContainerError> {
        self.slab(path, slab)
    }

    fn read_f32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<f32>, ContainerError> {
        self.slab(path, slab)
    }
}
