use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{ArrayViewD, IxDyn, Slice};
use serde::{Deserialize, Serialize};

use super::{Container, ContainerError, Hyperslab};

/// Typed element storage of one in-memory dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DatasetValues {
    /// Unsigned bytes
    U8(Vec<u8>),
    /// Unsigned 32-bit integers
    U32(Vec<u32>),
    /// Signed 32-bit integers
    I32(Vec<i32>),
    /// 32-bit floats
    F32(Vec<f32>),
    /// A single string
    Text(String),
}

impl DatasetValues {
    fn type_name(&self) -> &'static str {
        match self {
            DatasetValues::U8(_) => "u8",
            DatasetValues::U32(_) => "u32",
            DatasetValues::I32(_) => "i32",
            DatasetValues::F32(_) => "f32",
            DatasetValues::Text(_) => "string",
        }
    }

    fn len(&self) -> usize {
        match self {
            DatasetValues::U8(v) => v.len(),
            DatasetValues::U32(v) => v.len(),
            DatasetValues::I32(v) => v.len(),
            DatasetValues::F32(v) => v.len(),
            DatasetValues::Text(_) => 1,
        }
    }
}

/// One in-memory dataset: a row-major extent plus its elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDataset {
    /// Extent; empty for a scalar
    #[serde(default)]
    pub shape: Vec<usize>,
    /// Elements in row-major order
    pub values: DatasetValues,
}

/// In-memory container keyed by absolute dataset path
///
/// Groups are implicit: a group exists whenever some dataset lives below it.
///
/// ```rust
/// use petrdf::container::{Container, MemoryContainer};
///
/// let container = MemoryContainer::new()
///     .with_string("/HeaderData/ExamData/manufacturer", "GE MEDICAL SYSTEMS")
///     .with_u32("/HeaderData/RDFConfiguration/fileVersion/majorVersion", 9);
///
/// assert!(container.exists("/HeaderData/ExamData"));
/// assert_eq!(container.read_u32("/HeaderData/RDFConfiguration/fileVersion/majorVersion")?, 9);
/// # Ok::<(), petrdf::container::ContainerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryContainer {
    datasets: BTreeMap<String, MemoryDataset>,
}

impl MemoryContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a container dump written by [`MemoryContainer::to_json`]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ContainerError::NotAContainer(format!("{}: {}", path.display(), e)))
    }

    /// Parse a container dump
    pub fn from_json(json: &str) -> Result<Self, ContainerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the container to JSON
    pub fn to_json(&self) -> Result<String, ContainerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert (or replace) a dataset
    pub fn insert(&mut self, path: impl Into<String>, dataset: MemoryDataset) {
        self.datasets.insert(path.into(), dataset);
    }

    /// Remove a dataset, returning it if present
    pub fn remove(&mut self, path: &str) -> Option<MemoryDataset> {
        self.datasets.remove(path)
    }

    /// Iterate over dataset paths in lexical order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// Add an unsigned 32-bit scalar
    pub fn with_u32(self, path: &str, value: u32) -> Self {
        self.with_dataset(path, Vec::new(), DatasetValues::U32(vec![value]))
    }

    /// Add a signed 32-bit scalar
    pub fn with_i32(self, path: &str, value: i32) -> Self {
        self.with_dataset(path, Vec::new(), DatasetValues::I32(vec![value]))
    }

    /// Add a 32-bit float scalar
    pub fn with_f32(self, path: &str, value: f32) -> Self {
        self.with_dataset(path, Vec::new(), DatasetValues::F32(vec![value]))
    }

    /// Add a string
    pub fn with_string(self, path: &str, value: &str) -> Self {
        self.with_dataset(path, Vec::new(), DatasetValues::Text(value.to_string()))
    }

    /// Add a byte array with the given extent
    pub fn with_u8_array(self, path: &str, shape: &[usize], data: Vec<u8>) -> Self {
        self.with_dataset(path, shape.to_vec(), DatasetValues::U8(data))
    }

    /// Add an unsigned 32-bit array with the given extent
    pub fn with_u32_array(self, path: &str, shape: &[usize], data: Vec<u32>) -> Self {
        self.with_dataset(path, shape.to_vec(), DatasetValues::U32(data))
    }

    /// Add a 32-bit float array with the given extent
    pub fn with_f32_array(self, path: &str, shape: &[usize], data: Vec<f32>) -> Self {
        self.with_dataset(path, shape.to_vec(), DatasetValues::F32(data))
    }

    fn with_dataset(mut self, path: &str, shape: Vec<usize>, values: DatasetValues) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), values.len());
        self.insert(path, MemoryDataset { shape, values });
        self
    }

    fn dataset(&self, path: &str) -> Result<&MemoryDataset, ContainerError> {
        self.datasets
            .get(path)
            .ok_or_else(|| ContainerError::NotFound(path.to_string()))
    }

    fn scalar<'a, T: Copy + 'a>(
        &'a self,
        path: &str,
        expected: &'static str,
        pick: impl Fn(&'a DatasetValues) -> Option<&'a [T]>,
    ) -> Result<T, ContainerError> {
        let dataset = self.dataset(path)?;
        let values = pick(&dataset.values).ok_or_else(|| ContainerError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: dataset.values.type_name(),
        })?;
        match values {
            [value] => Ok(*value),
            _ => Err(ContainerError::RankMismatch {
                path: path.to_string(),
                dataset: dataset.shape.len(),
                selection: 0,
            }),
        }
    }

    fn slab<'a, T: Copy + 'a>(
        &'a self,
        path: &str,
        slab: &Hyperslab,
        expected: &'static str,
        pick: impl Fn(&'a DatasetValues) -> Option<&'a [T]>,
    ) -> Result<Vec<T>, ContainerError> {
        let dataset = self.dataset(path)?;
        let values = pick(&dataset.values).ok_or_else(|| ContainerError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: dataset.values.type_name(),
        })?;
        slab.check_within(path, &dataset.shape)?;

        let view = ArrayViewD::from_shape(IxDyn(&dataset.shape), values)
            .map_err(|e| ContainerError::Backend(format!("{}: {}", path, e)))?;
        let selected = view.slice_each_axis(|ax| {
            let start = slab.offset[ax.axis.index()];
            let end = start + slab.count[ax.axis.index()];
            Slice::from(start..end)
        });
        Ok(selected.iter().copied().collect())
    }
}

impl Container for MemoryContainer {
    fn exists(&self, path: &str) -> bool {
        if self.datasets.contains_key(path) {
            return true;
        }
        let prefix = format!("{}/", path.trim_end_matches('/'));
        self.datasets
            .range(prefix.clone()..)
            .next()
            .map(|(key, _)| key.starts_with(&prefix))
            .unwrap_or(false)
    }

    fn shape(&self, path: &str) -> Result<Vec<usize>, ContainerError> {
        Ok(self.dataset(path)?.shape.clone())
    }

    fn read_u32(&self, path: &str) -> Result<u32, ContainerError> {
        self.scalar(path, "u32", |v| match v {
            DatasetValues::U32(data) => Some(data.as_slice()),
            _ => None,
        })
    }

    fn read_i32(&self, path: &str) -> Result<i32, ContainerError> {
        self.scalar(path, "i32", |v| match v {
            DatasetValues::I32(data) => Some(data.as_slice()),
            _ => None,
        })
    }

    fn read_f32(&self, path: &str) -> Result<f32, ContainerError> {
        self.scalar(path, "f32", |v| match v {
            DatasetValues::F32(data) => Some(data.as_slice()),
            _ => None,
        })
    }

    fn read_string(&self, path: &str) -> Result<String, ContainerError> {
        let dataset = self.dataset(path)?;
        match &dataset.values {
            DatasetValues::Text(text) => Ok(text.trim_end_matches('\0').to_string()),
            other => Err(ContainerError::TypeMismatch {
                path: path.to_string(),
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    fn read_u8_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u8>, ContainerError> {
        self.slab(path, slab, "u8", |v| match v {
            DatasetValues::U8(data) => Some(data.as_slice()),
            _ => None,
        })
    }

    fn read_u32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<u32>, ContainerError> {
        self.slab(path, slab, "u32", |v| match v {
            DatasetValues::U32(data) => Some(data.as_slice()),
            _ => None,
        })
    }

    fn read_f32_slab(&self, path: &str, slab: &Hyperslab) -> Result<Vec<f32>, ContainerError> {
        self.slab(path, slab, "f32", |v| match v {
            DatasetValues::F32(data) => Some(data.as_slice()),
            _ => None,
        })
    }
}
