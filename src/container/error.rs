/// Errors raised by container backends
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// The file is not a container of the expected underlying kind
    #[error("Not a container file: {0}")]
    NotAContainer(String),

    /// No dataset or group exists at the given path
    #[error("Path not found in container: {0}")]
    NotFound(String),

    /// The dataset exists but holds a different element type
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Dataset path
        path: String,
        /// Requested element type
        expected: &'static str,
        /// Element type stored in the container
        found: &'static str,
    },

    /// Hyperslab rank does not match the dataset rank
    #[error("Rank mismatch at {path}: dataset has rank {dataset}, selection has rank {selection}")]
    RankMismatch {
        /// Dataset path
        path: String,
        /// Rank of the stored dataset
        dataset: usize,
        /// Rank of the requested selection
        selection: usize,
    },

    /// Hyperslab reaches past the dataset extent
    #[error("Selection out of bounds at {path}: axis {axis} requests {end} of {extent}")]
    OutOfBounds {
        /// Dataset path
        path: String,
        /// Offending axis
        axis: usize,
        /// One past the last requested index on that axis
        end: usize,
        /// Dataset extent on that axis
        extent: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON container dump could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error reported by the HDF5 library
    #[error("HDF5 error: {0}")]
    Backend(String),
}
