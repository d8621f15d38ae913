use crate::container::ContainerError;

/// Errors that can occur while opening, classifying or reading an RDF file
#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    /// Container access failed (missing path, wrong type, not a container, ...)
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The container is readable but is not a GE file
    #[error("Invalid format: {0}")]
    Format(String),

    /// The major format revision is not handled
    #[error("Unsupported RDF version {found} (only version {supported} is supported)")]
    UnsupportedVersion {
        /// Revision found in the file
        found: u32,
        /// The revision this crate reads
        supported: u32,
    },

    /// None of the classifier probes matched
    #[error("Unrecognized RDF file kind: not list-mode, sinogram, geometry or normalisation data")]
    UnrecognizedFileKind,

    /// The payload is stored compressed
    #[error("Unsupported encoding: {0} is compressed; decompress the file and retry")]
    UnsupportedEncoding(String),

    /// The scanner named in the file is not in the catalog
    #[error("Scanner read from RDF file is \"{0}\", but this is not supported yet")]
    UnknownScanner(String),

    /// A dataset that must hold samples holds none
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Only the canonical offset (all zero) and stride (all one) are accepted
    #[error("Unsupported selection: {0}")]
    UnsupportedSelection(String),

    /// The operation needs a different file kind
    #[error("The file provided is not {expected} data")]
    WrongFileKind {
        /// Human-readable description of the required kind
        expected: &'static str,
    },

    /// A 1-based view, slice or sample number is outside its valid range
    #[error("Invalid {what} number {index} (valid range 1..={max})")]
    InvalidIndex {
        /// What is being indexed
        what: &'static str,
        /// Requested index
        index: u32,
        /// Largest valid index
        max: u32,
    },

    /// A payload dataset has an unexpected rank
    #[error("Dataset {path} has rank {rank}; expected {expected}")]
    DatasetRank {
        /// Dataset path
        path: String,
        /// Rank found
        rank: usize,
        /// Accepted ranks
        expected: &'static str,
    },

    /// A region descriptor was passed to the wrong read operation
    #[error("Region mismatch: {0}")]
    RegionMismatch(String),
}

/// Result alias for RDF operations
pub type Result<T> = std::result::Result<T, RdfError>;
