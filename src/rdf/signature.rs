use log::debug;

use crate::container::Container;

use super::classify::{classify, Classification};
use super::constants::{header, GE_SIGNATURE, SUPPORTED_MAJOR_VERSION};
use super::error::{RdfError, Result};

/// True iff the manufacturer field reads exactly `GE MEDICAL SYSTEMS`
///
/// Never fails: an unreadable or missing field is reported as `false`, so
/// arbitrary files can be probed cheaply.
pub fn verify_signature(container: &dyn Container) -> bool {
    match container.read_string(header::MANUFACTURER) {
        Ok(manufacturer) => manufacturer == GE_SIGNATURE,
        Err(e) => {
            debug!("No manufacturer signature: {}", e);
            false
        }
    }
}

/// Validate signature and format revision, then classify the file
pub fn check_file(container: &dyn Container) -> Result<Classification> {
    if !verify_signature(container) {
        return Err(RdfError::Format(
            "file is a container but not GE data".to_string(),
        ));
    }

    let version = container.read_u32(header::MAJOR_VERSION)?;
    if version != SUPPORTED_MAJOR_VERSION {
        return Err(RdfError::UnsupportedVersion {
            found: version,
            supported: SUPPORTED_MAJOR_VERSION,
        });
    }

    classify(container, version)
}
