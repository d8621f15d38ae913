use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::container::Container;

use super::constants::{probe, SUPPORTED_MAJOR_VERSION};
use super::error::{RdfError, Result};

/// What an RDF file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Raw stream of coincidence events
    ListMode,
    /// Binned projection data
    Sinogram,
    /// Crystal efficiencies; also carries the geometric correction
    Normalisation,
    /// Geometric correction factors only
    Geometry,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::ListMode => "list-mode",
            FileKind::Sinogram => "sinogram",
            FileKind::Normalisation => "normalisation",
            FileKind::Geometry => "geometry",
        };
        f.write_str(name)
    }
}

/// Dimensionality of the geometric correction in geo and norm files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoDims {
    /// Single axial segment
    #[serde(rename = "2d")]
    TwoD,
    /// More than one axial segment
    #[serde(rename = "3d")]
    ThreeD,
}

impl GeoDims {
    /// 2 or 3
    pub fn as_u32(self) -> u32 {
        match self {
            GeoDims::TwoD => 2,
            GeoDims::ThreeD => 3,
        }
    }
}

/// Result of classifying an open RDF file
///
/// The kind is a single enum value, so list-mode, sinogram and geometry are
/// mutually exclusive and a normalisation file always reports itself as geometry too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Kind selected by the first matching probe
    pub kind: FileKind,
    /// Major format revision
    pub format_version: u32,
    /// Geometric correction dimensionality (geo and norm files only)
    pub geo_dims: Option<GeoDims>,
}

impl Classification {
    /// List-mode file
    pub fn is_list(&self) -> bool {
        self.kind == FileKind::ListMode
    }

    /// Sinogram file
    pub fn is_sino(&self) -> bool {
        self.kind == FileKind::Sinogram
    }

    /// Geometry or normalisation file
    pub fn is_geo(&self) -> bool {
        matches!(self.kind, FileKind::Geometry | FileKind::Normalisation)
    }

    /// Normalisation file
    pub fn is_norm(&self) -> bool {
        self.kind == FileKind::Normalisation
    }
}

type Probe = fn(&dyn Container, u32) -> Result<bool>;

/// Structural probes in evaluation order; the first match wins.
///
/// Later kinds can be nested inside earlier ones (a norm file contains the
/// geometry slices), so the order matters.
const PROBES: [(FileKind, Probe); 4] = [
    (FileKind::ListMode, probe_list_mode),
    (FileKind::Sinogram, probe_sinogram),
    (FileKind::Normalisation, probe_normalisation),
    (FileKind::Geometry, probe_geometry),
];

fn probe_list_mode(container: &dyn Container, version: u32) -> Result<bool> {
    if container.read_u32(probe::IS_LIST_FILE)? == 0 {
        return Ok(false);
    }
    if version == SUPPORTED_MAJOR_VERSION && container.read_u32(probe::IS_LIST_COMPRESSED)? != 0 {
        return Err(RdfError::UnsupportedEncoding("the RDF9 list-mode payload".to_string()));
    }
    Ok(true)
}

fn probe_sinogram(container: &dyn Container, _version: u32) -> Result<bool> {
    Ok(container.exists(probe::SINOGRAM_GROUP))
}

fn probe_normalisation(container: &dyn Container, _version: u32) -> Result<bool> {
    Ok(container.exists(probe::CRYSTAL_EFFICIENCY))
}

fn probe_geometry(container: &dyn Container, _version: u32) -> Result<bool> {
    Ok(container.exists(probe::GEO_FIRST_SLICE))
}

/// Run the probe table against a container of the given format revision
pub fn classify(container: &dyn Container, format_version: u32) -> Result<Classification> {
    for (kind, matches) in PROBES {
        if !matches(container, format_version)? {
            debug!("Classifier probe for {} did not match", kind);
            continue;
        }

        let geo_dims = match kind {
            FileKind::Normalisation | FileKind::Geometry => {
                Some(determine_geo_dimensionality(container)?)
            }
            FileKind::ListMode | FileKind::Sinogram => None,
        };
        info!("Classified RDF{} file as {}", format_version, kind);

        return Ok(Classification {
            kind,
            format_version,
            geo_dims,
        });
    }
    Err(RdfError::UnrecognizedFileKind)
}

/// Read the axial segment size of the geometric correction and collapse it to 2-D/3-D
pub fn determine_geo_dimensionality(container: &dyn Container) -> Result<GeoDims> {
    let segments = container.read_u32(probe::GEO_SEGMENT_SIZE)?;
    Ok(if segments > 1 {
        GeoDims::ThreeD
    } else {
        GeoDims::TwoD
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;

    fn base(is_list: u32) -> MemoryContainer {
        MemoryContainer::new()
            .with_u32(probe::IS_LIST_FILE, is_list)
            .with_u32(probe::IS_LIST_COMPRESSED, 0)
    }

    #[test]
    fn test_list_mode_wins_over_everything() -> Result<()> {
        let container = base(1)
            .with_u8_array("/SegmentData/Segment2/3D_Sinogram/view1", &[1], vec![0])
            .with_f32_array(probe::CRYSTAL_EFFICIENCY, &[1, 2], vec![1.0, 1.0]);

        let classification = classify(&container, 9)?;
        assert_eq!(classification.kind, FileKind::ListMode);
        assert_eq!(classification.geo_dims, None);
        Ok(())
    }

    #[test]
    fn test_compressed_list_mode_is_rejected() {
        let container = base(1).with_u32(probe::IS_LIST_COMPRESSED, 1);
        let err = classify(&container, 9).unwrap_err();
        assert!(matches!(err, RdfError::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_compression_only_checked_for_revision_9() -> Result<()> {
        let container = base(1).with_u32(probe::IS_LIST_COMPRESSED, 1);
        assert_eq!(classify(&container, 10)?.kind, FileKind::ListMode);
        Ok(())
    }

    #[test]
    fn test_sinogram_is_an_existence_probe() -> Result<()> {
        let container =
            base(0).with_u8_array("/SegmentData/Segment2/3D_Sinogram/view1", &[1], vec![0]);
        let classification = classify(&container, 9)?;
        assert!(classification.is_sino());
        assert!(!classification.is_geo());
        Ok(())
    }

    #[test]
    fn test_norm_implies_geo() -> Result<()> {
        let container = base(0)
            .with_f32_array(probe::CRYSTAL_EFFICIENCY, &[1, 2], vec![1.0, 1.0])
            .with_u32_array(probe::GEO_FIRST_SLICE, &[1, 1], vec![7])
            .with_u32(probe::GEO_SEGMENT_SIZE, 1);

        let classification = classify(&container, 9)?;
        assert_eq!(classification.kind, FileKind::Normalisation);
        assert!(classification.is_norm());
        assert!(classification.is_geo());
        assert_eq!(classification.geo_dims, Some(GeoDims::TwoD));
        Ok(())
    }

    #[test]
    fn test_geometry_only() -> Result<()> {
        let container = base(0)
            .with_u32_array(probe::GEO_FIRST_SLICE, &[1, 1], vec![7])
            .with_u32(probe::GEO_SEGMENT_SIZE, 16);

        let classification = classify(&container, 9)?;
        assert_eq!(classification.kind, FileKind::Geometry);
        assert!(!classification.is_norm());
        assert_eq!(classification.geo_dims, Some(GeoDims::ThreeD));
        assert_eq!(classification.geo_dims.map(GeoDims::as_u32), Some(3));
        Ok(())
    }

    #[test]
    fn test_no_probe_matches() {
        let err = classify(&base(0), 9).unwrap_err();
        assert!(matches!(err, RdfError::UnrecognizedFileKind));
    }

    #[test]
    fn test_kind_flags_are_exclusive() {
        for kind in [
            FileKind::ListMode,
            FileKind::Sinogram,
            FileKind::Normalisation,
            FileKind::Geometry,
        ] {
            let c = Classification {
                kind,
                format_version: 9,
                geo_dims: None,
            };
            let exclusive = [c.is_list(), c.is_sino(), c.is_geo() && !c.is_norm()];
            assert!(exclusive.iter().filter(|&&flag| flag).count() <= 1);
            assert!(!c.is_norm() || c.is_geo());
        }
    }
}
