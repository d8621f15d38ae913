use std::fmt;

use serde::{Deserialize, Serialize};

/// Which end of the patient enters the gantry first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Head first
    HeadIn,
    /// Feet first
    FeetIn,
    /// Code not recognised
    Unknown,
}

impl Orientation {
    /// Map the RDF `patientEntry` code
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Orientation::HeadIn,
            1 => Orientation::FeetIn,
            _ => Orientation::Unknown,
        }
    }
}

/// How the patient lies on the bed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Face up
    Supine,
    /// Face down
    Prone,
    /// Left side down
    Left,
    /// Right side down
    Right,
    /// Code not recognised
    Unknown,
}

impl Rotation {
    /// Map the RDF `patientPosition` code
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Rotation::Supine,
            1 => Rotation::Prone,
            2 => Rotation::Left,
            3 => Rotation::Right,
            _ => Rotation::Unknown,
        }
    }
}

/// Patient orientation and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientPosition {
    /// Head or feet first
    pub orientation: Orientation,
    /// Supine, prone or decubitus
    pub rotation: Rotation,
}

impl PatientPosition {
    /// Build from the two RDF landmark codes
    pub fn from_codes(entry: u32, position: u32) -> Self {
        Self {
            orientation: Orientation::from_code(entry),
            rotation: Rotation::from_code(position),
        }
    }

    /// DICOM patient position code (`HFS`, `FFDL`, ...), or `unknown`
    pub fn code(&self) -> &'static str {
        match (self.orientation, self.rotation) {
            (Orientation::HeadIn, Rotation::Supine) => "HFS",
            (Orientation::HeadIn, Rotation::Prone) => "HFP",
            (Orientation::HeadIn, Rotation::Left) => "HFDL",
            (Orientation::HeadIn, Rotation::Right) => "HFDR",
            (Orientation::FeetIn, Rotation::Supine) => "FFS",
            (Orientation::FeetIn, Rotation::Prone) => "FFP",
            (Orientation::FeetIn, Rotation::Left) => "FFDL",
            (Orientation::FeetIn, Rotation::Right) => "FFDR",
            _ => "unknown",
        }
    }
}

impl fmt::Display for PatientPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
