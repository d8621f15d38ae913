use std::fmt;

use serde::Serialize;

/// Outcome of comparing a catalog value with a measured one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciled<T> {
    /// Value to keep
    pub value: T,
    /// True when the measured value replaced the catalog value
    pub overridden: bool,
}

/// Keep `catalog` unless it differs from `measured` by more than `tolerance`
///
/// ```rust
/// use petrdf::scanner::reconcile;
///
/// assert_eq!(reconcile(390.0, 390.05, 0.1).value, 390.0);
/// assert_eq!(reconcile(390.0, 320.0, 0.1).value, 320.0);
/// ```
pub fn reconcile(catalog: f32, measured: f32, tolerance: f32) -> Reconciled<f32> {
    if (catalog - measured).abs() > tolerance {
        Reconciled {
            value: measured,
            overridden: true,
        }
    } else {
        Reconciled {
            value: catalog,
            overridden: false,
        }
    }
}

/// Keep `catalog` unless it differs from `measured` at all (counts)
pub fn reconcile_exact<T: PartialEq + Copy>(catalog: T, measured: T) -> Reconciled<T> {
    Reconciled {
        value: measured,
        overridden: catalog != measured,
    }
}

/// Scanner field that can be corrected from the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScannerField {
    /// Effective ring radius (mm)
    EffectiveRingRadius,
    /// Coincidence timing resolution (ps)
    TimingResolution,
    /// Width of an unmashed TOF bin (ps)
    TofBinSize,
    /// Number of unmashed TOF bins
    TofBinCount,
}

impl fmt::Display for ScannerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScannerField::EffectiveRingRadius => "effective ring radius",
            ScannerField::TimingResolution => "timing resolution",
            ScannerField::TofBinSize => "size of (unmashed) TOF bins",
            ScannerField::TofBinCount => "number of (unmashed) TOF bins",
        };
        f.write_str(name)
    }
}

/// A catalog value replaced by the value stored in the file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    /// Field that was replaced
    pub field: ScannerField,
    /// Catalog default
    pub catalog: f64,
    /// Value read from the file
    pub measured: f64,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "default {} is {}, while the RDF file says {}; using the RDF value",
            self.field, self.catalog, self.measured
        )
    }
}

/// Scanner field that later processing needs but neither catalog nor file provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDefault {
    /// Default bin size; needed by FBP
    BinSize,
    /// Default number of arc-corrected bins; needed by FBP
    ArcCorrectedBins,
    /// Energy resolution; needed by scatter estimation
    EnergyResolution,
}

impl fmt::Display for MissingDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            MissingDefault::BinSize => "default bin-size is not set. This will create trouble for FBP etc",
            MissingDefault::ArcCorrectedBins => {
                "default num_arccorrected bins is not set. This will create trouble for FBP etc"
            }
            MissingDefault::EnergyResolution => {
                "energy resolution is not set. This will create trouble for scatter estimation"
            }
        };
        f.write_str(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_within_tolerance_keeps_catalog() {
        let r = reconcile(326.4, 326.45, 0.1);
        assert_eq!(r.value, 326.4);
        assert!(!r.overridden);
    }

    #[test]
    fn test_beyond_tolerance_takes_measured() {
        let r = reconcile(326.4, 311.8, 0.1);
        assert_eq!(r.value, 311.8);
        assert!(r.overridden);
    }

    #[test]
    fn test_exact_counts() {
        assert!(!reconcile_exact(351u32, 351).overridden);
        let r = reconcile_exact(351u32, 29);
        assert!(r.overridden);
        assert_eq!(r.value, 29);
    }

    #[test]
    fn test_adjustment_message() {
        let adjustment = Adjustment {
            field: ScannerField::TimingResolution,
            catalog: 390.0,
            measured: 375.0,
        };
        let message = adjustment.to_string();
        assert!(message.contains("timing resolution"));
        assert!(message.contains("390"));
        assert!(message.contains("375"));
    }

    proptest! {
        #[test]
        fn prop_override_iff_beyond_tolerance(
            catalog in -1000.0f32..1000.0,
            measured in -1000.0f32..1000.0,
        ) {
            let r = reconcile(catalog, measured, 0.1);
            let beyond = (catalog - measured).abs() > 0.1;
            prop_assert_eq!(r.overridden, beyond);
            prop_assert_eq!(r.value, if beyond { measured } else { catalog });
        }
    }
}
