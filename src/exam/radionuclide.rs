use serde::{Deserialize, Serialize};

/// Decay properties of a PET tracer isotope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radionuclide {
    /// Isotope name as stored in the file or the lookup table
    pub name: String,
    /// Photon energy (keV)
    pub energy_kev: f32,
    /// Fraction of decays that emit a positron
    pub branching_ratio: f32,
    /// Half-life (s)
    pub half_life_secs: f32,
}

/// Radionuclide properties by name
pub trait RadionuclideLookup {
    /// Properties of `name`, or `None` if the isotope is unknown
    fn lookup(&self, name: &str) -> Option<Radionuclide>;
}

/// Common PET isotopes
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRadionuclides;

// name, aliases, branching ratio, half-life (s)
const ISOTOPES: &[(&str, &[&str], f32, f32)] = &[
    ("^18^Fluorine", &["F-18", "F18", "18F", "Fluorine-18"], 0.9686, 6584.04),
    ("^11^Carbon", &["C-11", "C11", "11C", "Carbon-11"], 0.9976, 1221.66),
    ("^15^Oxygen", &["O-15", "O15", "15O", "Oxygen-15"], 0.9990, 122.24),
    ("^13^Nitrogen", &["N-13", "N13", "13N", "Nitrogen-13"], 0.9980, 597.9),
    ("^68^Gallium", &["Ga-68", "Ga68", "68Ga", "Gallium-68"], 0.8894, 4062.6),
    ("^82^Rubidium", &["Rb-82", "Rb82", "82Rb", "Rubidium-82"], 0.9550, 76.38),
    ("^89^Zirconium", &["Zr-89", "Zr89", "89Zr", "Zirconium-89"], 0.2274, 282_276.0),
    ("^64^Copper", &["Cu-64", "Cu64", "64Cu", "Copper-64"], 0.1752, 45_721.1),
];

/// Upper-case and drop whitespace, `-`, `_` and `^`
fn normalise(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '^'))
        .flat_map(char::to_uppercase)
        .collect()
}

impl RadionuclideLookup for BuiltinRadionuclides {
    fn lookup(&self, name: &str) -> Option<Radionuclide> {
        let wanted = normalise(name);
        ISOTOPES
            .iter()
            .find(|(canonical, aliases, _, _)| {
                normalise(canonical) == wanted || aliases.iter().any(|a| normalise(a) == wanted)
            })
            .map(|&(canonical, _, branching_ratio, half_life_secs)| Radionuclide {
                name: canonical.to_string(),
                energy_kev: 511.0,
                branching_ratio,
                half_life_secs,
            })
    }
}
