use super::*;
use crate::fixtures;
use crate::rdf::constants::{acquisition, header};

struct NegativeHalfLife;

impl RadionuclideLookup for NegativeHalfLife {
    fn lookup(&self, name: &str) -> Option<Radionuclide> {
        Some(Radionuclide {
            name: name.to_string(),
            energy_kev: 0.0,
            branching_ratio: 0.0,
            half_life_secs: -1.0,
        })
    }
}

#[test]
fn test_exam_info_from_fixture() -> Result<()> {
    let exam = build_exam_info(&fixtures::list_mode_file(10), &BuiltinRadionuclides)?;

    assert_eq!(exam.patient_position.orientation, Orientation::HeadIn);
    assert_eq!(exam.patient_position.rotation, Rotation::Supine);
    assert_eq!(exam.patient_position.code(), "HFS");
    assert_eq!(exam.energy_window.low_kev, 425.0);
    assert_eq!(exam.energy_window.high_kev, 650.0);
    assert_eq!(exam.scan_start_secs, f64::from(fixtures::SCAN_START));
    assert_eq!(
        exam.time_frames,
        vec![TimeFrame {
            start_secs: 30.0,
            end_secs: 630.0
        }]
    );
    assert_eq!(exam.time_frames[0].duration_secs(), 600.0);
    assert_eq!(exam.radionuclide.name, "^18^Fluorine");
    Ok(())
}

#[test]
fn test_scan_start_as_timestamp() -> Result<()> {
    let exam = build_exam_info(&fixtures::list_mode_file(10), &BuiltinRadionuclides)?;
    let start = exam.scan_start().expect("valid timestamp");
    assert_eq!(start.to_rfc3339(), "2020-09-13T12:26:40+00:00");
    Ok(())
}

#[test]
fn test_fractional_frame_duration() -> Result<()> {
    let container = fixtures::list_mode_file(10).with_u32(acquisition::FRAME_DURATION, 1500);
    let exam = build_exam_info(&container, &BuiltinRadionuclides)?;
    assert_eq!(exam.time_frames[0].end_secs, 31.5);
    Ok(())
}

#[test]
fn test_unknown_patient_codes() -> Result<()> {
    let container = fixtures::list_mode_file(10)
        .with_u32(acquisition::PATIENT_ENTRY, 7)
        .with_u32(acquisition::PATIENT_POSITION, 3);
    let exam = build_exam_info(&container, &BuiltinRadionuclides)?;
    assert_eq!(exam.patient_position.orientation, Orientation::Unknown);
    assert_eq!(exam.patient_position.rotation, Rotation::Right);
    assert_eq!(exam.patient_position.to_string(), "unknown");
    Ok(())
}

#[test]
fn test_position_codes() {
    let cases = [
        ((0, 1), "HFP"),
        ((0, 2), "HFDL"),
        ((1, 0), "FFS"),
        ((1, 3), "FFDR"),
        ((1, 9), "unknown"),
    ];
    for ((entry, position), code) in cases {
        assert_eq!(PatientPosition::from_codes(entry, position).code(), code);
    }
}

#[test]
fn test_radionuclide_fallback_on_miss() -> Result<()> {
    let container = fixtures::list_mode_file(10).with_string(header::RADIONUCLIDE_NAME, "Tb-152");
    let exam = build_exam_info(&container, &BuiltinRadionuclides)?;
    assert_eq!(exam.radionuclide.name, "Tb-152");
    assert_eq!(exam.radionuclide.energy_kev, 511.0);
    assert_eq!(exam.radionuclide.branching_ratio, 0.967);
    assert_eq!(exam.radionuclide.half_life_secs, 6586.2);
    Ok(())
}

#[test]
fn test_radionuclide_fallback_on_negative_half_life() -> Result<()> {
    let exam = build_exam_info(&fixtures::list_mode_file(10), &NegativeHalfLife)?;
    assert_eq!(exam.radionuclide.name, "F-18");
    assert_eq!(exam.radionuclide.half_life_secs, 6586.2);
    Ok(())
}

#[test]
fn test_builtin_radionuclide_names() {
    let table = BuiltinRadionuclides;
    for name in ["F-18", "f18", "18F", "^18^Fluorine", "Fluorine-18"] {
        assert_eq!(
            table.lookup(name).map(|r| r.name),
            Some("^18^Fluorine".to_string()),
            "{}",
            name
        );
    }
    assert!(table.lookup("Ga-68").is_some());
    assert!(table.lookup("Tc-99m").is_none());
}
