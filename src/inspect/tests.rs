use super::*;
use crate::container::MemoryContainer;
use crate::fixtures;
use crate::rdf::constants::{header, probe, system};
use crate::scanner::{Adjustment, MissingDefault, ScannerField};
use tempfile::tempdir;

fn inspect(container: &MemoryContainer) -> InspectionReport {
    let mut report = InspectionReport::new("fixture");
    inspect_container(container, &ReaderConfig::default(), &mut report)
        .expect("inspection runs");
    report
}

fn subjects(report: &InspectionReport, stage: Stage) -> Vec<&str> {
    report.stage(stage).map(|f| f.subject.as_str()).collect()
}

fn stages(report: &InspectionReport) -> Vec<Stage> {
    let mut stages: Vec<_> = report.findings.iter().map(|f| f.stage).collect();
    stages.dedup();
    stages
}

#[test]
fn test_report_groups_findings_by_stage() {
    let mut report = InspectionReport::new("scan.h5");
    report.passed(Stage::Signature, GE_SIGNATURE);
    report.push(
        Stage::Scanner,
        "timing resolution",
        Outcome::Adjusted(Adjustment {
            field: ScannerField::TimingResolution,
            catalog: 390.0,
            measured: 500.0,
        }),
    );
    report.push(Stage::Scanner, "defaults", Outcome::MissingDefault(MissingDefault::BinSize));
    report.passed(Stage::Container, "opens");

    let output = format!("{}", report);
    let container = output.find("\nContainer\n").expect("container heading");
    let signature = output.find("\nSignature\n").expect("signature heading");
    let scanner = output.find("\nScanner\n").expect("scanner heading");
    assert!(container < signature && signature < scanner);
    assert!(!output.contains("\nPayload\n"));
    assert!(output.contains("⚠ timing resolution: default timing resolution is 390"));
    assert!(output.contains("⚠ defaults: default bin-size is not set"));
    assert!(output.ends_with("Readable with 2 warnings\n"));
}

#[test]
fn test_report_names_the_stopping_stage() {
    let mut report = InspectionReport::new("scan.h5");
    report.passed(Stage::Container, "opens");
    report.failed(Stage::Version, "major revision", "found 8");

    assert_eq!(report.stopped_at(), Some(Stage::Version));
    assert_eq!(report.count(Severity::Ok), 1);
    assert_eq!(report.count(Severity::Failure), 1);
    let output = report.to_string();
    assert!(output.contains("✗ major revision: found 8"));
    assert!(output.ends_with("Not readable: stopped at Format version\n"));
}

#[test]
fn test_sinogram_file_passes_with_tof_caveat() {
    let report = inspect(&fixtures::sinogram_file());

    assert!(!report.has_failures(), "{}", report);
    assert_eq!(report.count(Severity::Warning), 1);
    let geometry: Vec<_> = report.stage(Stage::Geometry).collect();
    assert_eq!(geometry.len(), 1);
    assert!(matches!(&geometry[0].outcome, Outcome::Caveat(note) if note.contains("non-TOF")));

    assert_eq!(subjects(&report, Stage::Classification), vec!["sinogram"]);
    let payload = subjects(&report, Stage::Payload);
    assert!(payload.iter().any(|n| n.starts_with("Sinogram view 1: ")));
    assert!(payload.iter().any(|n| n.starts_with("Singles: 3 samples")));
    assert_eq!(
        stages(&report),
        vec![
            Stage::Signature,
            Stage::Version,
            Stage::Classification,
            Stage::Scanner,
            Stage::Geometry,
            Stage::Exam,
            Stage::Payload
        ]
    );
}

#[test]
fn test_normalisation_file_lists_payloads() {
    let report = inspect(&fixtures::normalisation_file());

    assert_eq!(
        subjects(&report, Stage::Classification),
        vec!["normalisation (3-D geometry)"]
    );
    let payload = subjects(&report, Stage::Payload);
    assert!(payload.iter().any(|n| n.starts_with("Crystal efficiencies: ")));
    assert!(payload.iter().any(|n| n.starts_with("Geometric correction slice 1: ")));
    assert!(!report.has_failures(), "{}", report);
}

#[test]
fn test_adjustments_are_structured() {
    let container = fixtures::list_mode_file(5).with_f32(system::TIMING_RESOLUTION, 500.0);
    let report = inspect(&container);

    let adjustments: Vec<_> = report.adjustments().collect();
    assert_eq!(adjustments.len(), 1);
    assert_eq!(adjustments[0].field, ScannerField::TimingResolution);
    assert_eq!(adjustments[0].measured, 500.0);
    assert!(subjects(&report, Stage::Scanner).contains(&"timing resolution"));
    assert_eq!(report.missing_defaults().count(), 0);
    assert!(!report.has_failures());
}

#[test]
fn test_stops_at_first_structural_failure() {
    let report = inspect(&MemoryContainer::new().with_string(header::MANUFACTURER, "SIEMENS"));
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.stopped_at(), Some(Stage::Signature));

    let compressed = fixtures::list_mode_file(5).with_u32(probe::IS_LIST_COMPRESSED, 1);
    let report = inspect(&compressed);
    assert_eq!(
        stages(&report),
        vec![Stage::Signature, Stage::Version, Stage::Classification]
    );
    assert_eq!(report.stopped_at(), Some(Stage::Classification));
}

#[test]
fn test_unknown_scanner_skips_geometry() {
    let container = fixtures::geometry_file().with_string(header::SCANNER_DESC, "Prototype");
    let report = inspect(&container);

    let scanner: Vec<_> = report.stage(Stage::Scanner).collect();
    assert_eq!(scanner.len(), 1);
    assert!(matches!(&scanner[0].outcome, Outcome::Failed(msg) if msg.contains("Prototype")));
    assert_eq!(report.stopped_at(), Some(Stage::Scanner));
    assert_eq!(report.stage(Stage::Geometry).count(), 0);
}

#[test]
fn test_report_serialises_outcomes() -> Result<()> {
    let mut report = InspectionReport::new("scan.h5");
    report.push(Stage::Scanner, "defaults", Outcome::MissingDefault(MissingDefault::EnergyResolution));
    report.passed(Stage::Payload, "Singles");

    let value = serde_json::to_value(&report)?;
    let findings = &value["findings"];
    assert_eq!(findings[0]["stage"], "scanner");
    assert_eq!(findings[0]["outcome"], "missing_default");
    assert_eq!(findings[0]["detail"], "energy_resolution");
    assert_eq!(findings[1]["outcome"], "passed");
    Ok(())
}

#[test]
fn test_inspect_file_on_disk() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("list.json");
    std::fs::write(&path, fixtures::list_mode_file(12).to_json()?)?;

    let report = inspect_file(&path, &ReaderConfig::default())?;
    assert_eq!(report.findings[0].stage, Stage::Container);
    assert!(!report.has_failures(), "{}", report);

    let report = inspect_file(&dir.path().join("missing.h5"), &ReaderConfig::default())?;
    assert_eq!(report.stopped_at(), Some(Stage::Container));
    assert_eq!(report.findings.len(), 1);
    Ok(())
}
