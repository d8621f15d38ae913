//! End-to-end tests over RDF containers stored as JSON dumps
//!
//! These tests verify:
//! 1. Opening and classifying each file kind from disk
//! 2. The list-mode, sinogram, geometry and normalisation read paths
//! 3. Failure modes surfaced at open time and at read time
//! 4. Configuration loaded from TOML changing scanner reconciliation

use std::path::{Path, PathBuf};

use petrdf::config::Config;
use petrdf::container::MemoryContainer;
use petrdf::fixtures;
use petrdf::inspect::inspect_file;
use petrdf::rdf::constants::{header, probe, system};
use petrdf::rdf::{check_file, FileKind, GeoDims, RdfError};
use petrdf::reader::RdfFile;
use petrdf::region::Selection;
use petrdf::scanner::ScannerField;
use tempfile::{tempdir, TempDir};

fn write_dump(dir: &TempDir, name: &str, container: &MemoryContainer) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, container.to_json().unwrap()).unwrap();
    path
}

fn open(path: &Path) -> RdfFile {
    RdfFile::open(path).unwrap()
}

#[test]
fn test_list_mode_end_to_end() {
    let dir = tempdir().unwrap();
    let path = write_dump(&dir, "list.json", &fixtures::list_mode_file(1000));

    let mut file = open(&path);
    assert!(file.is_list_file());
    assert!(!file.is_sino_file());
    assert!(!file.is_geo_file());
    assert_eq!(file.projection_geometry().tof_mash_factor, 1);

    let region = file.initialise_listmode_data().unwrap().unwrap();
    assert_eq!(file.num_singles_samples(), 1000);
    assert_eq!(region.record.signature_size, 6);
    assert_eq!(region.record.max_record_size, 16);

    let mut buffer = vec![0u8; region.size()];
    file.read_list_data(&region, 0, &mut buffer).unwrap();
    assert_eq!(buffer[..4], [0, 1, 2, 3]);

    let singles = file.initialise_singles_data().unwrap().unwrap();
    let sample = file
        .read_singles(&singles, 2, &Selection::full(singles.region.rank()))
        .unwrap();
    assert_eq!(sample.shape(), &[2, 4]);
    assert_eq!(sample[[1, 0]], 207);
}

#[test]
fn test_sinogram_end_to_end() {
    let dir = tempdir().unwrap();
    let path = write_dump(&dir, "sino.json", &fixtures::sinogram_file());

    let mut file = open(&path);
    assert!(file.is_sino_file());
    assert_eq!(file.projection_geometry().num_tangential_poss, 357);
    assert_eq!(file.projection_geometry().tof_mash_factor, 0);

    let region = file.initialise_proj_data(1).unwrap().unwrap();
    let view = file
        .read_sinogram(&region, &Selection::full(region.rank()))
        .unwrap();
    assert_eq!(view.dim(), (2, 3, 4));
    // last on-disk axis flipped and moved first
    assert_eq!(view[[0, 0, 1]], 7);
    assert_eq!(view[[1, 2, 3]], 22);

    let err = file
        .read_sinogram(&region, &Selection::new(vec![0, 1, 0], vec![1, 1, 1]))
        .unwrap_err();
    assert!(matches!(err, RdfError::UnsupportedSelection(_)));

    let err = file.initialise_proj_data(0).unwrap_err();
    assert!(matches!(err, RdfError::InvalidIndex { .. }));
}

#[test]
fn test_normalisation_end_to_end() {
    let dir = tempdir().unwrap();
    let path = write_dump(&dir, "norm.json", &fixtures::normalisation_file());

    let mut file = open(&path);
    assert!(file.is_norm_file());
    assert!(file.is_geo_file());
    assert_eq!(file.classification().kind, FileKind::Normalisation);
    assert_eq!(file.geo_dimensionality(), Some(GeoDims::ThreeD));

    let efficiency = file.initialise_efficiency_factors().unwrap().unwrap();
    assert_eq!(efficiency.extent, vec![2, 4]);
    let factors = file
        .read_efficiency_factors(&efficiency, &Selection::full(2))
        .unwrap();
    assert_eq!(factors[[0, 0]], 1.5);
    assert_eq!(factors[[1, 3]], 4.0);

    let slice = file.initialise_geo_factors_data(2).unwrap().unwrap();
    let geo = file
        .read_geometric_factors(&slice, &Selection::full(2))
        .unwrap();
    assert_eq!(geo[[2, 0]], 1011);
}

#[test]
fn test_open_failures() {
    let dir = tempdir().unwrap();

    let compressed = fixtures::list_mode_file(1000).with_u32(probe::IS_LIST_COMPRESSED, 1);
    assert!(matches!(
        check_file(&compressed).unwrap_err(),
        RdfError::UnsupportedEncoding(_)
    ));
    let path = write_dump(&dir, "compressed.json", &compressed);
    assert!(matches!(
        RdfFile::open(&path).unwrap_err(),
        RdfError::UnsupportedEncoding(_)
    ));

    let unnamed = fixtures::sinogram_file().with_string(header::SCANNER_DESC, "");
    let path = write_dump(&dir, "unnamed.json", &unnamed);
    assert!(matches!(
        RdfFile::open(&path).unwrap_err(),
        RdfError::UnknownScanner(_)
    ));

    let version8 = fixtures::geometry_file().with_u32(header::MAJOR_VERSION, 8);
    let path = write_dump(&dir, "v8.json", &version8);
    assert!(matches!(
        RdfFile::open(&path).unwrap_err(),
        RdfError::UnsupportedVersion { found: 8, supported: 9 }
    ));

    let foreign = fixtures::geometry_file().with_string(header::MANUFACTURER, "GE Medical Systems");
    let path = write_dump(&dir, "foreign.json", &foreign);
    assert!(!RdfFile::probe(&path));
    assert!(RdfFile::open(&path).is_err());
}

#[test]
fn test_config_file_changes_reconciliation() {
    let dir = tempdir().unwrap();
    let container = fixtures::sinogram_file().with_f32(system::TIMING_RESOLUTION, 390.5);
    let path = write_dump(&dir, "sino.json", &container);

    let file = open(&path);
    let adjusted: Vec<_> = file
        .resolved_scanner()
        .adjustments
        .iter()
        .map(|a| a.field)
        .collect();
    assert_eq!(adjusted, vec![ScannerField::TimingResolution]);
    assert_eq!(file.scanner().timing_resolution, 390.5);

    let config_path = dir.path().join("petrdf.toml");
    std::fs::write(&config_path, "[reader]\ntolerance = 1.0\n").unwrap();
    let config = Config::from_file(&config_path).unwrap();

    let file = RdfFile::open_with_config(&path, config.reader).unwrap();
    assert!(file.resolved_scanner().adjustments.is_empty());
    assert_eq!(file.scanner().timing_resolution, 390.0);
}

#[test]
fn test_inspection_matches_open() {
    let dir = tempdir().unwrap();
    let good = write_dump(&dir, "geo.json", &fixtures::geometry_file());
    let report = inspect_file(&good, &Config::default().reader).unwrap();
    assert!(!report.has_failures(), "{}", report);

    let bad = write_dump(
        &dir,
        "bad.json",
        &fixtures::geometry_file().with_string(header::SCANNER_DESC, "Prototype"),
    );
    let report = inspect_file(&bad, &Config::default().reader).unwrap();
    assert!(report.has_failures());
    assert!(RdfFile::open(&bad).is_err());
}
