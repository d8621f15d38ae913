use super::*;
use crate::container::{ContainerError, MemoryContainer};
use crate::fixtures::{self, EFFICIENCY_EXTENT, GEO_SLICE_EXTENT, SINGLES_EXTENT};
use crate::rdf::check_file;
use proptest::prelude::*;

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

const SIGNA_VIEWS: u32 = 224;

fn classified(container: &MemoryContainer) -> Classification {
    check_file(container).expect("fixture classifies")
}

#[test]
fn test_listmode_region() -> TestResult {
    let container = fixtures::list_mode_file(1000);
    let region = initialise_listmode(&container, &classified(&container))?.ok_or("no layout")?;

    assert_eq!(region.num_singles_samples, 1000);
    assert_eq!(region.size(), 64);
    assert_eq!(region.record, RecordLayout::RDF9);
    assert_eq!(region.record.signature_size, 6);
    assert_eq!(region.record.max_record_size, 16);

    let mut buffer = [0u8; 5];
    read_list_data(&container, &region, 10, &mut buffer)?;
    assert_eq!(buffer, [10, 11, 12, 13, 14]);
    Ok(())
}

#[test]
fn test_listmode_read_past_end() -> TestResult {
    let container = fixtures::list_mode_file(1);
    let region = initialise_listmode(&container, &classified(&container))?.ok_or("no layout")?;

    let mut buffer = [0u8; 8];
    let err = read_list_data(&container, &region, 60, &mut buffer).unwrap_err();
    assert!(matches!(
        err,
        RdfError::Container(ContainerError::OutOfBounds { end: 68, extent: 64, .. })
    ));

    read_list_data(&container, &region, 64, &mut [])?;

    let err = read_list_data(&container, &region, usize::MAX - 1, &mut buffer[..4]).unwrap_err();
    assert!(matches!(
        err,
        RdfError::Container(ContainerError::OutOfBounds { end: usize::MAX, extent: 64, .. })
    ));
    Ok(())
}

#[test]
fn test_zero_valid_samples() {
    let container = fixtures::list_mode_file(0);
    let err = initialise_listmode(&container, &classified(&container)).unwrap_err();
    assert!(matches!(err, RdfError::EmptyDataset(_)));

    let err = initialise_singles(&container, &classified(&container)).unwrap_err();
    assert!(matches!(err, RdfError::EmptyDataset(_)));
}

#[test]
fn test_initialise_checks_file_kind() {
    let sino = fixtures::sinogram_file();
    let err = initialise_listmode(&sino, &classified(&sino)).unwrap_err();
    assert!(matches!(err, RdfError::WrongFileKind { expected: "list-mode" }));

    let list = fixtures::list_mode_file(3);
    let err = initialise_sinogram(&list, &classified(&list), SIGNA_VIEWS, 1).unwrap_err();
    assert!(matches!(err, RdfError::WrongFileKind { .. }));

    let geo = fixtures::geometry_file();
    assert!(initialise_singles(&geo, &classified(&geo)).is_err());
    assert!(initialise_efficiency(&geo, &classified(&geo)).is_err());
    assert!(initialise_geo_factors(&list, &classified(&list), 1).is_err());
}

#[test]
fn test_other_revisions_have_no_layout() -> TestResult {
    let container = fixtures::list_mode_file(3);
    let mut classification = classified(&container);
    classification.format_version = 10;

    assert!(initialise_listmode(&container, &classification)?.is_none());
    assert!(initialise_singles(&container, &classification)?.is_none());
    Ok(())
}

#[test]
fn test_sinogram_view_range() {
    let container = fixtures::sinogram_file();
    let classification = classified(&container);
    for view in [0, SIGNA_VIEWS + 1] {
        let err = initialise_sinogram(&container, &classification, SIGNA_VIEWS, view).unwrap_err();
        assert!(matches!(err, RdfError::InvalidIndex { what: "view", max: 224, .. }));
    }
}

#[test]
fn test_compressed_sinogram_is_rejected() {
    let container = fixtures::sinogram_file().with_u32(sorter::SEGMENT2_COMPRESSED_SIZE, 4096);
    let err = initialise_sinogram(&container, &classified(&container), SIGNA_VIEWS, 1).unwrap_err();
    assert!(matches!(err, RdfError::UnsupportedEncoding(_)));
}

#[test]
fn test_sinogram_path_follows_tof_bins() -> TestResult {
    let container = fixtures::sinogram_file();
    let region = initialise_sinogram(&container, &classified(&container), SIGNA_VIEWS, 2)?
        .ok_or("no layout")?;
    assert_eq!(region.path, "/SegmentData/Segment2/3D_TOF_Sinogram/view2");
    assert_eq!(region.extent, vec![4, 3, 2]);

    let container = container
        .with_u32(sorter::NUM_TOF_BINS, 1)
        .with_u8_array("/SegmentData/Segment2/3D_Sinogram/view2", &[4, 3], vec![0; 12]);
    let region = initialise_sinogram(&container, &classified(&container), SIGNA_VIEWS, 2)?
        .ok_or("no layout")?;
    assert_eq!(region.path, "/SegmentData/Segment2/3D_Sinogram/view2");
    assert_eq!(region.extent, vec![4, 3]);
    Ok(())
}

#[test]
fn test_read_sinogram_permutes_and_flips() -> TestResult {
    let container = fixtures::sinogram_file();
    let region = initialise_sinogram(&container, &classified(&container), SIGNA_VIEWS, 1)?
        .ok_or("no layout")?;
    let out = read_sinogram(&container, &region, &Selection::full(3))?;

    // raw[i][j][k] = i*6 + j*2 + k with extent (4, 3, 2)
    assert_eq!(out.dim(), (2, 3, 4));
    for k in 0..2 {
        for j in 0..3 {
            for i in 0..4 {
                assert_eq!(out[[k, j, i]] as usize, i * 6 + j * 2 + (1 - k));
            }
        }
    }
    Ok(())
}

#[test]
fn test_read_sinogram_rejects_offset() -> TestResult {
    let container = fixtures::sinogram_file();
    let region = initialise_sinogram(&container, &classified(&container), SIGNA_VIEWS, 1)?
        .ok_or("no layout")?;

    let selection = Selection::new(vec![0, 1, 0], vec![1, 1, 1]);
    let err = read_sinogram(&container, &region, &selection).unwrap_err();
    assert!(matches!(err, RdfError::UnsupportedSelection(_)));

    let selection = Selection::new(vec![0, 0, 0], vec![1, 2, 1]);
    let err = read_sinogram(&container, &region, &selection).unwrap_err();
    assert!(matches!(err, RdfError::UnsupportedSelection(_)));

    let err = read_sinogram(&container, &region, &Selection::full(2)).unwrap_err();
    assert!(matches!(err, RdfError::UnsupportedSelection(_)));
    Ok(())
}

#[test]
fn test_region_kind_is_checked() -> TestResult {
    let container = fixtures::normalisation_file();
    let classification = classified(&container);
    let geo = initialise_geo_factors(&container, &classification, 1)?.ok_or("no layout")?;

    let err = read_efficiency_factors(&container, &geo, &Selection::full(2)).unwrap_err();
    assert!(matches!(err, RdfError::RegionMismatch(_)));
    Ok(())
}

#[test]
fn test_read_geometric_factors() -> TestResult {
    let container = fixtures::geometry_file();
    let region = initialise_geo_factors(&container, &classified(&container), 2)?
        .ok_or("no layout")?;
    assert_eq!(region.extent, GEO_SLICE_EXTENT.to_vec());

    let out = read_geometric_factors(&container, &region, &Selection::full(2))?;
    assert_eq!(out.shape(), &[3, 4]);
    assert_eq!(out[[0, 0]], 1003);
    assert_eq!(out[[2, 3]], 1008);
    Ok(())
}

#[test]
fn test_missing_geo_slice() {
    let container = fixtures::geometry_file();
    let classification = classified(&container);
    let err = initialise_geo_factors(&container, &classification, 9).unwrap_err();
    assert!(matches!(err, RdfError::Container(ContainerError::NotFound(_))));

    let err = initialise_geo_factors(&container, &classification, 0).unwrap_err();
    assert!(matches!(err, RdfError::InvalidIndex { index: 0, .. }));
}

#[test]
fn test_efficiency_reads_first_half() -> TestResult {
    let container = fixtures::normalisation_file();
    let region = initialise_efficiency(&container, &classified(&container))?.ok_or("no layout")?;
    assert_eq!(region.extent, vec![EFFICIENCY_EXTENT[0], EFFICIENCY_EXTENT[1] / 2]);

    // raw[a][t] = (a*8 + t) * 0.5, t < 4
    let out = read_efficiency_factors(&container, &region, &Selection::full(2))?;
    assert_eq!(out.shape(), &[2, 4]);
    assert_eq!(out[[0, 0]], 1.5);
    assert_eq!(out[[0, 3]], 0.0);
    assert_eq!(out[[1, 0]], 5.5);
    Ok(())
}

#[test]
fn test_read_singles() -> TestResult {
    let container = fixtures::sinogram_file();
    let region = initialise_singles(&container, &classified(&container))?.ok_or("no layout")?;
    assert_eq!(region.num_samples, 3);
    assert_eq!(region.region.extent, SINGLES_EXTENT.to_vec());

    // sample n holds 100*n + (a*4 + t)
    let out = read_singles(&container, &region, 3, &Selection::full(2))?;
    assert_eq!(out[[0, 0]], 303);
    assert_eq!(out[[1, 3]], 304);

    for sample in [0, 4] {
        let err = read_singles(&container, &region, sample, &Selection::full(2)).unwrap_err();
        assert!(matches!(err, RdfError::InvalidIndex { what: "singles sample", .. }));
    }
    Ok(())
}

#[test]
fn test_rank_limits() {
    let container = fixtures::geometry_file().with_u32_array(
        "/SegmentData/Segment4/3D_Norm_Correction/slice3",
        &[1, 1, 1, 1, 1, 2],
        vec![1, 2],
    );
    let err = initialise_geo_factors(&container, &classified(&container), 3).unwrap_err();
    assert!(matches!(err, RdfError::DatasetRank { rank: 6, .. }));
}

#[test]
fn test_rank_two_sinogram_reverses_last_axis() -> TestResult {
    // raw (NX = 3, NY = 2): [[1, 2], [3, 4], [5, 6]]
    let out = sinogram_to_logical(vec![1, 2, 3, 4, 5, 6], &[3, 2])?;
    assert_eq!(out.dim(), (1, 2, 3));
    assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6, 1, 3, 5]);
    for j in 0..2 {
        for i in 0..3 {
            assert_eq!(out[[0, j, i]], (i * 2 + (1 - j) + 1) as u8);
        }
    }
    Ok(())
}

fn extent_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..5, 1..4)
}

proptest! {
    #[test]
    fn prop_last_axis_is_reversed(extent in extent_strategy()) {
        let len: usize = extent.iter().product();
        let raw: Vec<u32> = (0..len as u32).collect();
        let out = reverse_last_axis(raw.clone(), &extent).unwrap();
        let n = *extent.last().unwrap();

        prop_assert_eq!(out.shape(), extent.as_slice());
        for (flat, value) in out.iter().enumerate() {
            let j = flat % n;
            let row = flat - j;
            prop_assert_eq!(*value, raw[row + (n - 1 - j)]);
        }
    }

    #[test]
    fn prop_sinogram_transform(nx in 1usize..5, ny in 1usize..5, nz in 1usize..5) {
        let raw: Vec<u8> = (0..nx * ny * nz).map(|v| v as u8).collect();
        let out = sinogram_to_logical(raw.clone(), &[nx, ny, nz]).unwrap();

        prop_assert_eq!(out.dim(), (nz, ny, nx));
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    prop_assert_eq!(out[[k, j, i]], raw[(i * ny + j) * nz + (nz - 1 - k)]);
                }
            }
        }
    }

    #[test]
    fn prop_rank_two_sinogram_transform(nx in 1usize..6, ny in 1usize..6) {
        let raw: Vec<u8> = (0..nx * ny).map(|v| v as u8).collect();
        let out = sinogram_to_logical(raw.clone(), &[nx, ny]).unwrap();

        prop_assert_eq!(out.dim(), (1, ny, nx));
        for j in 0..ny {
            for i in 0..nx {
                prop_assert_eq!(out[[0, j, i]], raw[i * ny + (ny - 1 - j)]);
            }
        }
    }
}
