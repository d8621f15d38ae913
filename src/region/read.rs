use ndarray::{Array3, ArrayD};

use crate::container::{Container, Hyperslab};
use crate::rdf::{RdfError, Result};

use super::transform::{reverse_last_axis, sinogram_to_logical};
use super::{ListModeRegion, ReadKind, Region, Selection, SinglesRegion};

fn full_region(region: &Region, kind: ReadKind, selection: &Selection) -> Result<Hyperslab> {
    region.expect_kind(kind)?;
    selection.check(region)?;
    Ok(Hyperslab::full(&region.extent))
}

/// Copy `buffer.len()` raw bytes of the list-mode stream starting at `offset`
///
/// Records are not interpreted.
pub fn read_list_data(
    container: &dyn Container,
    region: &ListModeRegion,
    offset: usize,
    buffer: &mut [u8],
) -> Result<()> {
    region.region.expect_kind(ReadKind::ListMode)?;
    if buffer.is_empty() {
        return Ok(());
    }

    let slab = Hyperslab::new(vec![offset], vec![buffer.len()]);
    let bytes = container.read_u8_slab(&region.region.path, &slab)?;
    if bytes.len() != buffer.len() {
        return Err(RdfError::RegionMismatch(format!(
            "read {} list-mode bytes into a {}-byte buffer",
            bytes.len(),
            buffer.len()
        )));
    }
    buffer.copy_from_slice(&bytes);
    Ok(())
}

/// Read a whole sinogram view in logical `(NZ, NY, NX)` order
pub fn read_sinogram(
    container: &dyn Container,
    region: &Region,
    selection: &Selection,
) -> Result<Array3<u8>> {
    let slab = full_region(region, ReadKind::Sinogram, selection)?;
    let raw = container.read_u8_slab(&region.path, &slab)?;
    sinogram_to_logical(raw, &region.extent)
}

/// Read a whole geometric correction slice, tangential axis reversed
pub fn read_geometric_factors(
    container: &dyn Container,
    region: &Region,
    selection: &Selection,
) -> Result<ArrayD<u32>> {
    let slab = full_region(region, ReadKind::Geometry, selection)?;
    let raw = container.read_u32_slab(&region.path, &slab)?;
    reverse_last_axis(raw, &region.extent)
}

/// Read the crystal efficiency factors, tangential axis reversed
pub fn read_efficiency_factors(
    container: &dyn Container,
    region: &Region,
    selection: &Selection,
) -> Result<ArrayD<f32>> {
    let slab = full_region(region, ReadKind::Efficiency, selection)?;
    let raw = container.read_f32_slab(&region.path, &slab)?;
    reverse_last_axis(raw, &region.extent)
}

/// Read one singles sample (1-based), tangential axis reversed
pub fn read_singles(
    container: &dyn Container,
    region: &SinglesRegion,
    sample: u32,
    selection: &Selection,
) -> Result<ArrayD<u32>> {
    let slab = full_region(&region.region, ReadKind::Singles, selection)?;
    if sample == 0 || sample > region.num_samples {
        return Err(RdfError::InvalidIndex {
            what: "singles sample",
            index: sample,
            max: region.num_samples,
        });
    }
    let raw = container.read_u32_slab(&region.sample_path(sample), &slab)?;
    reverse_last_axis(raw, &region.region.extent)
}
