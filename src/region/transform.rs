use ndarray::{Array2, Array3, ArrayD, Axis, IxDyn};

use crate::rdf::{RdfError, Result};

fn shape_error(e: ndarray::ShapeError) -> RdfError {
    RdfError::RegionMismatch(format!("buffer does not match region extent: {}", e))
}

/// Arrange a row-major buffer as `extent` and reverse its last axis
///
/// `logical[..., j] = raw[..., N-1-j]`; RDF stores the tangential axis reversed.
///
/// ```rust
/// use petrdf::region::reverse_last_axis;
///
/// let logical = reverse_last_axis(vec![1, 2, 3, 4, 5, 6], &[2, 3])?;
/// assert_eq!(logical.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1, 6, 5, 4]);
/// # Ok::<(), petrdf::rdf::RdfError>(())
/// ```
pub fn reverse_last_axis<T: Clone>(raw: Vec<T>, extent: &[usize]) -> Result<ArrayD<T>> {
    let mut array = ArrayD::from_shape_vec(IxDyn(extent), raw).map_err(shape_error)?;
    if let Some(last) = array.ndim().checked_sub(1) {
        array.invert_axis(Axis(last));
    }
    Ok(array.as_standard_layout().into_owned())
}

/// Reorder a raw `(NX, NY, NZ)` sinogram view as logical `(NZ, NY, NX)`
///
/// The last on-disk axis is reversed before the permutation, so
/// `out[k][j][i] = raw[i][j][NZ-1-k]`. A rank-2 `(NX, NY)` view becomes a
/// single plane with its own last axis reversed: `out[0][j][i] = raw[i][NY-1-j]`.
pub fn sinogram_to_logical(raw: Vec<u8>, extent: &[usize]) -> Result<Array3<u8>> {
    match *extent {
        [nx, ny] => {
            let raw = Array2::from_shape_vec((nx, ny), raw).map_err(shape_error)?;
            Ok(Array3::from_shape_fn((1, ny, nx), |(_, j, i)| {
                raw[[i, ny - 1 - j]]
            }))
        }
        [nx, ny, nz] => {
            let raw = Array3::from_shape_vec((nx, ny, nz), raw).map_err(shape_error)?;
            Ok(Array3::from_shape_fn((nz, ny, nx), |(k, j, i)| {
                raw[[i, j, nz - 1 - k]]
            }))
        }
        _ => Err(RdfError::RegionMismatch(format!(
            "sinogram extent {:?} is not 2-D or 3-D",
            extent
        ))),
    }
}
