//! Translation between tile coordinates and backend coordinates.
//!
//! Tile shapes and offsets are 32-bit signed integers.
//! Zarr V2 arrays use the same coordinate type, Zarr V3 arrays use 64-bit unsigned coordinates.

use itertools::izip;

use crate::ArrayHandleError;

/// Widen tile coordinates to Zarr V3 coordinates.
///
/// Returns [`None`] if any coordinate is negative.
#[must_use]
pub fn widen(coordinates: &[i32]) -> Option<Vec<u64>> {
    coordinates
        .iter()
        .map(|&coordinate| u64::try_from(coordinate).ok())
        .collect()
}

/// Narrow a Zarr V3 shape to tile coordinates.
///
/// # Errors
/// Returns [`ArrayHandleError::ShapeOverflow`] naming the first dimension that exceeds [`i32::MAX`].
pub fn narrow(shape: &[u64]) -> Result<Vec<i32>, ArrayHandleError> {
    shape
        .iter()
        .enumerate()
        .map(|(dimension, &size)| {
            i32::try_from(size).map_err(|_| ArrayHandleError::ShapeOverflow { dimension, size })
        })
        .collect()
}

/// Returns the number of elements in a tile with `shape`.
///
/// Returns [`None`] if any dimension is negative or the product overflows [`usize`].
#[must_use]
pub fn num_elements(shape: &[i32]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &size| {
        acc.checked_mul(usize::try_from(size).ok()?)
    })
}

/// Returns true if the tile with `shape` at `offset` lies within an array of `array_shape`.
///
/// Negative shapes or offsets are never in bounds.
/// All three arguments must have the same length.
#[must_use]
pub fn tile_inbounds(shape: &[i32], offset: &[i32], array_shape: &[u64]) -> bool {
    shape.len() == array_shape.len()
        && offset.len() == array_shape.len()
        && izip!(shape, offset, array_shape).all(|(&size, &start, &extent)| {
            match (u64::try_from(size), u64::try_from(start)) {
                (Ok(size), Ok(start)) => start + size <= extent,
                _ => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_widen() {
        assert_eq!(widen(&[0, 3, i32::MAX]), Some(vec![0, 3, 2_147_483_647]));
        assert_eq!(widen(&[]), Some(vec![]));
        assert_eq!(widen(&[1, -1]), None);
    }

    #[test]
    fn coordinates_narrow() {
        assert_eq!(narrow(&[0, 10, (1 << 31) - 1]).unwrap(), vec![0, 10, i32::MAX]);
        let err = narrow(&[4, 1 << 31, 1 << 40]).unwrap_err();
        assert!(matches!(
            err,
            ArrayHandleError::ShapeOverflow {
                dimension: 1,
                size: 2_147_483_648
            }
        ));
    }

    #[test]
    fn coordinates_widen_narrow() {
        for coordinates in [vec![], vec![0], vec![1, 2, 3], vec![i32::MAX, 0, 7]] {
            assert_eq!(narrow(&widen(&coordinates).unwrap()).unwrap(), coordinates);
        }
    }

    #[test]
    fn coordinates_num_elements() {
        assert_eq!(num_elements(&[]), Some(1));
        assert_eq!(num_elements(&[2, 3, 4]), Some(24));
        assert_eq!(num_elements(&[2, 0]), Some(0));
        assert_eq!(num_elements(&[2, -1]), None);
    }

    #[test]
    fn coordinates_tile_inbounds() {
        assert!(tile_inbounds(&[2, 2], &[0, 0], &[4, 4]));
        assert!(tile_inbounds(&[2, 2], &[2, 2], &[4, 4]));
        assert!(tile_inbounds(&[0], &[10], &[10]));
        assert!(!tile_inbounds(&[5], &[8], &[10]));
        assert!(!tile_inbounds(&[1], &[-1], &[10]));
        assert!(!tile_inbounds(&[-1], &[0], &[10]));
        assert!(!tile_inbounds(&[1], &[0], &[10, 10]));
        assert!(tile_inbounds(&[1], &[i32::MAX], &[1 << 32]));
    }
}
