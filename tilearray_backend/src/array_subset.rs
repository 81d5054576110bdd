//! Array subsets.
//!
//! An [`ArraySubset`] represents a rectangular region of an array or chunk.
//!
//! This module also provides [`copy_subset`] for moving the elements of a region between two linearised (row-major) buffers with a fixed element size.

use std::fmt::Display;
use std::ops::Range;

use itertools::Itertools;
use thiserror::Error;

/// An incompatible dimensionality error.
#[derive(Copy, Clone, Debug, Error)]
#[error("incompatible dimensionality {0}, expected {1}")]
pub struct IncompatibleDimensionalityError(usize, usize);

impl IncompatibleDimensionalityError {
    /// Create a new incompatible dimensionality error.
    #[must_use]
    pub const fn new(got: usize, expected: usize) -> Self {
        Self(got, expected)
    }

    /// Returns the dimensionality that was received.
    #[must_use]
    pub const fn got(&self) -> usize {
        self.0
    }

    /// Returns the expected dimensionality.
    #[must_use]
    pub const fn expected(&self) -> usize {
        self.1
    }
}

/// An array subset error.
#[derive(Clone, Debug, Error)]
#[allow(missing_docs)]
pub enum ArraySubsetError {
    /// Incompatible dimensionality.
    #[error(transparent)]
    IncompatibleDimensionality(#[from] IncompatibleDimensionalityError),
    /// Incompatible start and shape.
    #[error("incompatible start {start:?} with shape {shape:?}")]
    IncompatibleStartShape { start: Vec<u64>, shape: Vec<u64> },
    /// Incompatible start and end indices.
    #[error("incompatible start {start:?} with end {end:?}")]
    IncompatibleStartEnd { start: Vec<u64>, end: Vec<u64> },
    /// The end of the subset exceeds [`u64::MAX`].
    #[error("array subset with start {start:?} and shape {shape:?} overflows")]
    Overflow { start: Vec<u64>, shape: Vec<u64> },
}

/// An array subset.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ArraySubset {
    start: Vec<u64>,
    shape: Vec<u64>,
}

impl Display for ArraySubset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ranges: Vec<Range<u64>> = std::iter::zip(&self.start, &self.shape)
            .map(|(&start, &size)| start..start.saturating_add(size))
            .collect();
        write!(f, "{ranges:?}")
    }
}

impl ArraySubset {
    /// Create a new array subset from a list of [`Range`]s.
    #[must_use]
    pub fn new_with_ranges(ranges: &[Range<u64>]) -> Self {
        let (start, shape) = ranges
            .iter()
            .map(|range| (range.start, range.end.saturating_sub(range.start)))
            .unzip();
        Self { start, shape }
    }

    /// Create a new array subset with `shape` starting at the origin.
    #[must_use]
    pub fn new_with_shape(shape: Vec<u64>) -> Self {
        Self {
            start: vec![0; shape.len()],
            shape,
        }
    }

    /// Create a new array subset.
    ///
    /// # Errors
    /// Returns [`ArraySubsetError`] if the lengths of `start` and `shape` do not match or the end of the subset overflows.
    pub fn new_with_start_shape(start: Vec<u64>, shape: Vec<u64>) -> Result<Self, ArraySubsetError> {
        if start.len() != shape.len() {
            Err(ArraySubsetError::IncompatibleStartShape { start, shape })
        } else if std::iter::zip(&start, &shape).any(|(s, l)| s.checked_add(*l).is_none()) {
            Err(ArraySubsetError::Overflow { start, shape })
        } else {
            Ok(Self { start, shape })
        }
    }

    /// Create a new array subset from a start and end (exclusive).
    ///
    /// # Errors
    /// Returns [`ArraySubsetError`] if `start` and `end` differ in length or any element of `end` is less than `start`.
    pub fn new_with_start_end_exc(start: Vec<u64>, end: Vec<u64>) -> Result<Self, ArraySubsetError> {
        if start.len() != end.len() || std::iter::zip(&start, &end).any(|(start, end)| end < start)
        {
            Err(ArraySubsetError::IncompatibleStartEnd { start, end })
        } else {
            let shape = std::iter::zip(&start, end)
                .map(|(&start, end)| end - start)
                .collect();
            Ok(Self { start, shape })
        }
    }

    /// Return the start of the array subset.
    #[must_use]
    pub fn start(&self) -> &[u64] {
        &self.start
    }

    /// Return the shape of the array subset.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Return the end (exclusive) of the array subset.
    #[must_use]
    pub fn end_exc(&self) -> Vec<u64> {
        std::iter::zip(&self.start, &self.shape)
            .map(|(&start, &size)| start + size)
            .collect()
    }

    /// Return the dimensionality of the array subset.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.start.len()
    }

    /// Returns if the array subset is empty (i.e. has a zero element in its shape).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape.iter().any(|i| i == &0)
    }

    /// Return the number of elements of the array subset.
    ///
    /// Equal to the product of the components of its shape.
    #[must_use]
    pub fn num_elements(&self) -> u64 {
        self.shape.iter().product()
    }

    /// Returns true if the array subset is within the bounds of an array with `array_shape`.
    #[must_use]
    pub fn inbounds_shape(&self, array_shape: &[u64]) -> bool {
        self.dimensionality() == array_shape.len()
            && itertools::izip!(&self.start, &self.shape, array_shape)
                .all(|(&start, &size, &extent)| start.saturating_add(size) <= extent)
    }

    /// Bound the array subset to the domain within `end` (exclusive).
    ///
    /// # Errors
    /// Returns an error if `end` does not match the array subset dimensionality.
    pub fn bound(&self, end: &[u64]) -> Result<Self, ArraySubsetError> {
        if end.len() != self.dimensionality() {
            return Err(IncompatibleDimensionalityError::new(end.len(), self.dimensionality()).into());
        }
        let start = std::iter::zip(&self.start, end)
            .map(|(&a, &b)| std::cmp::min(a, b))
            .collect();
        let end = std::iter::zip(self.end_exc(), end)
            .map(|(a, &b)| std::cmp::min(a, b))
            .collect();
        Self::new_with_start_end_exc(start, end)
    }

    /// Return the overlapping subset between this array subset and `other`.
    ///
    /// # Errors
    /// Returns [`ArraySubsetError`] if the dimensionality of `other` does not match.
    pub fn overlap(&self, other: &Self) -> Result<Self, ArraySubsetError> {
        if other.dimensionality() != self.dimensionality() {
            return Err(
                IncompatibleDimensionalityError::new(other.dimensionality(), self.dimensionality())
                    .into(),
            );
        }
        let (start, shape) = itertools::izip!(&self.start, self.end_exc(), &other.start, other.end_exc())
            .map(|(&start_a, end_a, &start_b, end_b)| {
                let start = std::cmp::max(start_a, start_b);
                let end = std::cmp::min(end_a, end_b);
                (start, end.saturating_sub(start))
            })
            .unzip();
        Ok(Self { start, shape })
    }

    /// Return the subset relative to `start`.
    ///
    /// # Errors
    /// Returns [`ArraySubsetError`] if the dimensionality of `start` does not match or `start` exceeds the start of the subset.
    pub fn relative_to(&self, start: &[u64]) -> Result<Self, ArraySubsetError> {
        if start.len() != self.dimensionality() {
            return Err(IncompatibleDimensionalityError::new(start.len(), self.dimensionality()).into());
        }
        if std::iter::zip(&self.start, start).any(|(a, b)| b > a) {
            return Err(ArraySubsetError::IncompatibleStartEnd {
                start: start.to_vec(),
                end: self.start.clone(),
            });
        }
        Ok(Self {
            start: std::iter::zip(&self.start, start).map(|(a, b)| a - b).collect(),
            shape: self.shape.clone(),
        })
    }

    /// Return the subset of a regular chunk grid with `chunk_shape` intersecting this array subset.
    ///
    /// The returned subset holds chunk grid indices.
    ///
    /// # Errors
    /// Returns [`ArraySubsetError`] if the dimensionality of `chunk_shape` does not match.
    pub fn chunks(&self, chunk_shape: &[u64]) -> Result<Self, ArraySubsetError> {
        if chunk_shape.len() != self.dimensionality() {
            return Err(
                IncompatibleDimensionalityError::new(chunk_shape.len(), self.dimensionality())
                    .into(),
            );
        }
        if self.is_empty() {
            return Ok(Self::new_with_shape(vec![0; self.dimensionality()]));
        }
        let (start, shape) = itertools::izip!(&self.start, self.end_exc(), chunk_shape)
            .map(|(&start, end, &chunk_size)| {
                let first = start / chunk_size;
                let last = end.div_ceil(chunk_size);
                (first, last - first)
            })
            .unzip();
        Ok(Self { start, shape })
    }

    /// Returns an iterator over the indices of elements within the subset in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = Vec<u64>> + '_ {
        indices(&self.start, &self.shape)
    }
}

fn indices<'a>(start: &'a [u64], shape: &'a [u64]) -> Box<dyn Iterator<Item = Vec<u64>> + 'a> {
    if start.is_empty() {
        Box::new(std::iter::once(Vec::new()))
    } else {
        Box::new(
            std::iter::zip(start, shape)
                .map(|(&start, &size)| start..start + size)
                .multi_cartesian_product(),
        )
    }
}

/// Ravel ND indices into a linearised index in row-major order.
#[must_use]
pub fn ravel_indices(indices: &[u64], shape: &[u64]) -> u64 {
    std::iter::zip(indices, shape).fold(0, |index, (&i, &dim)| index * dim + i)
}

/// Copy the elements of a region with `region_shape` between two linearised buffers.
///
/// The region starts at `src_start` in `src` (of array shape `src_shape`) and at `dst_start` in `dst` (of array shape `dst_shape`).
/// Each element occupies `element_size` bytes.
/// The region must be inbounds of both buffers.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::too_many_arguments)]
pub fn copy_subset(
    src: &[u8],
    src_shape: &[u64],
    src_start: &[u64],
    dst: &mut [u8],
    dst_shape: &[u64],
    dst_start: &[u64],
    region_shape: &[u64],
    element_size: usize,
) {
    if region_shape.iter().any(|&size| size == 0) {
        return;
    }
    let Some((&row_len, outer_shape)) = region_shape.split_last() else {
        dst[..element_size].copy_from_slice(&src[..element_size]);
        return;
    };
    let row_bytes = row_len as usize * element_size;
    let outer_start = vec![0; outer_shape.len()];
    for outer in indices(&outer_start, outer_shape) {
        let src_indices: Vec<u64> = std::iter::zip(&outer, src_start)
            .map(|(i, s)| i + s)
            .chain(std::iter::once(src_start[outer.len()]))
            .collect();
        let dst_indices: Vec<u64> = std::iter::zip(&outer, dst_start)
            .map(|(i, s)| i + s)
            .chain(std::iter::once(dst_start[outer.len()]))
            .collect();
        let src_offset = ravel_indices(&src_indices, src_shape) as usize * element_size;
        let dst_offset = ravel_indices(&dst_indices, dst_shape) as usize * element_size;
        dst[dst_offset..dst_offset + row_bytes]
            .copy_from_slice(&src[src_offset..src_offset + row_bytes]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_subset() {
        assert!(ArraySubset::new_with_start_shape(vec![0, 0], vec![10, 10]).is_ok());
        assert!(ArraySubset::new_with_start_shape(vec![0, 0], vec![10]).is_err());
        assert!(ArraySubset::new_with_start_shape(vec![u64::MAX], vec![1]).is_err());
        assert!(ArraySubset::new_with_start_end_exc(vec![0, 0], vec![10, 10]).is_ok());
        assert!(ArraySubset::new_with_start_end_exc(vec![5, 5], vec![0, 0]).is_err());

        let array_subset = ArraySubset::new_with_start_shape(vec![0, 0], vec![10, 10])
            .unwrap()
            .bound(&[5, 5])
            .unwrap();
        assert_eq!(array_subset.shape(), &[5, 5]);
        assert!(array_subset.bound(&[5, 5, 5]).is_err());

        let array_subset0 = ArraySubset::new_with_ranges(&[1..5, 2..6]);
        let array_subset1 = ArraySubset::new_with_ranges(&[3..6, 4..7]);
        assert_eq!(
            array_subset0.overlap(&array_subset1).unwrap(),
            ArraySubset::new_with_ranges(&[3..5, 4..6])
        );
        assert_eq!(
            array_subset0.relative_to(&[1, 1]).unwrap(),
            ArraySubset::new_with_ranges(&[0..4, 1..5])
        );
        assert!(array_subset0.relative_to(&[1, 1, 1]).is_err());
        assert!(array_subset0.relative_to(&[2, 2]).is_err());
        assert!(array_subset0.inbounds_shape(&[10, 10]));
        assert!(!array_subset0.inbounds_shape(&[2, 2]));
        assert!(!array_subset0.inbounds_shape(&[10, 10, 10]));
        assert_eq!(array_subset0.end_exc(), vec![5, 6]);
        assert_eq!(array_subset0.num_elements(), 16);
        assert_eq!(array_subset0.to_string(), "[1..5, 2..6]");

        let array_subset2 = ArraySubset::new_with_ranges(&[3..6, 4..7, 0..1]);
        assert!(array_subset0.overlap(&array_subset2).is_err());
    }

    #[test]
    fn array_subset_chunks() {
        let array_subset = ArraySubset::new_with_ranges(&[1..5, 0..2]);
        assert_eq!(
            array_subset.chunks(&[2, 2]).unwrap(),
            ArraySubset::new_with_ranges(&[0..3, 0..1])
        );
        assert!(array_subset.chunks(&[2]).is_err());
        assert!(
            ArraySubset::new_with_ranges(&[1..1, 0..2])
                .chunks(&[2, 2])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn array_subset_indices() {
        let array_subset = ArraySubset::new_with_ranges(&[1..3, 4..6]);
        assert_eq!(
            array_subset.indices().collect::<Vec<_>>(),
            vec![vec![1, 4], vec![1, 5], vec![2, 4], vec![2, 5]]
        );
        assert_eq!(ArraySubset::default().indices().count(), 1);
        assert_eq!(ravel_indices(&[1, 2], &[3, 4]), 6);
    }

    #[test]
    fn array_subset_copy() {
        // 0  1  2  3
        // 4  5  6  7
        // 8  9 10 11
        let src: Vec<u8> = (0..12).collect();
        let mut dst = vec![0u8; 4];
        copy_subset(&src, &[3, 4], &[1, 1], &mut dst, &[2, 2], &[0, 0], &[2, 2], 1);
        assert_eq!(dst, vec![5, 6, 9, 10]);

        let src: Vec<u8> = vec![1, 0, 2, 0];
        let mut dst = vec![0u8; 8];
        copy_subset(&src, &[2], &[0], &mut dst, &[4], &[2], &[2], 2);
        assert_eq!(dst, vec![0, 0, 0, 0, 1, 0, 2, 0]);
    }
}
