use std::sync::Arc;

use thiserror::Error;
use tilearray_backend::{ArrayV2Error, ArrayV3Error, ArrayViewCreateError, DataTypeV2};
use tilearray_data_type::DataType;

use crate::data_type_mapping::data_type_from_v3;

/// An array handle error.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ArrayHandleError {
    /// The native data type of a Zarr V2 array has no [`DataType`] equivalent.
    #[error("unsupported data type {0}")]
    UnsupportedDataType(DataTypeV2),
    /// A dimension of a Zarr V3 array does not fit in a tile coordinate.
    #[error("dimension {dimension} has size {size} which exceeds the maximum tile coordinate {}", i32::MAX)]
    ShapeOverflow {
        /// The index of the dimension.
        dimension: usize,
        /// The size of the dimension.
        size: u64,
    },
    /// A tile lies outside the array.
    #[error(transparent)]
    RangeError(#[from] TileRangeError),
    /// A declared or element data type is incompatible.
    #[error("data type {declared} is incompatible with data type {actual}")]
    TypeMismatch {
        /// The data type declared by the caller or the element data type of the buffer.
        declared: DataType,
        /// The data type of the array.
        actual: DataType,
    },
    /// The backend failed to read or write a region.
    #[error(transparent)]
    IOError(#[from] TileIOError),
    /// The tile dimensionality does not match the array dimensionality.
    #[error("incompatible dimensionality {got}, expected {expected}")]
    IncompatibleDimensionality {
        /// The dimensionality of the tile shape or offset.
        got: usize,
        /// The dimensionality of the array.
        expected: usize,
    },
    /// The buffer length does not match the number of elements in the tile.
    #[error("got buffer with {got} elements, expected {expected}")]
    InvalidBufferLength {
        /// The buffer length.
        got: usize,
        /// The number of elements in the tile.
        expected: usize,
    },
}

/// A tile that lies outside of an array.
#[derive(Clone, Debug, Error)]
#[error("tile with shape {shape:?} at offset {offset:?} is outside array shape {array_shape:?}")]
pub struct TileRangeError {
    shape: Vec<i32>,
    offset: Vec<i32>,
    array_shape: Vec<u64>,
}

impl TileRangeError {
    /// Create a new tile range error.
    #[must_use]
    pub fn new(shape: Vec<i32>, offset: Vec<i32>, array_shape: Vec<u64>) -> Self {
        Self {
            shape,
            offset,
            array_shape,
        }
    }

    /// Returns the tile shape.
    #[must_use]
    pub fn shape(&self) -> &[i32] {
        &self.shape
    }

    /// Returns the tile offset.
    #[must_use]
    pub fn offset(&self) -> &[i32] {
        &self.offset
    }

    /// Returns the array shape.
    #[must_use]
    pub fn array_shape(&self) -> &[u64] {
        &self.array_shape
    }
}

/// A backend read or write failure.
///
/// The backend error is available through [`std::error::Error::source`].
#[derive(Clone, Debug, Error)]
#[error("tile input/output failed")]
pub struct TileIOError {
    #[source]
    source: Arc<dyn std::error::Error + Send + Sync>,
}

impl TileIOError {
    /// Create a new tile input/output error from a backend error.
    #[must_use]
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// A region read returned fewer bytes than the tile requires.
#[derive(Clone, Debug, Error)]
#[error("region with shape {shape:?} has {got} bytes, expected {expected}")]
pub(crate) struct IncompleteRegionError {
    pub(crate) shape: Vec<u64>,
    pub(crate) got: usize,
    pub(crate) expected: usize,
}

fn shape_v2_to_u64(shape: &[i32]) -> Vec<u64> {
    shape
        .iter()
        .map(|&size| u64::try_from(size).unwrap_or(0))
        .collect()
}

impl ArrayHandleError {
    /// Translate a Zarr V2 backend error.
    pub(crate) fn from_v2(err: ArrayV2Error) -> Self {
        match err {
            ArrayV2Error::InvalidRange {
                shape,
                offset,
                array_shape,
            } => TileRangeError::new(shape, offset, shape_v2_to_u64(&array_shape)).into(),
            ArrayV2Error::IncompatibleDimensionality(err) => Self::IncompatibleDimensionality {
                got: err.got(),
                expected: err.expected(),
            },
            err => TileIOError::new(err).into(),
        }
    }

    /// Translate a Zarr V3 backend error raised for the tile at `shape` and `offset`.
    pub(crate) fn from_v3(err: ArrayV3Error, shape: &[i32], offset: &[i32]) -> Self {
        match err {
            ArrayV3Error::OutOfBounds { array_shape, .. } => {
                TileRangeError::new(shape.to_vec(), offset.to_vec(), array_shape).into()
            }
            ArrayV3Error::IncompatibleDimensionality(err) => Self::IncompatibleDimensionality {
                got: err.got(),
                expected: err.expected(),
            },
            ArrayV3Error::IncompatibleDataType { expected, got } => Self::TypeMismatch {
                declared: got,
                actual: data_type_from_v3(expected),
            },
            err => TileIOError::new(err).into(),
        }
    }
}

impl From<ArrayViewCreateError> for ArrayHandleError {
    fn from(err: ArrayViewCreateError) -> Self {
        match err {
            ArrayViewCreateError::IncompatibleElementType { element, data_type } => {
                Self::TypeMismatch {
                    declared: element,
                    actual: data_type,
                }
            }
            ArrayViewCreateError::InvalidLength { got, expected, .. } => {
                Self::InvalidBufferLength {
                    got,
                    expected: usize::try_from(expected).unwrap_or(usize::MAX),
                }
            }
        }
    }
}
