use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;
use tilearray_data_type::DataType;

use super::{ArrayView, DataTypeV3};
use crate::{ArraySubset, ArraySubsetError, Bytes, IncompatibleDimensionalityError};

/// A Zarr V3 style array error.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ArrayV3Error {
    /// The region is outside the bounds of the array.
    #[error("array subset {subset} is out of bounds of array shape {array_shape:?}")]
    OutOfBounds {
        /// The requested region.
        subset: ArraySubset,
        /// The shape of the array.
        array_shape: Vec<u64>,
    },
    /// The dimensionality of a region does not match the array.
    #[error(transparent)]
    IncompatibleDimensionality(#[from] IncompatibleDimensionalityError),
    /// An invalid array subset.
    #[error(transparent)]
    ArraySubsetError(#[from] ArraySubsetError),
    /// The data type of a view does not match the array.
    #[error("view data type {got} is incompatible with array data type {expected}")]
    IncompatibleDataType {
        /// The data type of the array.
        expected: DataTypeV3,
        /// The data type of the view.
        got: DataType,
    },
    /// Invalid array metadata.
    #[error("invalid array metadata: {0}")]
    InvalidMetadata(String),
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] Arc<std::io::Error>),
}

impl From<std::io::Error> for ArrayV3Error {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(Arc::new(err))
    }
}

/// A region materialised by [`ArrayV3Traits::read_region`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    shape: Vec<u64>,
    bytes: Bytes,
}

impl Region {
    /// Create a new region.
    #[must_use]
    pub fn new(shape: Vec<u64>, bytes: Bytes) -> Self {
        Self { shape, bytes }
    }

    /// Returns the shape of the region.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Returns the elements of the region as native-endian bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Convert the region into its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// The interface of an open Zarr V3 style array.
pub trait ArrayV3Traits: Debug + Send + Sync {
    /// Returns the shape of the array.
    fn shape(&self) -> &[u64];

    /// Returns the chunk shape of the array.
    fn chunk_shape(&self) -> &[i32];

    /// Returns the data type of the array.
    fn data_type(&self) -> DataTypeV3;

    /// Read the region with `shape` at `offset`.
    ///
    /// The returned [`Region`] may be smaller than `shape` if the region extends beyond the array.
    ///
    /// # Errors
    /// Returns an [`ArrayV3Error`] if `offset` is outside the array or there is an underlying IO error.
    fn read_region(&self, shape: &[u64], offset: &[u64]) -> Result<Region, ArrayV3Error>;

    /// Write `view` to the array at `offset`.
    ///
    /// # Errors
    /// Returns an [`ArrayV3Error`] if the region is outside the array, the view data type is incompatible with the array, or there is an underlying IO error.
    fn write_region(&self, offset: &[u64], view: &ArrayView<'_>) -> Result<(), ArrayV3Error>;
}
