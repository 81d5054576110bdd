use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;

use super::DataTypeV2;
use crate::{ArraySubsetError, IncompatibleDimensionalityError};

/// A Zarr V2 style array error.
#[derive(Clone, Debug, Error)]
pub enum ArrayV2Error {
    /// The region is outside the bounds of the array.
    #[error("invalid range: region with shape {shape:?} at offset {offset:?} exceeds array shape {array_shape:?}")]
    InvalidRange {
        /// The shape of the region.
        shape: Vec<i32>,
        /// The offset of the region.
        offset: Vec<i32>,
        /// The shape of the array.
        array_shape: Vec<i32>,
    },
    /// The dimensionality of a region does not match the array.
    #[error(transparent)]
    IncompatibleDimensionality(#[from] IncompatibleDimensionalityError),
    /// An invalid array subset.
    #[error(transparent)]
    ArraySubsetError(#[from] ArraySubsetError),
    /// The buffer size does not match the region.
    #[error("got buffer with {got} bytes, expected {expected}")]
    InvalidBufferSize {
        /// The size of the buffer in bytes.
        got: usize,
        /// The expected size of the buffer in bytes.
        expected: usize,
    },
    /// Invalid array metadata.
    #[error("invalid array metadata: {0}")]
    InvalidMetadata(String),
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] Arc<std::io::Error>),
}

impl From<std::io::Error> for ArrayV2Error {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(Arc::new(err))
    }
}

/// The interface of an open Zarr V2 style array.
///
/// Region bytes are in native endianness.
/// Implementations are responsible for converting to and from the byte order of their [`DataTypeV2`].
pub trait ArrayV2Traits: Debug + Send + Sync {
    /// Returns the shape of the array.
    fn shape(&self) -> &[i32];

    /// Returns the chunk shape of the array.
    fn chunks(&self) -> &[i32];

    /// Returns the data type of the array.
    fn data_type(&self) -> &DataTypeV2;

    /// Read the region with `shape` at `offset` into `out`.
    ///
    /// # Errors
    /// Returns an [`ArrayV2Error`] if the region is outside the array, `out` does not match the size of the region, or there is an underlying IO error.
    fn read_region(&self, shape: &[i32], offset: &[i32], out: &mut [u8]) -> Result<(), ArrayV2Error>;

    /// Write `bytes` to the region with `shape` at `offset`.
    ///
    /// # Errors
    /// Returns an [`ArrayV2Error`] if the region is outside the array, `bytes` does not match the size of the region, or there is an underlying IO error.
    fn write_region(&self, shape: &[i32], offset: &[i32], bytes: &[u8]) -> Result<(), ArrayV2Error>;
}
