//! A tile read/write handle over Zarr V2 and Zarr V3 style arrays.

use bytemuck::Zeroable;
use tilearray_backend::{ArrayV2Traits, ArrayV3Traits, ArrayView};
use tilearray_data_type::{DataType, Element, transmute_to_bytes, transmute_to_bytes_mut};

use crate::config::global_config;
use crate::coordinates::{narrow, num_elements, tile_inbounds, widen};
use crate::data_type_mapping::{data_type_from_v2, data_type_from_v3};
use crate::error::{ArrayHandleError, IncompleteRegionError, TileIOError, TileRangeError};

#[derive(Clone, Copy, Debug)]
enum ArrayBackend<'a> {
    V2(&'a dyn ArrayV2Traits),
    V3(&'a dyn ArrayV3Traits),
}

/// A handle to a Zarr V2 or Zarr V3 style array.
///
/// The handle borrows the backend array and exposes it through 32-bit signed tile coordinates and the shared [`DataType`].
/// Callers read and write rectangular tiles without knowing which backend the handle is bound to.
///
/// Zarr V3 dimensions are 64-bit, so [`shape`](ArrayHandle::shape) fails with [`ArrayHandleError::ShapeOverflow`] if a dimension exceeds [`i32::MAX`].
///
/// ### Example
/// ```
/// # use tilearray::{ArrayHandle, DataType};
/// # use tilearray::backend::{DataTypeV3, store::MemoryArrayV3};
/// let array = MemoryArrayV3::new(vec![4, 4], vec![2, 2], DataTypeV3::Float32)?;
/// let handle = ArrayHandle::from_v3(&array);
/// assert_eq!(handle.shape()?, vec![4, 4]);
///
/// handle.write(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &[0, 0], DataType::Float32)?;
/// let mut tile = [0.0f32; 4];
/// handle.read(&mut tile, &[2, 2], &[0, 0])?;
/// assert_eq!(tile, [1.0, 2.0, 3.0, 4.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ArrayHandle<'a>(ArrayBackend<'a>);

impl<'a> ArrayHandle<'a> {
    /// Create a handle to a Zarr V2 style array.
    #[must_use]
    pub fn from_v2(array: &'a dyn ArrayV2Traits) -> Self {
        Self(ArrayBackend::V2(array))
    }

    /// Create a handle to a Zarr V3 style array.
    #[must_use]
    pub fn from_v3(array: &'a dyn ArrayV3Traits) -> Self {
        Self(ArrayBackend::V3(array))
    }

    /// Returns true if the handle is bound to a Zarr V3 style array.
    #[must_use]
    pub fn is_v3(&self) -> bool {
        matches!(self.0, ArrayBackend::V3(_))
    }

    /// Returns the dimensionality of the array.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        match self.0 {
            ArrayBackend::V2(array) => array.shape().len(),
            ArrayBackend::V3(array) => array.shape().len(),
        }
    }

    /// Returns the shape of the array.
    ///
    /// # Errors
    /// Returns [`ArrayHandleError::ShapeOverflow`] if a Zarr V3 dimension exceeds [`i32::MAX`].
    pub fn shape(&self) -> Result<Vec<i32>, ArrayHandleError> {
        match self.0 {
            ArrayBackend::V2(array) => Ok(array.shape().to_vec()),
            ArrayBackend::V3(array) => narrow(array.shape()),
        }
    }

    /// Returns the chunk shape of the array.
    #[must_use]
    pub fn chunk_shape(&self) -> Vec<i32> {
        match self.0 {
            ArrayBackend::V2(array) => array.chunks().to_vec(),
            ArrayBackend::V3(array) => array.chunk_shape().to_vec(),
        }
    }

    /// Returns the data type of the array.
    ///
    /// # Errors
    /// Returns [`ArrayHandleError::UnsupportedDataType`] if the Zarr V2 data type has no [`DataType`] equivalent.
    pub fn data_type(&self) -> Result<DataType, ArrayHandleError> {
        match self.0 {
            ArrayBackend::V2(array) => data_type_from_v2(array.data_type()),
            ArrayBackend::V3(array) => Ok(data_type_from_v3(array.data_type())),
        }
    }

    fn array_shape(&self) -> Vec<u64> {
        match self.0 {
            ArrayBackend::V2(array) => array
                .shape()
                .iter()
                .map(|&size| u64::try_from(size).unwrap_or(0))
                .collect(),
            ArrayBackend::V3(array) => array.shape().to_vec(),
        }
    }

    fn array_num_elements(&self) -> u64 {
        self.array_shape()
            .iter()
            .try_fold(1u64, |acc, &size| acc.checked_mul(size))
            .unwrap_or(u64::MAX)
    }

    fn range_error(&self, shape: &[i32], offset: &[i32]) -> ArrayHandleError {
        TileRangeError::new(shape.to_vec(), offset.to_vec(), self.array_shape()).into()
    }

    fn validate_dimensionality(&self, shape: &[i32], offset: &[i32]) -> Result<(), ArrayHandleError> {
        let expected = self.dimensionality();
        for got in [shape.len(), offset.len()] {
            if got != expected {
                return Err(ArrayHandleError::IncompatibleDimensionality { got, expected });
            }
        }
        Ok(())
    }

    fn validate_buffer_length(
        &self,
        len: usize,
        shape: &[i32],
        offset: &[i32],
    ) -> Result<(), ArrayHandleError> {
        match num_elements(shape) {
            Some(expected) if expected == len => Ok(()),
            Some(expected) => Err(ArrayHandleError::InvalidBufferLength { got: len, expected }),
            None => Err(self.range_error(shape, offset)),
        }
    }

    fn validate_bounds(&self, shape: &[i32], offset: &[i32]) -> Result<(), ArrayHandleError> {
        if global_config().validate_tile_bounds() && !tile_inbounds(shape, offset, &self.array_shape())
        {
            Err(self.range_error(shape, offset))
        } else {
            Ok(())
        }
    }

    fn widen_tile(
        &self,
        shape: &[i32],
        offset: &[i32],
    ) -> Result<(Vec<u64>, Vec<u64>), ArrayHandleError> {
        widen(shape)
            .zip(widen(offset))
            .ok_or_else(|| self.range_error(shape, offset))
    }

    /// Read the tile with `shape` at `offset` into `buf`.
    ///
    /// `buf` must hold exactly the number of elements in the tile, in row-major order.
    /// The element type must have the same width as the array data type, its signedness is up to the caller.
    ///
    /// # Errors
    /// Returns an [`ArrayHandleError`] if
    ///  - the dimensionality of `shape` or `offset` does not match the array,
    ///  - the length of `buf` does not match `shape`,
    ///  - the width of `T` does not match the array data type,
    ///  - the tile is outside the array, or
    ///  - the backend fails to read the tile.
    pub fn read<T: Element>(
        &self,
        buf: &mut [T],
        shape: &[i32],
        offset: &[i32],
    ) -> Result<(), ArrayHandleError> {
        self.validate_dimensionality(shape, offset)?;
        self.validate_buffer_length(buf.len(), shape, offset)?;
        let data_type = self.data_type()?;
        if !T::compatible_width(data_type) {
            return Err(ArrayHandleError::TypeMismatch {
                declared: T::DATA_TYPE,
                actual: data_type,
            });
        }
        self.validate_bounds(shape, offset)?;

        log::debug!("read tile with shape {shape:?} at offset {offset:?} from {self}");
        match self.0 {
            ArrayBackend::V2(array) => array
                .read_region(shape, offset, transmute_to_bytes_mut(buf))
                .map_err(ArrayHandleError::from_v2),
            ArrayBackend::V3(array) => {
                let (region_shape, region_offset) = self.widen_tile(shape, offset)?;
                let region = array
                    .read_region(&region_shape, &region_offset)
                    .map_err(|err| ArrayHandleError::from_v3(err, shape, offset))?;
                if region.shape() != region_shape.as_slice() && global_config().log_partial_regions()
                {
                    log::debug!(
                        "requested region with shape {region_shape:?}, got region with shape {:?}",
                        region.shape()
                    );
                }

                let out = transmute_to_bytes_mut(buf);
                let bytes = region.bytes();
                if bytes.len() < out.len() {
                    // A clipped region means the tile extends beyond the array
                    if region.shape() != region_shape.as_slice() {
                        return Err(self.range_error(shape, offset));
                    }
                    return Err(TileIOError::new(IncompleteRegionError {
                        shape: region.shape().to_vec(),
                        got: bytes.len(),
                        expected: out.len(),
                    })
                    .into());
                }
                let expected = out.len();
                out.copy_from_slice(&bytes[..expected]);
                Ok(())
            }
        }
    }

    /// Read the tile with `shape` at `offset` into a new vector.
    ///
    /// # Errors
    /// See [`read`](ArrayHandle::read).
    pub fn read_elements<T: Element>(
        &self,
        shape: &[i32],
        offset: &[i32],
    ) -> Result<Vec<T>, ArrayHandleError> {
        self.validate_dimensionality(shape, offset)?;
        self.validate_bounds(shape, offset)?;
        let num_elements = num_elements(shape)
            .filter(|&num_elements| {
                u64::try_from(num_elements).is_ok_and(|n| n <= self.array_num_elements())
            })
            .ok_or_else(|| self.range_error(shape, offset))?;
        let mut elements = vec![T::zeroed(); num_elements];
        self.read(&mut elements, shape, offset)?;
        Ok(elements)
    }

    /// Write `buf` to the tile with `shape` at `offset`.
    ///
    /// `buf` holds the elements of the tile in row-major order and `data_type` is the declared data type of the elements.
    /// The declared data type must match the array data type.
    /// A Zarr V3 array additionally requires the element type of `buf` to match `data_type` exactly.
    ///
    /// The write is synchronous: on success the backend has accepted the data.
    ///
    /// # Errors
    /// Returns an [`ArrayHandleError`] if
    ///  - the dimensionality of `shape` or `offset` does not match the array,
    ///  - the length of `buf` does not match `shape`,
    ///  - `data_type` or the element type of `buf` is incompatible with the array,
    ///  - the tile is outside the array, or
    ///  - the backend fails to write the tile.
    pub fn write<T: Element>(
        &self,
        buf: &[T],
        shape: &[i32],
        offset: &[i32],
        data_type: DataType,
    ) -> Result<(), ArrayHandleError> {
        self.validate_dimensionality(shape, offset)?;
        self.validate_buffer_length(buf.len(), shape, offset)?;
        let actual = self.data_type()?;
        if data_type != actual {
            return Err(ArrayHandleError::TypeMismatch {
                declared: data_type,
                actual,
            });
        }
        self.validate_bounds(shape, offset)?;

        log::debug!("write tile with shape {shape:?} at offset {offset:?} to {self}");
        match self.0 {
            ArrayBackend::V2(array) => {
                if !T::compatible_width(data_type) {
                    return Err(ArrayHandleError::TypeMismatch {
                        declared: T::DATA_TYPE,
                        actual: data_type,
                    });
                }
                array
                    .write_region(shape, offset, transmute_to_bytes(buf))
                    .map_err(ArrayHandleError::from_v2)
            }
            ArrayBackend::V3(array) => {
                let (view_shape, region_offset) = self.widen_tile(shape, offset)?;
                let view = ArrayView::new(data_type, view_shape, buf)?;
                array
                    .write_region(&region_offset, &view)
                    .map_err(|err| ArrayHandleError::from_v3(err, shape, offset))
            }
        }
    }

    /// Write `buf` to the tile with `shape` at `offset`, declaring the data type of `T`.
    ///
    /// # Errors
    /// See [`write`](ArrayHandle::write).
    pub fn write_elements<T: Element>(
        &self,
        buf: &[T],
        shape: &[i32],
        offset: &[i32],
    ) -> Result<(), ArrayHandleError> {
        self.write(buf, shape, offset, T::DATA_TYPE)
    }
}

impl<'a> From<&'a dyn ArrayV2Traits> for ArrayHandle<'a> {
    fn from(array: &'a dyn ArrayV2Traits) -> Self {
        Self::from_v2(array)
    }
}

impl<'a> From<&'a dyn ArrayV3Traits> for ArrayHandle<'a> {
    fn from(array: &'a dyn ArrayV3Traits) -> Self {
        Self::from_v3(array)
    }
}

impl std::fmt::Display for ArrayHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            ArrayBackend::V2(array) => write!(
                f,
                "Zarr V2 array with shape {:?}, chunks {:?} and data type {}",
                array.shape(),
                array.chunks(),
                array.data_type()
            ),
            ArrayBackend::V3(array) => write!(
                f,
                "Zarr V3 array with shape {:?}, chunks {:?} and data type {}",
                array.shape(),
                array.chunk_shape(),
                array.data_type()
            ),
        }
    }
}
