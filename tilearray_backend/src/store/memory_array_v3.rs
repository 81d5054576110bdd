//! An in-memory Zarr V3 style array.

use std::borrow::Cow;

use bytes::BytesMut;

use super::chunk_store::ChunkStore;
use super::swap_byte_order;
use crate::{
    ArrayMetadataV3, ArraySubset, ArrayV3Error, ArrayV3Traits, ArrayView, DataTypeV3,
    IncompatibleDimensionalityError, Region,
};

/// An in-memory Zarr V3 style array.
///
/// Chunks are held in little endian byte order.
/// Region reads that extend beyond the end of the array are clipped to the array.
#[derive(Debug)]
pub struct MemoryArrayV3 {
    metadata: ArrayMetadataV3,
    chunk_store: ChunkStore,
}

impl MemoryArrayV3 {
    /// Create a new in-memory array.
    ///
    /// # Errors
    /// Returns [`ArrayV3Error::InvalidMetadata`] if `shape` and `chunk_shape` are incompatible.
    pub fn new(
        shape: Vec<u64>,
        chunk_shape: Vec<i32>,
        data_type: DataTypeV3,
    ) -> Result<Self, ArrayV3Error> {
        Self::from_metadata(ArrayMetadataV3::new(shape, chunk_shape, data_type))
    }

    /// Create a new in-memory array from `metadata`.
    ///
    /// # Errors
    /// Returns [`ArrayV3Error::InvalidMetadata`] if the metadata is invalid.
    pub fn from_metadata(metadata: ArrayMetadataV3) -> Result<Self, ArrayV3Error> {
        metadata.validate()?;
        let chunk_shape = metadata
            .chunk_shape
            .iter()
            .map(|&size| u64::from(size.unsigned_abs()))
            .collect();
        let chunk_store = ChunkStore::new(chunk_shape, metadata.data_type.size());
        Ok(Self {
            metadata,
            chunk_store,
        })
    }

    /// Returns the array metadata.
    #[must_use]
    pub fn metadata(&self) -> &ArrayMetadataV3 {
        &self.metadata
    }

    /// Returns the number of chunks that have been written.
    #[must_use]
    pub fn num_chunks_stored(&self) -> usize {
        self.chunk_store.num_chunks()
    }

    fn validate_dimensionality(&self, coordinates: &[u64]) -> Result<(), ArrayV3Error> {
        let dimensionality = self.metadata.shape.len();
        if coordinates.len() == dimensionality {
            Ok(())
        } else {
            Err(IncompatibleDimensionalityError::new(coordinates.len(), dimensionality).into())
        }
    }

    fn out_of_bounds(&self, subset: ArraySubset) -> ArrayV3Error {
        ArrayV3Error::OutOfBounds {
            subset,
            array_shape: self.metadata.shape.clone(),
        }
    }
}

impl ArrayV3Traits for MemoryArrayV3 {
    fn shape(&self) -> &[u64] {
        &self.metadata.shape
    }

    fn chunk_shape(&self) -> &[i32] {
        &self.metadata.chunk_shape
    }

    fn data_type(&self) -> DataTypeV3 {
        self.metadata.data_type
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_region(&self, shape: &[u64], offset: &[u64]) -> Result<Region, ArrayV3Error> {
        self.validate_dimensionality(shape)?;
        self.validate_dimensionality(offset)?;
        let subset = ArraySubset::new_with_start_shape(offset.to_vec(), shape.to_vec())?;
        if std::iter::zip(offset, &self.metadata.shape).any(|(start, extent)| start > extent) {
            return Err(self.out_of_bounds(subset));
        }
        let subset = subset.bound(&self.metadata.shape)?;

        let element_size = self.metadata.data_type.size();
        let mut bytes = BytesMut::zeroed(subset.num_elements() as usize * element_size);
        self.chunk_store.retrieve_into(&subset, &mut bytes)?;
        if cfg!(target_endian = "big") {
            swap_byte_order(&mut bytes, element_size);
        }
        log::trace!("read region {subset} from {} array", self.metadata.data_type);
        Ok(Region::new(subset.shape().to_vec(), bytes.freeze()))
    }

    fn write_region(&self, offset: &[u64], view: &ArrayView<'_>) -> Result<(), ArrayV3Error> {
        self.validate_dimensionality(offset)?;
        self.validate_dimensionality(view.shape())?;
        if view.data_type().name() != self.metadata.data_type.name() {
            return Err(ArrayV3Error::IncompatibleDataType {
                expected: self.metadata.data_type,
                got: view.data_type(),
            });
        }
        let subset = ArraySubset::new_with_start_shape(offset.to_vec(), view.shape().to_vec())?;
        if !subset.inbounds_shape(&self.metadata.shape) {
            return Err(self.out_of_bounds(subset));
        }

        let bytes = if cfg!(target_endian = "big") {
            let mut bytes = view.bytes().to_vec();
            swap_byte_order(&mut bytes, self.metadata.data_type.size());
            Cow::Owned(bytes)
        } else {
            Cow::Borrowed(view.bytes())
        };
        self.chunk_store.store(&subset, &bytes)?;
        log::trace!("wrote region {subset} to {} array", self.metadata.data_type);
        Ok(())
    }
}
