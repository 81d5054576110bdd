//! An in-memory Zarr V2 style array.

use std::borrow::Cow;

use super::chunk_store::ChunkStore;
use super::swap_byte_order;
use crate::{
    ArrayMetadataV2, ArraySubset, ArrayV2Error, ArrayV2Traits, DataTypeV2,
    IncompatibleDimensionalityError,
};

/// An in-memory Zarr V2 style array.
///
/// Chunks are held in the byte order of the array data type.
/// Regions must be entirely within the array.
#[derive(Debug)]
pub struct MemoryArrayV2 {
    metadata: ArrayMetadataV2,
    chunk_store: ChunkStore,
}

impl MemoryArrayV2 {
    /// Create a new in-memory array.
    ///
    /// # Errors
    /// Returns [`ArrayV2Error::InvalidMetadata`] if `shape` and `chunks` are incompatible.
    pub fn new(shape: Vec<i32>, chunks: Vec<i32>, dtype: DataTypeV2) -> Result<Self, ArrayV2Error> {
        Self::from_metadata(ArrayMetadataV2::new(shape, chunks, dtype))
    }

    /// Create a new in-memory array from `metadata`.
    ///
    /// # Errors
    /// Returns [`ArrayV2Error::InvalidMetadata`] if the metadata is invalid.
    pub fn from_metadata(metadata: ArrayMetadataV2) -> Result<Self, ArrayV2Error> {
        metadata.validate()?;
        let chunk_shape = metadata
            .chunks
            .iter()
            .map(|&size| u64::from(size.unsigned_abs()))
            .collect();
        let chunk_store = ChunkStore::new(chunk_shape, metadata.dtype.size());
        Ok(Self {
            metadata,
            chunk_store,
        })
    }

    /// Returns the array metadata.
    #[must_use]
    pub fn metadata(&self) -> &ArrayMetadataV2 {
        &self.metadata
    }

    /// Returns the number of chunks that have been written.
    #[must_use]
    pub fn num_chunks_stored(&self) -> usize {
        self.chunk_store.num_chunks()
    }

    fn region_subset(&self, shape: &[i32], offset: &[i32]) -> Result<ArraySubset, ArrayV2Error> {
        let dimensionality = self.metadata.shape.len();
        for coordinates in [shape, offset] {
            if coordinates.len() != dimensionality {
                return Err(
                    IncompatibleDimensionalityError::new(coordinates.len(), dimensionality).into(),
                );
            }
        }
        let inbounds = itertools::izip!(shape, offset, &self.metadata.shape).all(
            |(&size, &start, &extent)| {
                size >= 0 && start >= 0 && i64::from(start) + i64::from(size) <= i64::from(extent)
            },
        );
        if !inbounds {
            return Err(ArrayV2Error::InvalidRange {
                shape: shape.to_vec(),
                offset: offset.to_vec(),
                array_shape: self.metadata.shape.clone(),
            });
        }
        let ranges: Vec<_> = std::iter::zip(shape, offset)
            .map(|(&size, &start)| {
                let start = u64::from(start.unsigned_abs());
                start..start + u64::from(size.unsigned_abs())
            })
            .collect();
        Ok(ArraySubset::new_with_ranges(&ranges))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn region_size_bytes(&self, subset: &ArraySubset) -> usize {
        subset.num_elements() as usize * self.metadata.dtype.size()
    }
}

impl ArrayV2Traits for MemoryArrayV2 {
    fn shape(&self) -> &[i32] {
        &self.metadata.shape
    }

    fn chunks(&self) -> &[i32] {
        &self.metadata.chunks
    }

    fn data_type(&self) -> &DataTypeV2 {
        &self.metadata.dtype
    }

    fn read_region(&self, shape: &[i32], offset: &[i32], out: &mut [u8]) -> Result<(), ArrayV2Error> {
        let subset = self.region_subset(shape, offset)?;
        let expected = self.region_size_bytes(&subset);
        if out.len() != expected {
            return Err(ArrayV2Error::InvalidBufferSize {
                got: out.len(),
                expected,
            });
        }
        self.chunk_store.retrieve_into(&subset, out)?;
        if !self.metadata.dtype.byte_order().is_native() {
            swap_byte_order(out, self.metadata.dtype.size());
        }
        log::trace!("read region {subset} from {} array", self.metadata.dtype);
        Ok(())
    }

    fn write_region(&self, shape: &[i32], offset: &[i32], bytes: &[u8]) -> Result<(), ArrayV2Error> {
        let subset = self.region_subset(shape, offset)?;
        let expected = self.region_size_bytes(&subset);
        if bytes.len() != expected {
            return Err(ArrayV2Error::InvalidBufferSize {
                got: bytes.len(),
                expected,
            });
        }
        let bytes = if self.metadata.dtype.byte_order().is_native() {
            Cow::Borrowed(bytes)
        } else {
            let mut bytes = bytes.to_vec();
            swap_byte_order(&mut bytes, self.metadata.dtype.size());
            Cow::Owned(bytes)
        };
        self.chunk_store.store(&subset, &bytes)?;
        log::trace!("wrote region {subset} to {} array", self.metadata.dtype);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_array_v2() -> Result<(), Box<dyn std::error::Error>> {
        let array = MemoryArrayV2::new(vec![4, 4], vec![2, 2], "|u1".parse()?)?;
        assert_eq!(array.shape(), &[4, 4]);
        assert_eq!(array.chunks(), &[2, 2]);
        assert_eq!(array.data_type().to_string(), "|u1");

        array.write_region(&[2, 3], &[1, 1], &[1, 2, 3, 4, 5, 6])?;
        assert_eq!(array.num_chunks_stored(), 4);

        let mut out = vec![0u8; 16];
        array.read_region(&[4, 4], &[0, 0], &mut out)?;
        #[rustfmt::skip]
        assert_eq!(out, vec![
            0, 0, 0, 0,
            0, 1, 2, 3,
            0, 4, 5, 6,
            0, 0, 0, 0,
        ]);
        Ok(())
    }

    #[test]
    fn memory_array_v2_big_endian() -> Result<(), Box<dyn std::error::Error>> {
        let array = MemoryArrayV2::new(vec![3], vec![2], ">u2".parse()?)?;
        let elements = [0x0102u16, 0x0304, 0x0506];
        let bytes: Vec<u8> = elements.iter().flat_map(|e| e.to_ne_bytes()).collect();
        array.write_region(&[3], &[0], &bytes)?;

        let mut out = vec![0u8; 4];
        array.read_region(&[2], &[1], &mut out)?;
        assert_eq!(out[..2], 0x0304u16.to_ne_bytes());
        assert_eq!(out[2..], 0x0506u16.to_ne_bytes());
        Ok(())
    }

    #[test]
    fn memory_array_v2_invalid() -> Result<(), Box<dyn std::error::Error>> {
        let array = MemoryArrayV2::new(vec![10], vec![4], "<i2".parse()?)?;
        let mut out = vec![0u8; 10];
        assert!(matches!(
            array.read_region(&[5], &[8], &mut out),
            Err(ArrayV2Error::InvalidRange { .. })
        ));
        assert!(matches!(
            array.read_region(&[5], &[-1], &mut out),
            Err(ArrayV2Error::InvalidRange { .. })
        ));
        assert!(matches!(
            array.read_region(&[5, 1], &[0, 0], &mut out),
            Err(ArrayV2Error::IncompatibleDimensionality(_))
        ));
        assert!(matches!(
            array.read_region(&[4], &[0], &mut out),
            Err(ArrayV2Error::InvalidBufferSize { got: 10, expected: 8 })
        ));
        assert!(array.write_region(&[5], &[6], &out).is_err());
        assert_eq!(array.num_chunks_stored(), 0);

        assert!(MemoryArrayV2::new(vec![10], vec![4, 4], "<i2".parse()?).is_err());
        Ok(())
    }
}
