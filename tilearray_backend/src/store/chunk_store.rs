//! Chunked element storage shared by the in-memory arrays.

use std::collections::BTreeMap;

use bytes::BytesMut;
use parking_lot::RwLock;

use crate::array_subset::{ArraySubset, ArraySubsetError, copy_subset};

/// Regular chunks of fixed size elements.
///
/// Chunks are keyed by their chunk grid indices and hold elements in row-major order.
#[derive(Debug)]
pub(super) struct ChunkStore {
    chunk_shape: Vec<u64>,
    element_size: usize,
    chunks: RwLock<BTreeMap<Vec<u64>, BytesMut>>,
}

impl ChunkStore {
    pub(super) fn new(chunk_shape: Vec<u64>, element_size: usize) -> Self {
        Self {
            chunk_shape,
            element_size,
            chunks: RwLock::default(),
        }
    }

    pub(super) fn num_chunks(&self) -> usize {
        self.chunks.read().len()
    }

    fn chunk_subset(&self, chunk_indices: &[u64]) -> ArraySubset {
        let ranges: Vec<_> = std::iter::zip(chunk_indices, &self.chunk_shape)
            .map(|(&index, &size)| index * size..(index + 1) * size)
            .collect();
        ArraySubset::new_with_ranges(&ranges)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn chunk_size_bytes(&self) -> usize {
        self.chunk_shape.iter().product::<u64>() as usize * self.element_size
    }

    /// Retrieve the elements of `subset` into `out`.
    ///
    /// Elements of chunks that have not been stored are zero.
    pub(super) fn retrieve_into(
        &self,
        subset: &ArraySubset,
        out: &mut [u8],
    ) -> Result<(), ArraySubsetError> {
        out.fill(0);
        let chunks = self.chunks.read();
        for chunk_indices in subset.chunks(&self.chunk_shape)?.indices() {
            let Some(chunk) = chunks.get(&chunk_indices) else {
                continue;
            };
            let chunk_subset = self.chunk_subset(&chunk_indices);
            let overlap = subset.overlap(&chunk_subset)?;
            copy_subset(
                chunk,
                &self.chunk_shape,
                overlap.relative_to(chunk_subset.start())?.start(),
                out,
                subset.shape(),
                overlap.relative_to(subset.start())?.start(),
                overlap.shape(),
                self.element_size,
            );
        }
        Ok(())
    }

    /// Store the elements of `subset` from `bytes`.
    pub(super) fn store(&self, subset: &ArraySubset, bytes: &[u8]) -> Result<(), ArraySubsetError> {
        let chunk_size_bytes = self.chunk_size_bytes();
        let mut chunks = self.chunks.write();
        for chunk_indices in subset.chunks(&self.chunk_shape)?.indices() {
            let chunk_subset = self.chunk_subset(&chunk_indices);
            let overlap = subset.overlap(&chunk_subset)?;
            let chunk = chunks
                .entry(chunk_indices)
                .or_insert_with(|| BytesMut::zeroed(chunk_size_bytes));
            copy_subset(
                bytes,
                subset.shape(),
                overlap.relative_to(subset.start())?.start(),
                chunk,
                &self.chunk_shape,
                overlap.relative_to(chunk_subset.start())?.start(),
                overlap.shape(),
                self.element_size,
            );
        }
        Ok(())
    }
}
