//! In-memory array backends.
//!
//! [`MemoryArrayV2`] and [`MemoryArrayV3`] hold their chunks in memory.
//! Chunks are created on first write and unwritten regions read as zero.

mod chunk_store;
mod memory_array_v2;
mod memory_array_v3;

pub use memory_array_v2::MemoryArrayV2;
pub use memory_array_v3::MemoryArrayV3;

/// Reverse the byte order of each `element_size` element of `bytes`.
fn swap_byte_order(bytes: &mut [u8], element_size: usize) {
    if element_size > 1 {
        for element in bytes.chunks_exact_mut(element_size) {
            element.reverse();
        }
    }
}
