//! Array elements.

use crate::DataType;

/// A trait representing a tile element type.
///
/// Each implementor is bound to exactly one [`DataType`].
/// Elements are plain old data, so a slice of elements can be viewed as native-endian bytes without copying.
pub trait Element: bytemuck::Pod + Send + Sync + std::fmt::Debug + 'static {
    /// The data type of the element.
    const DATA_TYPE: DataType;

    /// Returns true if the element can be used to read an array of `data_type`.
    ///
    /// Reads only require a matching element width, the signedness of the buffer is up to the caller.
    #[must_use]
    fn compatible_width(data_type: DataType) -> bool {
        Self::DATA_TYPE.size() == data_type.size()
    }
}

macro_rules! impl_element {
    ($raw_type:ty, $data_type:expr) => {
        impl Element for $raw_type {
            const DATA_TYPE: DataType = $data_type;
        }
    };
}

impl_element!(f64, DataType::Float64);
impl_element!(f32, DataType::Float32);
impl_element!(i32, DataType::Int32);
impl_element!(u32, DataType::UInt32);
impl_element!(i16, DataType::Int16);
impl_element!(u16, DataType::UInt16);
impl_element!(i8, DataType::Int8);
impl_element!(u8, DataType::UInt8);

/// Transmute from `&[T]` to `&[u8]`.
#[must_use]
pub fn transmute_to_bytes<T: bytemuck::NoUninit>(from: &[T]) -> &[u8] {
    bytemuck::must_cast_slice(from)
}

/// Transmute from `&mut [T]` to `&mut [u8]`.
#[must_use]
pub fn transmute_to_bytes_mut<T: bytemuck::Pod>(from: &mut [T]) -> &mut [u8] {
    bytemuck::must_cast_slice_mut(from)
}

/// Convert from `&[u8]` to `Vec<T>`.
///
/// The input does not need to be aligned for `T`.
#[must_use]
pub fn convert_from_bytes_slice<T: bytemuck::Pod>(from: &[u8]) -> Vec<T> {
    bytemuck::allocation::pod_collect_to_vec(from)
}
