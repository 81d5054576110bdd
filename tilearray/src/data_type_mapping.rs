//! Mapping of backend data types to [`DataType`].

use tilearray_backend::{DataTypeKindV2, DataTypeV2, DataTypeV3};
use tilearray_data_type::DataType;

use crate::ArrayHandleError;

/// Map a Zarr V2 data type to a [`DataType`].
///
/// The byte order of the Zarr V2 data type is ignored.
///
/// # Errors
/// Returns [`ArrayHandleError::UnsupportedDataType`] if the data type is not one of `f8`, `f4`, `i4`, `u4`, `i2`, `u2`, `i1` or `u1`.
pub fn data_type_from_v2(data_type: &DataTypeV2) -> Result<DataType, ArrayHandleError> {
    match (data_type.kind(), data_type.size()) {
        (DataTypeKindV2::Float, 8) => Ok(DataType::Float64),
        (DataTypeKindV2::Float, 4) => Ok(DataType::Float32),
        (DataTypeKindV2::Int, 4) => Ok(DataType::Int32),
        (DataTypeKindV2::UInt, 4) => Ok(DataType::UInt32),
        (DataTypeKindV2::Int, 2) => Ok(DataType::Int16),
        (DataTypeKindV2::UInt, 2) => Ok(DataType::UInt16),
        (DataTypeKindV2::Int, 1) => Ok(DataType::Int8),
        (DataTypeKindV2::UInt, 1) => Ok(DataType::UInt8),
        _ => Err(ArrayHandleError::UnsupportedDataType(data_type.clone())),
    }
}

/// Map a Zarr V3 data type to a [`DataType`].
#[must_use]
pub const fn data_type_from_v3(data_type: DataTypeV3) -> DataType {
    match data_type {
        DataTypeV3::Float64 => DataType::Float64,
        DataTypeV3::Float32 => DataType::Float32,
        DataTypeV3::Int32 => DataType::Int32,
        DataTypeV3::UInt32 => DataType::UInt32,
        DataTypeV3::Int16 => DataType::Int16,
        DataTypeV3::UInt16 => DataType::UInt16,
        DataTypeV3::Int8 => DataType::Int8,
        DataTypeV3::UInt8 => DataType::UInt8,
    }
}

/// Map a [`DataType`] to a Zarr V3 data type.
#[must_use]
pub const fn data_type_to_v3(data_type: DataType) -> DataTypeV3 {
    match data_type {
        DataType::Float64 => DataTypeV3::Float64,
        DataType::Float32 => DataTypeV3::Float32,
        DataType::Int32 => DataTypeV3::Int32,
        DataType::UInt32 => DataTypeV3::UInt32,
        DataType::Int16 => DataTypeV3::Int16,
        DataType::UInt16 => DataTypeV3::UInt16,
        DataType::Int8 => DataTypeV3::Int8,
        DataType::UInt8 => DataTypeV3::UInt8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_mapping_v2() {
        for (tag, data_type) in [
            ("<f8", DataType::Float64),
            (">f8", DataType::Float64),
            ("<f4", DataType::Float32),
            ("<i4", DataType::Int32),
            (">u4", DataType::UInt32),
            ("<i2", DataType::Int16),
            ("<u2", DataType::UInt16),
            ("|i1", DataType::Int8),
            ("|u1", DataType::UInt8),
        ] {
            let data_type_v2: DataTypeV2 = tag.parse().unwrap();
            assert_eq!(data_type_from_v2(&data_type_v2).unwrap(), data_type);
        }
    }

    #[test]
    fn data_type_mapping_v2_unsupported() {
        for tag in ["<i8", "<u8", "<f2", "|b1", "<c8", "|S4"] {
            let data_type_v2: DataTypeV2 = tag.parse().unwrap();
            let err = data_type_from_v2(&data_type_v2).unwrap_err();
            assert!(matches!(err, ArrayHandleError::UnsupportedDataType(_)));
            assert_eq!(err.to_string(), format!("unsupported data type {tag}"));
        }
    }

    #[test]
    fn data_type_mapping_v3() {
        for data_type in DataType::ALL {
            let data_type_v3 = data_type_to_v3(data_type);
            assert_eq!(data_type_v3.name(), data_type.name());
            assert_eq!(data_type_v3.size(), data_type.size());
            assert_eq!(data_type_from_v3(data_type_v3), data_type);
        }
    }
}
