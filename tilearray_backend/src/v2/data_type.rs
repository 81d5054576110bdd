use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The byte order prefix of a numpy style data type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ByteOrderV2 {
    /// Little endian (`<`).
    #[display("<")]
    Little,
    /// Big endian (`>`).
    #[display(">")]
    Big,
    /// Byte order is not applicable to single byte elements (`|`).
    #[display("|")]
    NotApplicable,
}

impl ByteOrderV2 {
    /// The native byte order of the target.
    pub const NATIVE: Self = if cfg!(target_endian = "big") {
        Self::Big
    } else {
        Self::Little
    };

    /// Returns true if elements stored in this byte order can be used without swapping bytes.
    #[must_use]
    pub fn is_native(&self) -> bool {
        *self == Self::NotApplicable || *self == Self::NATIVE
    }
}

/// The kind character of a numpy style data type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DataTypeKindV2 {
    /// Boolean (`b`).
    #[display("b")]
    Bool,
    /// Signed integer (`i`).
    #[display("i")]
    Int,
    /// Unsigned integer (`u`).
    #[display("u")]
    UInt,
    /// Floating point (`f`).
    #[display("f")]
    Float,
    /// Complex floating point (`c`).
    #[display("c")]
    Complex,
    /// Fixed length raw bytes (`S`).
    #[display("S")]
    Bytes,
}

/// A Zarr V2 data type tag, e.g. `<f8`, `>u2` or `|u1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataTypeV2 {
    byte_order: ByteOrderV2,
    kind: DataTypeKindV2,
    size: usize,
}

/// An invalid Zarr V2 data type tag.
#[derive(Clone, Debug, Error)]
#[error("invalid Zarr V2 data type {0:?}")]
pub struct DataTypeV2ParseError(String);

impl DataTypeV2 {
    /// Create a new data type tag.
    ///
    /// # Errors
    /// Returns [`DataTypeV2ParseError`] if `size` is not valid for `kind`.
    pub fn new(
        byte_order: ByteOrderV2,
        kind: DataTypeKindV2,
        size: usize,
    ) -> Result<Self, DataTypeV2ParseError> {
        let valid_size = match kind {
            DataTypeKindV2::Bool => size == 1,
            DataTypeKindV2::Int | DataTypeKindV2::UInt => matches!(size, 1 | 2 | 4 | 8),
            DataTypeKindV2::Float => matches!(size, 2 | 4 | 8),
            DataTypeKindV2::Complex => matches!(size, 8 | 16),
            DataTypeKindV2::Bytes => size > 0,
        };
        // Single byte elements never carry a byte order
        let byte_order = if size == 1 || kind == DataTypeKindV2::Bytes {
            ByteOrderV2::NotApplicable
        } else if byte_order == ByteOrderV2::NotApplicable {
            return Err(DataTypeV2ParseError(format!("{byte_order}{kind}{size}")));
        } else {
            byte_order
        };
        if valid_size {
            Ok(Self {
                byte_order,
                kind,
                size,
            })
        } else {
            Err(DataTypeV2ParseError(format!("{byte_order}{kind}{size}")))
        }
    }

    /// Create a new little endian data type tag.
    ///
    /// # Errors
    /// Returns [`DataTypeV2ParseError`] if `size` is not valid for `kind`.
    pub fn little(kind: DataTypeKindV2, size: usize) -> Result<Self, DataTypeV2ParseError> {
        Self::new(ByteOrderV2::Little, kind, size)
    }

    /// Returns the byte order of stored elements.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrderV2 {
        self.byte_order
    }

    /// Returns the kind of the data type.
    #[must_use]
    pub const fn kind(&self) -> DataTypeKindV2 {
        self.kind
    }

    /// Returns the size of one element in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl Display for DataTypeV2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.byte_order, self.kind, self.size)
    }
}

impl FromStr for DataTypeV2 {
    type Err = DataTypeV2ParseError;

    fn from_str(dtype: &str) -> Result<Self, Self::Err> {
        let err = || DataTypeV2ParseError(dtype.to_string());
        let mut chars = dtype.chars();
        let byte_order = match chars.next() {
            Some('<') => ByteOrderV2::Little,
            Some('>') => ByteOrderV2::Big,
            Some('|') => ByteOrderV2::NotApplicable,
            Some('=') => ByteOrderV2::NATIVE,
            _ => return Err(err()),
        };
        let kind = match chars.next() {
            Some('b') => DataTypeKindV2::Bool,
            Some('i') => DataTypeKindV2::Int,
            Some('u') => DataTypeKindV2::UInt,
            Some('f') => DataTypeKindV2::Float,
            Some('c') => DataTypeKindV2::Complex,
            Some('S') => DataTypeKindV2::Bytes,
            _ => return Err(err()),
        };
        let size = chars.as_str().parse::<usize>().map_err(|_| err())?;
        Self::new(byte_order, kind, size).map_err(|_| err())
    }
}

impl TryFrom<String> for DataTypeV2 {
    type Error = DataTypeV2ParseError;

    fn try_from(dtype: String) -> Result<Self, Self::Error> {
        dtype.parse()
    }
}

impl From<DataTypeV2> for String {
    fn from(data_type: DataTypeV2) -> Self {
        data_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_v2_parse() {
        let data_type: DataTypeV2 = "<f8".parse().unwrap();
        assert_eq!(data_type.byte_order(), ByteOrderV2::Little);
        assert_eq!(data_type.kind(), DataTypeKindV2::Float);
        assert_eq!(data_type.size(), 8);
        assert_eq!(data_type.to_string(), "<f8");

        let data_type: DataTypeV2 = ">u2".parse().unwrap();
        assert_eq!(data_type.byte_order(), ByteOrderV2::Big);
        assert_eq!(data_type.to_string(), ">u2");

        // single byte types normalise to `|`
        assert_eq!("<u1".parse::<DataTypeV2>().unwrap().to_string(), "|u1");
        assert_eq!("|b1".parse::<DataTypeV2>().unwrap().kind(), DataTypeKindV2::Bool);
        assert_eq!("|S12".parse::<DataTypeV2>().unwrap().size(), 12);

        assert!("f8".parse::<DataTypeV2>().is_err());
        assert!("<f3".parse::<DataTypeV2>().is_err());
        assert!("<x4".parse::<DataTypeV2>().is_err());
        assert!("|i4".parse::<DataTypeV2>().is_err());
        assert!("<i".parse::<DataTypeV2>().is_err());
        assert!("".parse::<DataTypeV2>().is_err());
    }

    #[test]
    fn data_type_v2_serde() {
        let data_type: DataTypeV2 = serde_json::from_str(r#""<i4""#).unwrap();
        assert_eq!(data_type, DataTypeV2::little(DataTypeKindV2::Int, 4).unwrap());
        assert_eq!(serde_json::to_string(&data_type).unwrap(), r#""<i4""#);
        assert!(serde_json::from_str::<DataTypeV2>(r#""<q4""#).is_err());
    }

    #[test]
    fn data_type_v2_native() {
        assert!(ByteOrderV2::NotApplicable.is_native());
        assert!(ByteOrderV2::NATIVE.is_native());
        if cfg!(target_endian = "little") {
            assert!(!ByteOrderV2::Big.is_native());
        }
    }
}
