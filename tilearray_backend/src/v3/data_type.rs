use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Zarr V3 data type.
///
/// Only the numeric data types with a fixed size are supported by this backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTypeV3 {
    /// `float64`
    Float64,
    /// `float32`
    Float32,
    /// `int32`
    Int32,
    /// `uint32`
    UInt32,
    /// `int16`
    Int16,
    /// `uint16`
    UInt16,
    /// `int8`
    Int8,
    /// `uint8`
    UInt8,
}

/// An unsupported Zarr V3 data type name.
#[derive(Clone, Debug, Error)]
#[error("unsupported Zarr V3 data type {0:?}")]
pub struct DataTypeV3NameError(String);

impl DataTypeV3 {
    /// Returns the name of the data type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Float64 => "float64",
            Self::Float32 => "float32",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
        }
    }

    /// Returns the size of one element in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Float64 => 8,
            Self::Float32 | Self::Int32 | Self::UInt32 => 4,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int8 | Self::UInt8 => 1,
        }
    }
}

impl Display for DataTypeV3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataTypeV3 {
    type Err = DataTypeV3NameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "float64" => Ok(Self::Float64),
            "float32" => Ok(Self::Float32),
            "int32" => Ok(Self::Int32),
            "uint32" => Ok(Self::UInt32),
            "int16" => Ok(Self::Int16),
            "uint16" => Ok(Self::UInt16),
            "int8" => Ok(Self::Int8),
            "uint8" => Ok(Self::UInt8),
            _ => Err(DataTypeV3NameError(name.to_string())),
        }
    }
}
