//! The shared numeric data type enumeration.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A numeric element type.
///
/// This is the fixed set of element types that can be read or written through a tile handle.
/// It is serialised as its name, e.g. `"float32"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// `float64` IEEE 754 double-precision floating point.
    Float64,
    /// `float32` IEEE 754 single-precision floating point.
    Float32,
    /// `int32` signed integer.
    Int32,
    /// `uint32` unsigned integer.
    UInt32,
    /// `int16` signed integer.
    Int16,
    /// `uint16` unsigned integer.
    UInt16,
    /// `int8` signed integer.
    Int8,
    /// `uint8` unsigned integer.
    UInt8,
}

/// An unrecognised data type name.
#[derive(Clone, Debug, Error)]
#[error("unrecognised data type name {0:?}")]
pub struct DataTypeNameError(String);

impl DataTypeNameError {
    /// Create a new [`DataTypeNameError`].
    #[must_use]
    pub fn new(name: String) -> Self {
        Self(name)
    }

    /// Return the unrecognised name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl DataType {
    /// All supported data types, widest first.
    pub const ALL: [Self; 8] = [
        Self::Float64,
        Self::Float32,
        Self::Int32,
        Self::UInt32,
        Self::Int16,
        Self::UInt16,
        Self::Int8,
        Self::UInt8,
    ];

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

    /// Returns true if the data type can represent negative values.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        !matches!(self, Self::UInt32 | Self::UInt16 | Self::UInt8)
    }

    /// Returns true for floating point data types.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float64 | Self::Float32)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = DataTypeNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.name() == name)
            .ok_or_else(|| DataTypeNameError::new(name.to_string()))
    }
}
