//! Zarr V2 style chunked arrays.
//!
//! Coordinates are 32-bit signed integers and element types are identified by numpy style data type tags.

mod array;
mod data_type;
mod metadata;

pub use array::{ArrayV2Error, ArrayV2Traits};
pub use data_type::{ByteOrderV2, DataTypeKindV2, DataTypeV2, DataTypeV2ParseError};
pub use metadata::ArrayMetadataV2;
