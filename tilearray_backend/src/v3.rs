//! Zarr V3 style chunked arrays.
//!
//! Coordinates are 64-bit unsigned integers and element types are identified by name.
//! Region reads return the materialised bytes with their [`Region`] shape.

mod array;
mod array_view;
mod data_type;
mod metadata;

pub use array::{ArrayV3Error, ArrayV3Traits, Region};
pub use array_view::{ArrayView, ArrayViewCreateError};
pub use data_type::{DataTypeV3, DataTypeV3NameError};
pub use metadata::ArrayMetadataV3;
