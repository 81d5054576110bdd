//! Chunked array backend interfaces for the `tilearray` crate.
//!
//! Two incompatible chunked array formats are supported:
//!  - [`v2`]: Zarr V2 style arrays with 32-bit signed coordinates and numpy style data type tags (e.g. `<f8`, `|u1`).
//!    Regions are read into and written from caller provided buffers.
//!  - [`v3`]: Zarr V3 style arrays with 64-bit coordinates and named data types (e.g. `float32`).
//!    Region reads return the materialised bytes together with the shape of the region, which may be clipped at the array boundary.
//!
//! Real storage engines implement [`ArrayV2Traits`] or [`ArrayV3Traits`].
//! This crate includes in-memory implementations of both in [`store`].
//!
//! ## Licence
//! `tilearray_backend` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

pub mod array_subset;
pub mod store;
pub mod v2;
pub mod v3;

pub use array_subset::{ArraySubset, ArraySubsetError, IncompatibleDimensionalityError};
pub use v2::{ArrayMetadataV2, ArrayV2Error, ArrayV2Traits, ByteOrderV2, DataTypeKindV2, DataTypeV2};
pub use v3::{
    ArrayMetadataV3, ArrayV3Error, ArrayV3Traits, ArrayView, ArrayViewCreateError, DataTypeV3,
    Region,
};

/// The type for bytes returned by region reads.
///
/// An alias for [`bytes::Bytes`].
pub type Bytes = bytes::Bytes;
