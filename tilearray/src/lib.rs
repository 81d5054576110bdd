//! `tilearray` reads and writes rectangular tiles of Zarr V2 and Zarr V3 style chunked arrays through a single [`ArrayHandle`].
//!
//! The two array formats disagree on coordinate width, data type vocabulary and region I/O conventions:
//!  - Zarr V2 style arrays use 32-bit signed coordinates and numpy style data type tags (e.g. `<f8`, `|u1`), and read regions into caller provided buffers.
//!  - Zarr V3 style arrays use 64-bit unsigned coordinates and named data types (e.g. `float32`), and return region bytes together with the region shape.
//!
//! An [`ArrayHandle`] hides these differences.
//! Tiles are addressed with 32-bit signed shapes and offsets, element types are expressed as a [`DataType`], and backend errors are translated to an [`ArrayHandleError`].
//!
//! Backends implement [`ArrayV2Traits`](backend::ArrayV2Traits) or [`ArrayV3Traits`](backend::ArrayV3Traits).
//! In-memory backends are available in [`backend::store`].
//!
//! ## Example
//! ```
//! # use tilearray::{ArrayHandle, ArrayHandleError, DataType};
//! # use tilearray::backend::store::MemoryArrayV2;
//! let array = MemoryArrayV2::new(vec![10], vec![4], ">u2".parse()?)?;
//! let handle = ArrayHandle::from_v2(&array);
//! assert_eq!(handle.data_type()?, DataType::UInt16);
//!
//! handle.write_elements(&[1u16, 2, 3], &[3], &[2])?;
//! assert_eq!(handle.read_elements::<u16>(&[5], &[0])?, vec![0, 0, 1, 2, 3]);
//!
//! // Tiles must lie within the array
//! assert!(matches!(
//!     handle.read_elements::<u16>(&[5], &[8]),
//!     Err(ArrayHandleError::RangeError(_))
//! ));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Logging
//! `tilearray` logs through the [`log`](https://docs.rs/log) crate and does not install a logger.
//! Tile reads and writes are logged at the debug level.
//!
//! ## Licence
//! `tilearray` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

mod array_handle;
pub mod config;
pub mod coordinates;
pub mod data_type_mapping;
mod error;

pub use array_handle::ArrayHandle;
pub use error::{ArrayHandleError, TileIOError, TileRangeError};
pub use tilearray_data_type::{DataType, Element};

pub use tilearray_backend as backend;
pub use tilearray_data_type as data_type;
