//! The shared numeric data type API for the `tilearray` crates.
//!
//! Every backend exposes its own native data type enumeration.
//! This crate defines the [`DataType`] those native types are mapped to and the [`Element`] trait tying a Rust primitive to exactly one [`DataType`].
//!
//! ## Licence
//! `tilearray_data_type` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

mod data_type;
mod element;

pub use data_type::{DataType, DataTypeNameError};
pub use element::{
    Element, convert_from_bytes_slice, transmute_to_bytes, transmute_to_bytes_mut,
};
