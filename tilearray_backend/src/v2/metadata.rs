use serde::{Deserialize, Serialize};

use super::{ArrayV2Error, DataTypeV2};

/// The subset of Zarr V2 array metadata needed to create an array.
///
/// For example:
/// ```json
/// {
///     "shape": [10000, 1000],
///     "chunks": [1000, 100],
///     "dtype": "<f8"
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ArrayMetadataV2 {
    /// The shape of the array.
    pub shape: Vec<i32>,
    /// The chunk shape of the array.
    pub chunks: Vec<i32>,
    /// The data type of the array.
    pub dtype: DataTypeV2,
}

impl ArrayMetadataV2 {
    /// Create new array metadata.
    #[must_use]
    pub fn new(shape: Vec<i32>, chunks: Vec<i32>, dtype: DataTypeV2) -> Self {
        Self {
            shape,
            chunks,
            dtype,
        }
    }

    /// Parse array metadata from JSON.
    ///
    /// Unknown fields are ignored.
    ///
    /// # Errors
    /// Returns [`ArrayV2Error::InvalidMetadata`] if the JSON is not valid array metadata.
    pub fn from_json(json: &str) -> Result<Self, ArrayV2Error> {
        serde_json::from_str(json).map_err(|err| ArrayV2Error::InvalidMetadata(err.to_string()))
    }

    /// Validate the metadata.
    ///
    /// # Errors
    /// Returns [`ArrayV2Error::InvalidMetadata`] if the shape and chunks differ in dimensionality, the shape is negative, or the chunks are not positive.
    pub fn validate(&self) -> Result<(), ArrayV2Error> {
        if self.shape.len() != self.chunks.len() {
            Err(ArrayV2Error::InvalidMetadata(format!(
                "chunks {:?} do not match the dimensionality of shape {:?}",
                self.chunks, self.shape
            )))
        } else if self.shape.iter().any(|&size| size < 0) {
            Err(ArrayV2Error::InvalidMetadata(format!(
                "shape {:?} must be non-negative",
                self.shape
            )))
        } else if self.chunks.iter().any(|&size| size <= 0) {
            Err(ArrayV2Error::InvalidMetadata(format!(
                "chunks {:?} must be positive",
                self.chunks
            )))
        } else {
            Ok(())
        }
    }
}
