use serde::{Deserialize, Serialize};

use super::{ArrayV3Error, DataTypeV3};

/// The subset of Zarr V3 array metadata needed to create an array.
///
/// For example:
/// ```json
/// {
///     "shape": [10000, 1000],
///     "chunk_shape": [1000, 100],
///     "data_type": "float32"
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ArrayMetadataV3 {
    /// The shape of the array.
    pub shape: Vec<u64>,
    /// The regular chunk shape of the array.
    pub chunk_shape: Vec<i32>,
    /// The data type of the array.
    pub data_type: DataTypeV3,
}

impl ArrayMetadataV3 {
    /// Create new array metadata.
    #[must_use]
    pub fn new(shape: Vec<u64>, chunk_shape: Vec<i32>, data_type: DataTypeV3) -> Self {
        Self {
            shape,
            chunk_shape,
            data_type,
        }
    }

    /// Parse array metadata from JSON.
    ///
    /// Unknown fields are ignored.
    ///
    /// # Errors
    /// Returns [`ArrayV3Error::InvalidMetadata`] if the JSON is not valid array metadata, including an unsupported data type.
    pub fn from_json(json: &str) -> Result<Self, ArrayV3Error> {
        serde_json::from_str(json).map_err(|err| ArrayV3Error::InvalidMetadata(err.to_string()))
    }

    /// Validate the metadata.
    ///
    /// # Errors
    /// Returns [`ArrayV3Error::InvalidMetadata`] if the shape and chunk shape differ in dimensionality or the chunk shape is not positive.
    pub fn validate(&self) -> Result<(), ArrayV3Error> {
        if self.shape.len() != self.chunk_shape.len() {
            Err(ArrayV3Error::InvalidMetadata(format!(
                "chunk shape {:?} does not match the dimensionality of shape {:?}",
                self.chunk_shape, self.shape
            )))
        } else if self.chunk_shape.iter().any(|&size| size <= 0) {
            Err(ArrayV3Error::InvalidMetadata(format!(
                "chunk shape {:?} must be positive",
                self.chunk_shape
            )))
        } else {
            Ok(())
        }
    }
}
