use thiserror::Error;
use tilearray_data_type::{DataType, Element, transmute_to_bytes};

/// An array view creation error.
#[derive(Clone, Debug, Error)]
pub enum ArrayViewCreateError {
    /// The element type does not match the declared data type.
    #[error("element type {element} is incompatible with declared data type {data_type}")]
    IncompatibleElementType {
        /// The data type of the elements.
        element: DataType,
        /// The declared data type.
        data_type: DataType,
    },
    /// The number of elements does not match the shape.
    #[error("got {got} elements, expected {expected} for shape {shape:?}")]
    InvalidLength {
        /// The number of elements.
        got: usize,
        /// The number of elements implied by the shape.
        expected: u64,
        /// The shape of the view.
        shape: Vec<u64>,
    },
}

/// A typed view of in-memory elements with a shape, used for region writes.
#[derive(Clone, Debug)]
pub struct ArrayView<'a> {
    data_type: DataType,
    shape: Vec<u64>,
    bytes: &'a [u8],
}

impl<'a> ArrayView<'a> {
    /// Create a new array view of `elements` tagged with `data_type`.
    ///
    /// # Errors
    /// Returns an [`ArrayViewCreateError`] if `T` is not an element of `data_type` or the number of elements does not match `shape`.
    pub fn new<T: Element>(
        data_type: DataType,
        shape: Vec<u64>,
        elements: &'a [T],
    ) -> Result<Self, ArrayViewCreateError> {
        if T::DATA_TYPE != data_type {
            return Err(ArrayViewCreateError::IncompatibleElementType {
                element: T::DATA_TYPE,
                data_type,
            });
        }
        let expected: u64 = shape.iter().product();
        if elements.len() as u64 != expected {
            return Err(ArrayViewCreateError::InvalidLength {
                got: elements.len(),
                expected,
                shape,
            });
        }
        Ok(Self {
            data_type,
            shape,
            bytes: transmute_to_bytes(elements),
        })
    }

    /// Returns the data type of the view.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the shape of the view.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Returns the elements of the view as native-endian bytes.
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_view() {
        let elements = [1.0f32, 2.0, 3.0, 4.0];
        let view = ArrayView::new(DataType::Float32, vec![2, 2], &elements).unwrap();
        assert_eq!(view.data_type(), DataType::Float32);
        assert_eq!(view.shape(), &[2, 2]);
        assert_eq!(view.bytes().len(), 16);

        assert!(matches!(
            ArrayView::new(DataType::Int32, vec![2], &[1u32, 2]),
            Err(ArrayViewCreateError::IncompatibleElementType {
                element: DataType::UInt32,
                data_type: DataType::Int32
            })
        ));
        assert!(matches!(
            ArrayView::new(DataType::Float32, vec![3], &elements),
            Err(ArrayViewCreateError::InvalidLength { got: 4, expected: 3, .. })
        ));
    }
}
