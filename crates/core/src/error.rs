//! Error types for SurtMorph

use thiserror::Error;

/// Main error type for SurtMorph operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid image dimensions: shape {shape:?} cannot hold {len} values")]
    InvalidDimensions { shape: Vec<usize>, len: usize },

    #[error("Index out of bounds: {index:?} in image of size {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("Image size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for SurtMorph operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = Error::invalid_parameter("size", 0, "size must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: size = 0 (size must be at least 1)"
        );
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = Error::IndexOutOfBounds {
            index: vec![5, 1],
            shape: vec![4, 4],
        };
        assert_eq!(
            err.to_string(),
            "Index out of bounds: [5, 1] in image of size [4, 4]"
        );
    }
}
