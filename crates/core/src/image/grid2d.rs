//! Two-dimensional scalar image

use crate::error::{Error, Result};
use crate::image::ScalarElement;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// A 2D grid of scalar values.
///
/// Values are stored row-major in an [`Array2`] indexed `[[y, x]]`; the
/// public accessors take `(x, y)` coordinates. `Clone` produces a deep,
/// independently mutable copy.
///
/// # Example
///
/// ```
/// use surtmorph_core::Image2D;
///
/// let mut image: Image2D<u8> = Image2D::new(4, 3);
/// image.set(2, 1, 200).unwrap();
/// assert_eq!(image.get(2, 1).unwrap(), 200);
/// assert_eq!(image.size(), [4, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image2D<T: ScalarElement> {
    data: Array2<T>,
}

impl<T: ScalarElement> Image2D<T> {
    /// Create a new image filled with zeros
    pub fn new(size_x: usize, size_y: usize) -> Self {
        Self {
            data: Array2::zeros((size_y, size_x)),
        }
    }

    /// Create a new image filled with a specific value
    pub fn filled(size_x: usize, size_y: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((size_y, size_x), value),
        }
    }

    /// Create an image from row-major data
    pub fn from_vec(data: Vec<T>, size_x: usize, size_y: usize) -> Result<Self> {
        if data.len() != size_x * size_y {
            return Err(Error::InvalidDimensions {
                shape: vec![size_x, size_y],
                len: data.len(),
            });
        }

        let array = Array2::from_shape_vec((size_y, size_x), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create an image from an ndarray indexed `[[y, x]]`
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Create an image by evaluating `f(x, y)` at every position
    pub fn from_fn<F>(size_x: usize, size_y: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self {
            data: Array2::from_shape_fn((size_y, size_x), |(y, x)| f(x, y)),
        }
    }

    // Dimensions

    /// Number of columns
    pub fn size_x(&self) -> usize {
        self.data.ncols()
    }

    /// Number of rows
    pub fn size_y(&self) -> usize {
        self.data.nrows()
    }

    /// Dimensions as `[size_x, size_y]`
    pub fn size(&self) -> [usize; 2] {
        [self.size_x(), self.size_y()]
    }

    /// Always 2
    pub fn dimensionality(&self) -> usize {
        2
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image has no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Result<T> {
        self.data
            .get((y, x))
            .copied()
            .ok_or_else(|| Error::IndexOutOfBounds {
                index: vec![x, y],
                shape: self.size().to_vec(),
            })
    }

    /// Set value at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        let shape = self.size();
        match self.data.get_mut((y, x)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                index: vec![x, y],
                shape: shape.to_vec(),
            }),
        }
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the image and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Calculate basic statistics (min, max, mean)
    pub fn statistics(&self) -> ImageStatistics<T> {
        ImageStatistics::from_values(self.data.iter().copied())
    }
}

/// Basic statistics for an image
#[derive(Debug, Clone)]
pub struct ImageStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub count: usize,
}

impl<T: ScalarElement> ImageStatistics<T> {
    pub(crate) fn from_values(values: impl Iterator<Item = T>) -> Self {
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for value in values {
            if min.map_or(true, |m| value < m) {
                min = Some(value);
            }
            if max.map_or(true, |m| value > m) {
                max = Some(value);
            }
            if let Some(v) = value.to_f64() {
                sum += v;
            }
            count += 1;
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        ImageStatistics {
            min,
            max,
            mean,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_image_creation() {
        let image: Image2D<f32> = Image2D::new(200, 100);
        assert_eq!(image.size_x(), 200);
        assert_eq!(image.size_y(), 100);
        assert_eq!(image.size(), [200, 100]);
        assert_eq!(image.dimensionality(), 2);
    }

    #[test]
    fn test_image_access() {
        let mut image: Image2D<u8> = Image2D::new(10, 5);
        image.set(9, 4, 42).unwrap();
        assert_eq!(image.get(9, 4).unwrap(), 42);
        assert_eq!(image.data()[[4, 9]], 42);
        assert!(image.get(10, 0).is_err());
        assert!(image.set(0, 5, 1).is_err());
    }

    #[test]
    fn test_from_vec_is_row_major() {
        let image = Image2D::from_vec(vec![1u8, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(image.get(2, 0).unwrap(), 3);
        assert_eq!(image.get(0, 1).unwrap(), 4);
        assert!(Image2D::from_vec(vec![1u8, 2, 3], 2, 2).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Image2D::filled(3, 3, 7i32);
        let mut copy = original.clone();
        copy.set(1, 1, -1).unwrap();
        assert_eq!(original.get(1, 1).unwrap(), 7);
        assert_eq!(copy.get(1, 1).unwrap(), -1);
    }

    #[test]
    fn test_image_statistics() {
        let image = Image2D::from_fn(10, 10, |x, y| (y * 10 + x) as f32);
        let stats = image.statistics();
        assert_eq!(stats.min, Some(0.0));
        assert_eq!(stats.max, Some(99.0));
        assert_eq!(stats.count, 100);
        assert_relative_eq!(stats.mean.unwrap(), 49.5, epsilon = 1e-10);
    }
}
