//! Three-dimensional scalar image

use crate::error::{Error, Result};
use crate::image::{Image2D, ImageStatistics, ScalarElement};
use ndarray::{Array3, ArrayView2, ArrayView3, ArrayViewMut2, ArrayViewMut3, Axis};

/// A 3D grid of scalar values.
///
/// Values are stored in an [`Array3`] indexed `[[z, y, x]]`, so each z-plane
/// is a contiguous 2D slice. Public accessors take `(x, y, z)` coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Image3D<T: ScalarElement> {
    data: Array3<T>,
}

impl<T: ScalarElement> Image3D<T> {
    /// Create a new image filled with zeros
    pub fn new(size_x: usize, size_y: usize, size_z: usize) -> Self {
        Self {
            data: Array3::zeros((size_z, size_y, size_x)),
        }
    }

    /// Create a new image filled with a specific value
    pub fn filled(size_x: usize, size_y: usize, size_z: usize, value: T) -> Self {
        Self {
            data: Array3::from_elem((size_z, size_y, size_x), value),
        }
    }

    /// Create an image from data ordered plane by plane, then row by row
    pub fn from_vec(data: Vec<T>, size_x: usize, size_y: usize, size_z: usize) -> Result<Self> {
        if data.len() != size_x * size_y * size_z {
            return Err(Error::InvalidDimensions {
                shape: vec![size_x, size_y, size_z],
                len: data.len(),
            });
        }

        let array = Array3::from_shape_vec((size_z, size_y, size_x), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create an image from an ndarray indexed `[[z, y, x]]`
    pub fn from_array(data: Array3<T>) -> Self {
        Self { data }
    }

    /// Create an image by evaluating `f(x, y, z)` at every position
    pub fn from_fn<F>(size_x: usize, size_y: usize, size_z: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        Self {
            data: Array3::from_shape_fn((size_z, size_y, size_x), |(z, y, x)| f(x, y, z)),
        }
    }

    // Dimensions

    pub fn size_x(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn size_y(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn size_z(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Dimensions as `[size_x, size_y, size_z]`
    pub fn size(&self) -> [usize; 3] {
        [self.size_x(), self.size_y(), self.size_z()]
    }

    /// Always 3
    pub fn dimensionality(&self) -> usize {
        3
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image has no voxels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (x, y, z)
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<T> {
        self.data
            .get((z, y, x))
            .copied()
            .ok_or_else(|| Error::IndexOutOfBounds {
                index: vec![x, y, z],
                shape: self.size().to_vec(),
            })
    }

    /// Set value at (x, y, z)
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) -> Result<()> {
        let shape = self.size();
        match self.data.get_mut((z, y, x)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                index: vec![x, y, z],
                shape: shape.to_vec(),
            }),
        }
    }

    /// Set every voxel to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// View of the z-plane at `z`
    pub fn slice(&self, z: usize) -> Result<ArrayView2<'_, T>> {
        self.check_plane(z)?;
        Ok(self.data.index_axis(Axis(0), z))
    }

    /// Mutable view of the z-plane at `z`; writes reach this image
    pub fn slice_mut(&mut self, z: usize) -> Result<ArrayViewMut2<'_, T>> {
        self.check_plane(z)?;
        Ok(self.data.index_axis_mut(Axis(0), z))
    }

    /// Copy the z-plane at `z` into a new 2D image
    pub fn slice_image(&self, z: usize) -> Result<Image2D<T>> {
        Ok(Image2D::from_array(self.slice(z)?.to_owned()))
    }

    /// Overwrite the z-plane at `z` with the content of `plane`
    pub fn set_slice(&mut self, z: usize, plane: &Image2D<T>) -> Result<()> {
        let expected = [self.size_x(), self.size_y()];
        if plane.size() != expected {
            return Err(Error::SizeMismatch {
                expected: expected.to_vec(),
                actual: plane.size().to_vec(),
            });
        }
        self.slice_mut(z)?.assign(plane.data());
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array3<T> {
        &mut self.data
    }

    /// Consume the image and return the underlying array
    pub fn into_array(self) -> Array3<T> {
        self.data
    }

    /// Calculate basic statistics (min, max, mean)
    pub fn statistics(&self) -> ImageStatistics<T> {
        ImageStatistics::from_values(self.data.iter().copied())
    }

    fn check_plane(&self, z: usize) -> Result<()> {
        if z >= self.size_z() {
            return Err(Error::IndexOutOfBounds {
                index: vec![0, 0, z],
                shape: self.size().to_vec(),
            });
        }
        Ok(())
    }
}
