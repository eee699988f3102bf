//! Cube structuring element, decomposed into segments along x, y and z

use ndarray::Array3;
use surtmorph_core::Result;

use super::linear::{LinearDepthStrel3D, LinearHorizontalStrel, LinearVerticalStrel};
use super::separable::{
    separable_filters_3d, ElementaryStrel2D, ElementaryStrel3D, SeparableStrel3D,
};
use super::strel::{reverse_offset, validate_offset, validate_size, Strel3D};

/// Cube of side `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeStrel {
    size: usize,
    offset: [usize; 3],
}

impl CubeStrel {
    /// Cube anchored at its centre
    pub fn new(size: usize) -> Result<Self> {
        let center = size.saturating_sub(1) / 2;
        Self::with_offset(size, [center; 3])
    }

    /// Cube anchored at `offset = [x, y, z]`
    pub fn with_offset(size: usize, offset: [usize; 3]) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset_x", size, offset[0])?;
        validate_offset("offset_y", size, offset[1])?;
        validate_offset("offset_z", size, offset[2])?;
        Ok(Self { size, offset })
    }

    pub fn side(&self) -> usize {
        self.size
    }
}

impl SeparableStrel3D for CubeStrel {
    fn decompose(&self) -> Vec<ElementaryStrel3D> {
        if self.size <= 1 {
            return Vec::new();
        }
        vec![
            ElementaryStrel3D::Planar(ElementaryStrel2D::Horizontal(LinearHorizontalStrel {
                size: self.size,
                offset: self.offset[0],
            })),
            ElementaryStrel3D::Planar(ElementaryStrel2D::Vertical(LinearVerticalStrel {
                size: self.size,
                offset: self.offset[1],
            })),
            ElementaryStrel3D::Depth(LinearDepthStrel3D {
                size: self.size,
                offset: self.offset[2],
            }),
        ]
    }
}

impl Strel3D for CubeStrel {
    fn name(&self) -> &'static str {
        "Cube"
    }

    fn size(&self) -> [usize; 3] {
        [self.size; 3]
    }

    fn offset(&self) -> [usize; 3] {
        self.offset
    }

    fn mask(&self) -> Array3<bool> {
        Array3::from_elem((self.size, self.size, self.size), true)
    }

    fn reverse(&self) -> Self {
        Self {
            size: self.size,
            offset: reverse_offset(self.size(), self.offset),
        }
    }

    separable_filters_3d!();
}
