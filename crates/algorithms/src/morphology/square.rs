//! Square structuring element, decomposed into a horizontal and a vertical
//! segment

use ndarray::Array2;
use surtmorph_core::Result;

use super::linear::{LinearHorizontalStrel, LinearVerticalStrel};
use super::separable::{separable_filters_2d, ElementaryStrel2D, SeparableStrel2D};
use super::strel::{reverse_offset, validate_offset, validate_size, Strel2D};

/// Square of side `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareStrel {
    size: usize,
    offset: [usize; 2],
}

impl SquareStrel {
    /// Square anchored at its centre, `(size - 1) / 2` in both directions
    pub fn new(size: usize) -> Result<Self> {
        let center = size.saturating_sub(1) / 2;
        Self::with_offset(size, [center, center])
    }

    /// Square anchored at `offset = [x, y]`
    pub fn with_offset(size: usize, offset: [usize; 2]) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset_x", size, offset[0])?;
        validate_offset("offset_y", size, offset[1])?;
        Ok(Self { size, offset })
    }

    pub fn side(&self) -> usize {
        self.size
    }
}

impl SeparableStrel2D for SquareStrel {
    fn decompose(&self) -> Vec<ElementaryStrel2D> {
        let mut components = Vec::with_capacity(2);
        if self.size > 1 {
            components.push(ElementaryStrel2D::Horizontal(LinearHorizontalStrel {
                size: self.size,
                offset: self.offset[0],
            }));
            components.push(ElementaryStrel2D::Vertical(LinearVerticalStrel {
                size: self.size,
                offset: self.offset[1],
            }));
        }
        components
    }
}

impl Strel2D for SquareStrel {
    fn name(&self) -> &'static str {
        "Square"
    }

    fn size(&self) -> [usize; 2] {
        [self.size, self.size]
    }

    fn offset(&self) -> [usize; 2] {
        self.offset
    }

    fn mask(&self) -> Array2<bool> {
        Array2::from_elem((self.size, self.size), true)
    }

    fn reverse(&self) -> Self {
        Self {
            size: self.size,
            offset: reverse_offset(self.size(), self.offset),
        }
    }

    separable_filters_2d!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::mask::MaskStrel2D;
    use surtmorph_core::Image2D;

    fn checker(size_x: usize, size_y: usize) -> Image2D<u16> {
        Image2D::from_fn(size_x, size_y, |x, y| ((x * 131 + y * 71 + x * y * 17) % 1000) as u16)
    }

    #[test]
    fn test_square_decomposition() {
        let strel = SquareStrel::with_offset(5, [0, 3]).unwrap();
        let parts = strel.decompose();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].offset(), [0, 0]);
        assert_eq!(parts[1].offset(), [0, 3]);
        assert!(SquareStrel::new(1).unwrap().decompose().is_empty());
    }

    #[test]
    fn test_square_matches_dense_mask() {
        let image = checker(9, 7);
        for offset in [[1, 1], [0, 2], [2, 0]] {
            let strel = SquareStrel::with_offset(3, offset).unwrap();
            let reference = MaskStrel2D::from_strel(&strel);
            assert_eq!(strel.dilation(&image), reference.dilation(&image), "{:?}", offset);
            assert_eq!(strel.erosion(&image), reference.erosion(&image), "{:?}", offset);
            assert_eq!(strel.closing(&image), reference.closing(&image), "{:?}", offset);
            assert_eq!(strel.opening(&image), reference.opening(&image), "{:?}", offset);
        }
    }

    #[test]
    fn test_square_reverse() {
        let strel = SquareStrel::with_offset(4, [0, 3]).unwrap();
        assert_eq!(strel.reverse().offset(), [3, 0]);
        assert_eq!(strel.reverse().reverse(), strel);
    }

    #[test]
    fn test_square_validation() {
        assert!(SquareStrel::new(0).is_err());
        assert!(SquareStrel::with_offset(3, [1, 3]).is_err());
    }
}
