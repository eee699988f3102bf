//! Diamond structuring element
//!
//! A diamond of odd side `2r + 1` is the Minkowski sum of `r` 3x3 crosses.
//! Moving the anchor away from the centre replaces some crosses by shifted
//! crosses, one per unit step.

use ndarray::Array2;
use surtmorph_core::{Error, Result};

use super::cross::{Cross3x3Strel, Direction, ShiftedCross3x3Strel};
use super::separable::{separable_filters_2d, ElementaryStrel2D, SeparableStrel2D};
use super::strel::{reverse_offset, validate_size, Strel2D};

/// Diamond (L1 ball) of odd side `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiamondStrel {
    size: usize,
    offset: [usize; 2],
}

impl DiamondStrel {
    /// Diamond anchored at its centre
    pub fn new(size: usize) -> Result<Self> {
        let center = size.saturating_sub(1) / 2;
        Self::with_offset(size, [center, center])
    }

    /// Diamond anchored at `offset = [x, y]`, which must be a diamond cell
    pub fn with_offset(size: usize, offset: [usize; 2]) -> Result<Self> {
        validate_size("size", size)?;
        if size % 2 == 0 {
            return Err(Error::invalid_parameter("size", size, "diamond size must be odd"));
        }
        let radius = (size - 1) / 2;
        if offset[0].abs_diff(radius) + offset[1].abs_diff(radius) > radius {
            return Err(Error::invalid_parameter(
                "offset",
                format!("{:?}", offset),
                "offset must lie inside the diamond",
            ));
        }
        Ok(Self { size, offset })
    }

    /// Number of crosses of the decomposition
    pub fn radius(&self) -> usize {
        (self.size - 1) / 2
    }
}

impl SeparableStrel2D for DiamondStrel {
    fn decompose(&self) -> Vec<ElementaryStrel2D> {
        let radius = self.radius() as isize;
        // position of the diamond centre relative to the anchor
        let tx = radius - self.offset[0] as isize;
        let ty = radius - self.offset[1] as isize;

        let horizontal = if tx > 0 { Direction::Right } else { Direction::Left };
        let vertical = if ty > 0 { Direction::Down } else { Direction::Up };
        let shifted = std::iter::repeat(horizontal)
            .take(tx.unsigned_abs())
            .chain(std::iter::repeat(vertical).take(ty.unsigned_abs()))
            .map(|d| ElementaryStrel2D::ShiftedCross(ShiftedCross3x3Strel::new(d)));

        let plain = (radius - tx.abs() - ty.abs()) as usize;
        shifted
            .chain(std::iter::repeat(ElementaryStrel2D::Cross(Cross3x3Strel)).take(plain))
            .collect()
    }
}

impl Strel2D for DiamondStrel {
    fn name(&self) -> &'static str {
        "Diamond"
    }

    fn size(&self) -> [usize; 2] {
        [self.size, self.size]
    }

    fn offset(&self) -> [usize; 2] {
        self.offset
    }

    fn mask(&self) -> Array2<bool> {
        let radius = self.radius();
        Array2::from_shape_fn((self.size, self.size), |(y, x)| {
            x.abs_diff(radius) + y.abs_diff(radius) <= radius
        })
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
    use crate::morphology::separable::{mask_from_shifts_2d, minkowski_shifts_2d};
    use surtmorph_core::Image2D;

    fn noise(size_x: usize, size_y: usize) -> Image2D<f32> {
        Image2D::from_fn(size_x, size_y, |x, y| {
            ((x * 29 + y * 47 + x * y * 11) % 53) as f32 * 0.5 - 7.0
        })
    }

    #[test]
    fn test_diamond_mask() {
        let strel = DiamondStrel::new(5).unwrap();
        let mask = strel.mask();
        assert_eq!(mask.iter().filter(|&&b| b).count(), 13);
        assert!(mask[[0, 2]]);
        assert!(!mask[[0, 1]]);
        assert_eq!(strel.decompose().len(), 2);
    }

    #[test]
    fn test_diamond_decomposition_matches_mask() {
        for offset in [[2, 2], [0, 2], [3, 1], [2, 4], [1, 1]] {
            let strel = DiamondStrel::with_offset(5, offset).unwrap();
            let shifts = minkowski_shifts_2d(&strel.decompose());
            let mask = mask_from_shifts_2d(&shifts, strel.size(), strel.offset());
            assert_eq!(shifts.len(), 13, "{:?}", offset);
            assert_eq!(mask, strel.mask(), "{:?}", offset);
        }
    }

    #[test]
    fn test_centred_diamond_matches_dense_mask() {
        let image = noise(10, 8);
        let strel = DiamondStrel::new(5).unwrap();
        let reference = MaskStrel2D::from_strel(&strel);
        assert_eq!(strel.dilation(&image), reference.dilation(&image));
        assert_eq!(strel.erosion(&image), reference.erosion(&image));
    }

    #[test]
    fn test_shifted_diamond_matches_dense_mask_inside() {
        let image = noise(14, 12);
        let strel = DiamondStrel::with_offset(5, [0, 2]).unwrap();
        let reference = MaskStrel2D::from_strel(&strel);
        let fast = strel.dilation(&image);
        let dense = reference.dilation(&image);
        for y in 5..7 {
            for x in 5..9 {
                assert_eq!(fast.get(x, y).unwrap(), dense.get(x, y).unwrap(), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_diamond_validation() {
        assert!(DiamondStrel::new(4).is_err());
        assert!(DiamondStrel::new(0).is_err());
        assert!(DiamondStrel::with_offset(5, [0, 0]).is_err());
        assert!(DiamondStrel::with_offset(5, [4, 2]).is_ok());
        assert!(DiamondStrel::new(1).unwrap().decompose().is_empty());
    }

    #[test]
    fn test_diamond_reverse() {
        let strel = DiamondStrel::with_offset(7, [1, 3]).unwrap();
        assert_eq!(strel.reverse().offset(), [5, 3]);
        assert_eq!(strel.reverse().reverse(), strel);
    }
}
