//! Octagon structuring element
//!
//! An octagon of side `size` is the Minkowski sum of a square of side `a`
//! (itself a horizontal and a vertical segment) and two diagonal segments of
//! length `q + 1`, with `size = a + 2q`. The diagonal reach `q` is chosen so
//! that the slanted edges are about as long as the straight ones.
//!
//! The anchor is spread over the four segments: any cell of the footprint can
//! serve as anchor.

use ndarray::Array2;
use surtmorph_core::{Error, Result};

use super::diagonal::{LinearDiagDownStrel, LinearDiagUpStrel};
use super::linear::{LinearHorizontalStrel, LinearVerticalStrel};
use super::separable::{
    mask_from_shifts_2d, minkowski_shifts_2d, separable_filters_2d, ElementaryStrel2D,
    SeparableStrel2D,
};
use super::strel::{validate_size, Strel2D};

/// Square side and diagonal reach `(a, q)` of an octagon of side `size`
fn octagon_geometry(size: usize) -> (usize, usize) {
    let mut q = ((size - 1) as f64 / (2.0 + std::f64::consts::SQRT_2)).round() as usize;
    let mut a = size - 2 * q;
    while q > 0 && a < 2 {
        q -= 1;
        a = size - 2 * q;
    }
    (a, q)
}

/// Octagon of side `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctagonStrel {
    size: usize,
    square: usize,
    reach: usize,
    // anchor index along each segment
    horizontal: usize,
    vertical: usize,
    diag_up: usize,
    diag_down: usize,
}

impl OctagonStrel {
    /// Octagon anchored at its centre, `(size - 1) / 2` in both directions
    pub fn new(size: usize) -> Result<Self> {
        let center = size.saturating_sub(1) / 2;
        Self::with_offset(size, [center, center])
    }

    /// Octagon anchored at `offset = [x, y]`, which must be a cell of the
    /// octagon
    pub fn with_offset(size: usize, offset: [usize; 2]) -> Result<Self> {
        validate_size("size", size)?;
        let (square, reach) = octagon_geometry(size);
        let [ox, oy] = offset;

        // prefer diagonal anchors near the middle of their segments
        let mut candidates: Vec<usize> = (0..=reach).collect();
        candidates.sort_by_key(|&k| (2 * k).abs_diff(reach));

        for &diag_up in &candidates {
            for &diag_down in &candidates {
                let horizontal = ox as isize - (diag_up + diag_down) as isize;
                let vertical = oy as isize - (reach - diag_up + diag_down) as isize;
                if (0..square as isize).contains(&horizontal)
                    && (0..square as isize).contains(&vertical)
                {
                    return Ok(Self {
                        size,
                        square,
                        reach,
                        horizontal: horizontal as usize,
                        vertical: vertical as usize,
                        diag_up,
                        diag_down,
                    });
                }
            }
        }

        Err(Error::invalid_parameter(
            "offset",
            format!("{:?}", offset),
            format!("offset must lie inside the octagon of size {}", size),
        ))
    }

    /// Side of the square part
    pub fn square_side(&self) -> usize {
        self.square
    }

    /// Length of each diagonal segment minus one
    pub fn diagonal_reach(&self) -> usize {
        self.reach
    }
}

impl SeparableStrel2D for OctagonStrel {
    fn decompose(&self) -> Vec<ElementaryStrel2D> {
        let mut components = Vec::with_capacity(4);
        if self.square > 1 {
            components.push(ElementaryStrel2D::Horizontal(LinearHorizontalStrel {
                size: self.square,
                offset: self.horizontal,
            }));
            components.push(ElementaryStrel2D::Vertical(LinearVerticalStrel {
                size: self.square,
                offset: self.vertical,
            }));
        }
        if self.reach > 0 {
            components.push(ElementaryStrel2D::DiagUp(LinearDiagUpStrel {
                size: self.reach + 1,
                offset: self.diag_up,
            }));
            components.push(ElementaryStrel2D::DiagDown(LinearDiagDownStrel {
                size: self.reach + 1,
                offset: self.diag_down,
            }));
        }
        components
    }
}

impl Strel2D for OctagonStrel {
    fn name(&self) -> &'static str {
        "Octagon"
    }

    fn size(&self) -> [usize; 2] {
        [self.size, self.size]
    }

    fn offset(&self) -> [usize; 2] {
        [
            self.horizontal + self.diag_up + self.diag_down,
            self.vertical + (self.reach - self.diag_up) + self.diag_down,
        ]
    }

    fn mask(&self) -> Array2<bool> {
        let shifts = minkowski_shifts_2d(&self.decompose());
        mask_from_shifts_2d(&shifts, self.size(), self.offset())
    }

    fn reverse(&self) -> Self {
        Self {
            horizontal: self.square - 1 - self.horizontal,
            vertical: self.square - 1 - self.vertical,
            diag_up: self.reach - self.diag_up,
            diag_down: self.reach - self.diag_down,
            ..*self
        }
    }

    separable_filters_2d!();
}
