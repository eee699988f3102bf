//! Diagonal linear structuring elements
//!
//! A down-diagonal segment covers cells `(i, i)`; an up-diagonal segment
//! covers `(i, size - 1 - i)`, i.e. it climbs as x grows. Both are swept one
//! diagonal at a time. Every diagonal intersecting the image is addressed by
//! its intercept `d = x - y` and turned into a 1D view by slicing the image at
//! the diagonal's first cell and taking the main diagonal of that sub-view,
//! which clips the sweep parameter to the rectangle. Up-diagonals are
//! down-diagonals of the view with the y axis flipped.

use ndarray::{s, Array2, ArrayViewMut1, ArrayViewMut2};
use surtmorph_core::{ProgressEvent, ProgressListener, Result};

use super::buffer::{Extremum, LocalExtremumBuffer};
use super::histogram::MorphElement;
use super::linear::sweep_line;
use super::strel::{filter_by_copy, validate_offset, validate_size, InPlaceStrel2D, Strel2D};

/// Call `f` on every down-diagonal (`x - y` constant) of `image`, from the
/// bottom-left corner to the top-right corner
fn for_each_down_diagonal<T, F>(mut image: ArrayViewMut2<'_, T>, mut f: F)
where
    F: FnMut(usize, usize, ArrayViewMut1<'_, T>),
{
    let (size_y, size_x) = image.dim();
    if size_x == 0 || size_y == 0 {
        return;
    }
    let total = size_x + size_y - 1;
    for (i, d) in (1 - size_y as isize..size_x as isize).enumerate() {
        let (x0, y0) = if d >= 0 {
            (d as usize, 0)
        } else {
            (0, (-d) as usize)
        };
        let mut sub = image.slice_mut(s![y0.., x0..]);
        f(i, total, sub.diag_mut());
    }
}

fn sweep_diagonals<T: MorphElement>(
    image: ArrayViewMut2<'_, T>,
    size: usize,
    offset: usize,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) {
    if size <= 1 {
        return;
    }
    let mut buffer = LocalExtremumBuffer::new(size, mode);
    for_each_down_diagonal(image, |i, total, line| {
        sweep_line(line, &mut buffer, offset);
        listener.on_progress(&ProgressEvent::new(label, i + 1, total));
    });
}

/// Diagonal segment going down-right, cells `(i, i)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDiagDownStrel {
    pub(crate) size: usize,
    pub(crate) offset: usize,
}

impl LinearDiagDownStrel {
    /// Segment anchored at its middle cell, `(size - 1) / 2`
    pub fn new(size: usize) -> Result<Self> {
        Self::with_offset(size, size.saturating_sub(1) / 2)
    }

    /// `offset` is the index of the anchor cell along the segment
    pub fn with_offset(size: usize, offset: usize) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset", size, offset)?;
        Ok(Self { size, offset })
    }

    pub fn length(&self) -> usize {
        self.size
    }
}

impl Strel2D for LinearDiagDownStrel {
    fn name(&self) -> &'static str {
        "LinearDiagDown"
    }

    fn size(&self) -> [usize; 2] {
        [self.size, self.size]
    }

    fn offset(&self) -> [usize; 2] {
        [self.offset, self.offset]
    }

    fn mask(&self) -> Array2<bool> {
        Array2::from_shape_fn((self.size, self.size), |(y, x)| x == y)
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        (0..self.size)
            .map(|i| {
                let d = i as isize - self.offset as isize;
                [d, d]
            })
            .collect()
    }

    fn reverse(&self) -> Self {
        Self {
            size: self.size,
            offset: self.size - 1 - self.offset,
        }
    }

    filter_by_copy!(Image2D);
}

impl InPlaceStrel2D for LinearDiagDownStrel {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_diagonals(image, self.size, self.offset, Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_diagonals(image, self.size, self.offset, Extremum::Min, self.name(), listener);
    }
}

/// Diagonal segment going up-right, cells `(i, size - 1 - i)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDiagUpStrel {
    pub(crate) size: usize,
    pub(crate) offset: usize,
}

impl LinearDiagUpStrel {
    /// Segment anchored at its middle cell, `(size - 1) / 2`
    pub fn new(size: usize) -> Result<Self> {
        Self::with_offset(size, size.saturating_sub(1) / 2)
    }

    /// `offset` is the index of the anchor cell along the segment, counted
    /// from the bottom-left end
    pub fn with_offset(size: usize, offset: usize) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset", size, offset)?;
        Ok(Self { size, offset })
    }

    pub fn length(&self) -> usize {
        self.size
    }
}

impl Strel2D for LinearDiagUpStrel {
    fn name(&self) -> &'static str {
        "LinearDiagUp"
    }

    fn size(&self) -> [usize; 2] {
        [self.size, self.size]
    }

    fn offset(&self) -> [usize; 2] {
        [self.offset, self.size - 1 - self.offset]
    }

    fn mask(&self) -> Array2<bool> {
        let last = self.size - 1;
        Array2::from_shape_fn((self.size, self.size), |(y, x)| x + y == last)
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        (0..self.size)
            .map(|i| {
                let d = i as isize - self.offset as isize;
                [d, -d]
            })
            .collect()
    }

    fn reverse(&self) -> Self {
        Self {
            size: self.size,
            offset: self.size - 1 - self.offset,
        }
    }

    filter_by_copy!(Image2D);
}

impl InPlaceStrel2D for LinearDiagUpStrel {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        mut image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        let flipped = image.slice_mut(s![..;-1, ..]);
        sweep_diagonals(flipped, self.size, self.offset, Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        mut image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        let flipped = image.slice_mut(s![..;-1, ..]);
        sweep_diagonals(flipped, self.size, self.offset, Extremum::Min, self.name(), listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::mask::MaskStrel2D;
    use surtmorph_core::Image2D;

    fn ramp(size_x: usize, size_y: usize) -> Image2D<u8> {
        Image2D::from_fn(size_x, size_y, |x, y| ((x * 37 + y * 91 + x * y * 13) % 251) as u8)
    }

    #[test]
    fn test_down_diagonal_spike() {
        let mut image = Image2D::new(5, 5);
        image.set(2, 2, 50u8).unwrap();
        let result = LinearDiagDownStrel::new(3).unwrap().dilation(&image);
        for y in 0..5 {
            for x in 0..5 {
                let expected = if x == y && (1..=3).contains(&x) { 50 } else { 0 };
                assert_eq!(result.get(x, y).unwrap(), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_up_diagonal_spike() {
        let mut image = Image2D::new(5, 5);
        image.set(2, 2, 50u8).unwrap();
        let result = LinearDiagUpStrel::new(3).unwrap().dilation(&image);
        assert_eq!(result.get(1, 3).unwrap(), 50);
        assert_eq!(result.get(3, 1).unwrap(), 50);
        assert_eq!(result.get(1, 1).unwrap(), 0);
        assert_eq!(result.get(3, 3).unwrap(), 0);
    }

    #[test]
    fn test_diagonals_match_neighbor_scan() {
        // rectangular images exercise the clipping of every diagonal
        for (size_x, size_y) in [(7, 4), (4, 7), (1, 5), (6, 6)] {
            let image = ramp(size_x, size_y);
            for size in [2, 3, 4] {
                for offset in 0..size {
                    let up = LinearDiagUpStrel::with_offset(size, offset).unwrap();
                    let down = LinearDiagDownStrel::with_offset(size, offset).unwrap();
                    let up_ref = MaskStrel2D::from_strel(&up);
                    let down_ref = MaskStrel2D::from_strel(&down);
                    assert_eq!(up.dilation(&image), up_ref.dilation(&image));
                    assert_eq!(up.erosion(&image), up_ref.erosion(&image));
                    assert_eq!(down.dilation(&image), down_ref.dilation(&image));
                    assert_eq!(down.erosion(&image), down_ref.erosion(&image));
                }
            }
        }
    }

    #[test]
    fn test_up_diagonal_offset_and_reverse() {
        let strel = LinearDiagUpStrel::with_offset(4, 1).unwrap();
        assert_eq!(strel.offset(), [1, 2]);
        assert_eq!(strel.reverse().offset(), [2, 1]);
        assert!(strel.mask()[[2, 1]]);
        assert_eq!(strel.shifts(), vec![[-1, 1], [0, 0], [1, -1], [2, -2]]);
    }

    #[test]
    fn test_diagonal_progress_counts_all_diagonals() {
        let mut image = ramp(4, 3);
        let mut count = 0;
        let mut listener = |_: &ProgressEvent| count += 1;
        LinearDiagDownStrel::new(3)
            .unwrap()
            .in_place_dilation_with(image.view_mut(), &mut listener);
        assert_eq!(count, 6);
    }
}
