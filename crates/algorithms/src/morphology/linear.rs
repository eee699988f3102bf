//! Linear structuring elements along the image axes
//!
//! Each line of the image (row, column or z-lane) is swept once with a
//! [`LocalExtremumBuffer`] as long as the strel, so the cost per pixel does
//! not depend on the strel length.

use ndarray::{
    Array2, Array3, ArrayViewMut, ArrayViewMut1, ArrayViewMut2, ArrayViewMut3, Axis, Dimension,
};
use surtmorph_core::{ProgressEvent, ProgressListener, Result};

use super::buffer::{Extremum, LocalExtremumBuffer};
use super::histogram::MorphElement;
use super::strel::{
    filter_by_copy, validate_offset, validate_size, InPlaceStrel2D, InPlaceStrel3D, Strel2D,
    Strel3D,
};

/// Filter one line in place.
///
/// Output at position `i` is the extremum of the input over
/// `[i - offset, i - offset + size - 1]`, where `size` is the buffer length.
/// Positions beyond either end of the line contribute the sentinel.
pub(crate) fn sweep_line<T: MorphElement>(
    mut line: ArrayViewMut1<'_, T>,
    buffer: &mut LocalExtremumBuffer<T>,
    offset: usize,
) {
    let len = line.len();
    let lead = buffer.len() - 1 - offset;
    let sentinel = buffer.mode().sentinel::<T>();

    buffer.fill(sentinel);
    // The window may reach past the end of a short line before the sweep starts
    for i in 0..lead {
        buffer.add(if i < len { line[i] } else { sentinel });
    }

    for i in 0..len {
        let ahead = i + lead;
        buffer.add(if ahead < len { line[ahead] } else { sentinel });
        line[i] = buffer.extremum();
    }
}

/// Run [`sweep_line`] over every lane of `image` along `axis`
fn sweep_lanes<T, D>(
    mut image: ArrayViewMut<'_, T, D>,
    axis: Axis,
    size: usize,
    offset: usize,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) where
    T: MorphElement,
    D: Dimension,
{
    if size <= 1 || image.is_empty() {
        return;
    }
    let total = image.len() / image.len_of(axis);
    let mut buffer = LocalExtremumBuffer::new(size, mode);
    for (i, lane) in image.lanes_mut(axis).into_iter().enumerate() {
        sweep_line(lane, &mut buffer, offset);
        listener.on_progress(&ProgressEvent::new(label, i + 1, total));
    }
}

/// Horizontal segment of `size` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearHorizontalStrel {
    pub(crate) size: usize,
    pub(crate) offset: usize,
}

impl LinearHorizontalStrel {
    /// Segment anchored at its middle pixel, `(size - 1) / 2`
    pub fn new(size: usize) -> Result<Self> {
        Self::with_offset(size, size.saturating_sub(1) / 2)
    }

    pub fn with_offset(size: usize, offset: usize) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset", size, offset)?;
        Ok(Self { size, offset })
    }

    /// Number of pixels of the segment
    pub fn length(&self) -> usize {
        self.size
    }
}

impl Strel2D for LinearHorizontalStrel {
    fn name(&self) -> &'static str {
        "LinearHorizontal"
    }

    fn size(&self) -> [usize; 2] {
        [self.size, 1]
    }

    fn offset(&self) -> [usize; 2] {
        [self.offset, 0]
    }

    fn mask(&self) -> Array2<bool> {
        Array2::from_elem((1, self.size), true)
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        (0..self.size)
            .map(|i| [i as isize - self.offset as isize, 0])
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

impl InPlaceStrel2D for LinearHorizontalStrel {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_lanes(image, Axis(1), self.size, self.offset, Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_lanes(image, Axis(1), self.size, self.offset, Extremum::Min, self.name(), listener);
    }
}

/// Vertical segment of `size` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearVerticalStrel {
    pub(crate) size: usize,
    pub(crate) offset: usize,
}

impl LinearVerticalStrel {
    /// Segment anchored at its middle pixel, `(size - 1) / 2`
    pub fn new(size: usize) -> Result<Self> {
        Self::with_offset(size, size.saturating_sub(1) / 2)
    }

    pub fn with_offset(size: usize, offset: usize) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset", size, offset)?;
        Ok(Self { size, offset })
    }

    pub fn length(&self) -> usize {
        self.size
    }
}

impl Strel2D for LinearVerticalStrel {
    fn name(&self) -> &'static str {
        "LinearVertical"
    }

    fn size(&self) -> [usize; 2] {
        [1, self.size]
    }

    fn offset(&self) -> [usize; 2] {
        [0, self.offset]
    }

    fn mask(&self) -> Array2<bool> {
        Array2::from_elem((self.size, 1), true)
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        (0..self.size)
            .map(|i| [0, i as isize - self.offset as isize])
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

impl InPlaceStrel2D for LinearVerticalStrel {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_lanes(image, Axis(0), self.size, self.offset, Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_lanes(image, Axis(0), self.size, self.offset, Extremum::Min, self.name(), listener);
    }
}

/// Segment of `size` voxels along the z axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDepthStrel3D {
    pub(crate) size: usize,
    pub(crate) offset: usize,
}

impl LinearDepthStrel3D {
    /// Segment anchored at its middle voxel, `(size - 1) / 2`
    pub fn new(size: usize) -> Result<Self> {
        Self::with_offset(size, size.saturating_sub(1) / 2)
    }

    pub fn with_offset(size: usize, offset: usize) -> Result<Self> {
        validate_size("size", size)?;
        validate_offset("offset", size, offset)?;
        Ok(Self { size, offset })
    }

    pub fn length(&self) -> usize {
        self.size
    }
}

impl Strel3D for LinearDepthStrel3D {
    fn name(&self) -> &'static str {
        "LinearDepth"
    }

    fn size(&self) -> [usize; 3] {
        [1, 1, self.size]
    }

    fn offset(&self) -> [usize; 3] {
        [0, 0, self.offset]
    }

    fn mask(&self) -> Array3<bool> {
        Array3::from_elem((self.size, 1, 1), true)
    }

    fn shifts(&self) -> Vec<[isize; 3]> {
        (0..self.size)
            .map(|i| [0, 0, i as isize - self.offset as isize])
            .collect()
    }

    fn reverse(&self) -> Self {
        Self {
            size: self.size,
            offset: self.size - 1 - self.offset,
        }
    }

    filter_by_copy!(Image3D);
}

impl InPlaceStrel3D for LinearDepthStrel3D {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_lanes(image, Axis(0), self.size, self.offset, Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        sweep_lanes(image, Axis(0), self.size, self.offset, Extremum::Min, self.name(), listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surtmorph_core::{Image2D, Image3D};

    #[test]
    fn test_horizontal_dilation_window() {
        let image = Image2D::from_vec(vec![1u8, 5, 3, 9, 2], 5, 1).unwrap();
        let strel = LinearHorizontalStrel::with_offset(3, 1).unwrap();
        let result = strel.dilation(&image);
        assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![5, 5, 9, 9, 9]);
    }

    #[test]
    fn test_horizontal_dilation_non_centered() {
        let image = Image2D::from_vec(vec![1u8, 5, 3, 9, 2], 5, 1).unwrap();
        // window [x, x + 2]
        let strel = LinearHorizontalStrel::with_offset(3, 0).unwrap();
        let result = strel.dilation(&image);
        assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![5, 9, 9, 9, 2]);
        // window [x - 2, x]
        let result = strel.reverse().dilation(&image);
        assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![1, 5, 5, 9, 9]);
    }

    #[test]
    fn test_horizontal_erosion_uses_max_sentinel() {
        let image = Image2D::from_vec(vec![4.0f32, 2.0, 8.0, 6.0], 4, 1).unwrap();
        let strel = LinearHorizontalStrel::new(3).unwrap();
        let result = strel.erosion(&image);
        assert_eq!(
            result.data().iter().copied().collect::<Vec<_>>(),
            vec![2.0, 2.0, 2.0, 6.0]
        );
    }

    #[test]
    fn test_window_ahead_past_short_line() {
        // window [x, x + 4] on a 3-pixel row
        let image = Image2D::from_vec(vec![9u8, 0, 0], 3, 1).unwrap();
        let strel = LinearHorizontalStrel::with_offset(5, 0).unwrap();
        let result = strel.dilation(&image);
        assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![9, 0, 0]);

        let image = Image2D::from_vec(vec![0u8, 0, 9], 3, 1).unwrap();
        let result = strel.reverse().erosion(&image);
        assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![0, 0, 0]);
        let result = strel.reverse().dilation(&image);
        assert_eq!(result.data().iter().copied().collect::<Vec<_>>(), vec![0, 0, 9]);
    }

    #[test]
    fn test_strel_longer_than_line() {
        let image = Image2D::from_vec(vec![3u8, 7, 1], 3, 1).unwrap();
        let strel = LinearHorizontalStrel::new(9).unwrap();
        let result = strel.dilation(&image);
        assert!(result.data().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_vertical_dilation_columns() {
        let image = Image2D::from_fn(2, 5, |x, y| if x == 0 && y == 2 { 100u8 } else { 0 });
        let strel = LinearVerticalStrel::new(3).unwrap();
        let result = strel.dilation(&image);
        for y in 0..5 {
            let expected = if (1..=3).contains(&y) { 100 } else { 0 };
            assert_eq!(result.get(0, y).unwrap(), expected, "row {}", y);
            assert_eq!(result.get(1, y).unwrap(), 0);
        }
    }

    #[test]
    fn test_depth_dilation_lanes() {
        let image = Image3D::from_fn(2, 2, 6, |x, y, z| {
            if x == 1 && y == 0 && z == 4 {
                9i16
            } else {
                -1
            }
        });
        let strel = LinearDepthStrel3D::with_offset(3, 2).unwrap();
        let result = strel.dilation(&image);
        // shifts dz in [-2, 0]: voxel z sees z - 2 ..= z
        for z in 0..6 {
            let expected = if (4..=6).contains(&z) { 9 } else { -1 };
            assert_eq!(result.get(1, 0, z).unwrap(), expected, "z = {}", z);
            assert_eq!(result.get(0, 0, z).unwrap(), -1);
        }
    }

    #[test]
    fn test_reverse_involution() {
        let strel = LinearVerticalStrel::with_offset(5, 1).unwrap();
        assert_eq!(strel.reverse().offset(), [0, 3]);
        assert_eq!(strel.reverse().reverse(), strel);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(LinearHorizontalStrel::new(0).is_err());
        assert!(LinearHorizontalStrel::with_offset(3, 3).is_err());
        assert!(LinearDepthStrel3D::with_offset(2, 5).is_err());
    }

    #[test]
    fn test_progress_reports_each_row() {
        let mut image = Image2D::filled(4, 3, 1u8);
        let strel = LinearHorizontalStrel::new(3).unwrap();
        let mut events = Vec::new();
        let mut listener = |e: &ProgressEvent| events.push((e.current, e.total));
        strel.in_place_dilation_with(image.view_mut(), &mut listener);
        assert_eq!(events, vec![(1, 3), (2, 3), (3, 3)]);
    }
}
