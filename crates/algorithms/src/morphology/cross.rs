//! 3x3 cross structuring elements
//!
//! The plain cross covers the anchor and its four direct neighbors. The
//! shifted variants cover the same plus shape translated by one pixel, so
//! that the anchor sits on one of the arm tips; chaining them moves the anchor
//! of a diamond away from its centre.

use ndarray::{Array2, ArrayViewMut2};
use surtmorph_core::{ProgressEvent, ProgressListener};

use super::buffer::Extremum;
use super::histogram::MorphElement;
use super::strel::{filter_by_copy, InPlaceStrel2D, Strel2D};

const CROSS_ARMS: [[isize; 2]; 5] = [[0, -1], [-1, 0], [0, 0], [1, 0], [0, 1]];

fn cross_mask() -> Array2<bool> {
    Array2::from_shape_fn((3, 3), |(y, x)| x == 1 || y == 1)
}

/// Filter `image` in place with the cross whose centre sits at `shift`
/// relative to the output pixel.
///
/// Rows are processed top to bottom. The cross reaches at most two rows above
/// the current one, whose original values are kept in row buffers since the
/// image already holds their filtered values; rows below are still intact.
fn cross_sweep<T: MorphElement>(
    mut image: ArrayViewMut2<'_, T>,
    shift: [isize; 2],
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) {
    if image.is_empty() {
        return;
    }
    let (size_y, size_x) = image.dim();
    let sentinel = mode.sentinel::<T>();
    let arms = CROSS_ARMS.map(|[dx, dy]| [dx + shift[0], dy + shift[1]]);

    let mut above2 = vec![sentinel; size_x];
    let mut above1 = vec![sentinel; size_x];
    let mut current = vec![sentinel; size_x];
    let mut result = vec![sentinel; size_x];

    for y in 0..size_y {
        for (slot, &value) in current.iter_mut().zip(image.row(y)) {
            *slot = value;
        }

        for (x, out) in result.iter_mut().enumerate() {
            let mut best = sentinel;
            for &[dx, dy] in &arms {
                let xx = x as isize + dx;
                let yy = y as isize + dy;
                if xx < 0 || xx >= size_x as isize || yy < 0 || yy >= size_y as isize {
                    continue;
                }
                let xx = xx as usize;
                let value = match dy {
                    -2 => above2[xx],
                    -1 => above1[xx],
                    0 => current[xx],
                    _ => image[[yy as usize, xx]],
                };
                if mode.beats(value, best) {
                    best = value;
                }
            }
            *out = best;
        }

        for (target, &value) in image.row_mut(y).iter_mut().zip(&result) {
            *target = value;
        }
        std::mem::swap(&mut above2, &mut above1);
        std::mem::swap(&mut above1, &mut current);

        listener.on_progress(&ProgressEvent::new(label, y + 1, size_y));
    }
}

/// Plus-shaped 3x3 strel anchored at its centre
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cross3x3Strel;

impl Cross3x3Strel {
    pub fn new() -> Self {
        Self
    }
}

impl Strel2D for Cross3x3Strel {
    fn name(&self) -> &'static str {
        "Cross3x3"
    }

    fn size(&self) -> [usize; 2] {
        [3, 3]
    }

    fn offset(&self) -> [usize; 2] {
        [1, 1]
    }

    fn mask(&self) -> Array2<bool> {
        cross_mask()
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        CROSS_ARMS.to_vec()
    }

    fn reverse(&self) -> Self {
        *self
    }

    filter_by_copy!(Image2D);
}

impl InPlaceStrel2D for Cross3x3Strel {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        cross_sweep(image, [0, 0], Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        cross_sweep(image, [0, 0], Extremum::Min, self.name(), listener);
    }
}

/// Side of the anchor on which the cross centre lies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Position of the cross centre relative to the anchor, `[dx, dy]`
    pub fn translation(self) -> [isize; 2] {
        match self {
            Direction::Left => [-1, 0],
            Direction::Right => [1, 0],
            Direction::Up => [0, -1],
            Direction::Down => [0, 1],
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// 3x3 cross anchored on the tip of one arm.
///
/// `Direction::Left` puts the cross centre one pixel left of the anchor, so
/// the anchor is the right arm tip, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedCross3x3Strel {
    direction: Direction,
}

impl ShiftedCross3x3Strel {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Strel2D for ShiftedCross3x3Strel {
    fn name(&self) -> &'static str {
        "ShiftedCross3x3"
    }

    fn size(&self) -> [usize; 2] {
        [3, 3]
    }

    fn offset(&self) -> [usize; 2] {
        let [tx, ty] = self.direction.translation();
        [(1 - tx) as usize, (1 - ty) as usize]
    }

    fn mask(&self) -> Array2<bool> {
        cross_mask()
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        let [tx, ty] = self.direction.translation();
        CROSS_ARMS.iter().map(|&[dx, dy]| [dx + tx, dy + ty]).collect()
    }

    fn reverse(&self) -> Self {
        Self::new(self.direction.opposite())
    }

    filter_by_copy!(Image2D);
}

impl InPlaceStrel2D for ShiftedCross3x3Strel {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        let shift = self.direction.translation();
        cross_sweep(image, shift, Extremum::Max, self.name(), listener);
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        let shift = self.direction.translation();
        cross_sweep(image, shift, Extremum::Min, self.name(), listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::mask::MaskStrel2D;
    use surtmorph_core::Image2D;

    const DIRECTIONS: [Direction; 4] =
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    fn noise(size_x: usize, size_y: usize) -> Image2D<i16> {
        Image2D::from_fn(size_x, size_y, |x, y| {
            ((x as i16 * 53 + y as i16 * 29 + (x * y) as i16 * 7) % 97) - 40
        })
    }

    #[test]
    fn test_cross_dilation_spike() {
        let mut image = Image2D::new(5, 5);
        image.set(2, 2, 7u8).unwrap();
        let result = Cross3x3Strel.dilation(&image);
        let lit: Vec<_> = result
            .data()
            .indexed_iter()
            .filter(|(_, v)| **v == 7)
            .map(|((y, x), _)| (x, y))
            .collect();
        assert_eq!(lit, vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);
    }

    #[test]
    fn test_cross_matches_neighbor_scan() {
        for (size_x, size_y) in [(6, 5), (1, 4), (4, 1), (2, 2)] {
            let image = noise(size_x, size_y);
            let reference = MaskStrel2D::from_strel(&Cross3x3Strel);
            assert_eq!(Cross3x3Strel.dilation(&image), reference.dilation(&image));
            assert_eq!(Cross3x3Strel.erosion(&image), reference.erosion(&image));
        }
    }

    #[test]
    fn test_shifted_cross_matches_neighbor_scan() {
        for (size_x, size_y) in [(7, 6), (2, 5), (5, 2), (1, 1)] {
            let image = noise(size_x, size_y);
            for direction in DIRECTIONS {
                let strel = ShiftedCross3x3Strel::new(direction);
                let reference = MaskStrel2D::from_strel(&strel);
                assert_eq!(
                    strel.dilation(&image),
                    reference.dilation(&image),
                    "dilation {:?} on {}x{}",
                    direction,
                    size_x,
                    size_y
                );
                assert_eq!(
                    strel.erosion(&image),
                    reference.erosion(&image),
                    "erosion {:?} on {}x{}",
                    direction,
                    size_x,
                    size_y
                );
            }
        }
    }

    #[test]
    fn test_shifted_cross_geometry() {
        let left = ShiftedCross3x3Strel::new(Direction::Left);
        assert_eq!(left.offset(), [2, 1]);
        assert_eq!(ShiftedCross3x3Strel::new(Direction::Down).offset(), [1, 0]);
        assert_eq!(left.reverse().direction(), Direction::Right);
        assert_eq!(left.reverse().offset(), [0, 1]);
        for direction in DIRECTIONS {
            let strel = ShiftedCross3x3Strel::new(direction);
            let mut declared = strel.shifts();
            let mut derived = crate::morphology::strel::shifts_from_mask_2d(
                &strel.mask(),
                strel.offset(),
            );
            declared.sort();
            derived.sort();
            assert_eq!(declared, derived, "{:?}", direction);
            assert_eq!(strel.reverse().reverse(), strel);
        }
    }

    #[test]
    fn test_cross_reverse_is_identity() {
        assert_eq!(Cross3x3Strel.reverse(), Cross3x3Strel);
    }
}
