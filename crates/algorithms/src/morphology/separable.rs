//! Separable structuring elements
//!
//! A separable strel is described by an ordered list of elementary strels
//! whose successive application equals filtering by the full shape. Its mask
//! is the Minkowski sum of the component masks.
//!
//! Closing runs the dilation sequence and then the reversed components in
//! reverse order, so that the erosion half is the exact adjoint of the
//! dilation half. Opening is the dual.

use std::collections::BTreeSet;

use ndarray::{s, Array2, Array3, ArrayViewMut2, ArrayViewMut3, Axis};
use surtmorph_core::{Image2D, Image3D, ProgressEvent, ProgressListener};
use tracing::trace;

use super::buffer::Extremum;
use super::cross::{Cross3x3Strel, ShiftedCross3x3Strel};
use super::diagonal::{LinearDiagDownStrel, LinearDiagUpStrel};
use super::histogram::MorphElement;
use super::linear::{LinearDepthStrel3D, LinearHorizontalStrel, LinearVerticalStrel};
use super::planar::in_place_per_slice;
use super::strel::{filter_by_copy, InPlaceStrel2D, InPlaceStrel3D, Strel2D, Strel3D};

/// Planar strels that can be applied in place, one per decomposition step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementaryStrel2D {
    Horizontal(LinearHorizontalStrel),
    Vertical(LinearVerticalStrel),
    DiagUp(LinearDiagUpStrel),
    DiagDown(LinearDiagDownStrel),
    Cross(Cross3x3Strel),
    ShiftedCross(ShiftedCross3x3Strel),
}

macro_rules! dispatch_2d {
    ($self:expr, $strel:ident => $body:expr) => {
        match $self {
            ElementaryStrel2D::Horizontal($strel) => $body,
            ElementaryStrel2D::Vertical($strel) => $body,
            ElementaryStrel2D::DiagUp($strel) => $body,
            ElementaryStrel2D::DiagDown($strel) => $body,
            ElementaryStrel2D::Cross($strel) => $body,
            ElementaryStrel2D::ShiftedCross($strel) => $body,
        }
    };
}

impl Strel2D for ElementaryStrel2D {
    fn name(&self) -> &'static str {
        dispatch_2d!(self, s => s.name())
    }

    fn size(&self) -> [usize; 2] {
        dispatch_2d!(self, s => s.size())
    }

    fn offset(&self) -> [usize; 2] {
        dispatch_2d!(self, s => s.offset())
    }

    fn mask(&self) -> Array2<bool> {
        dispatch_2d!(self, s => s.mask())
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        dispatch_2d!(self, s => s.shifts())
    }

    fn reverse(&self) -> Self {
        match self {
            ElementaryStrel2D::Horizontal(s) => ElementaryStrel2D::Horizontal(s.reverse()),
            ElementaryStrel2D::Vertical(s) => ElementaryStrel2D::Vertical(s.reverse()),
            ElementaryStrel2D::DiagUp(s) => ElementaryStrel2D::DiagUp(s.reverse()),
            ElementaryStrel2D::DiagDown(s) => ElementaryStrel2D::DiagDown(s.reverse()),
            ElementaryStrel2D::Cross(s) => ElementaryStrel2D::Cross(s.reverse()),
            ElementaryStrel2D::ShiftedCross(s) => ElementaryStrel2D::ShiftedCross(s.reverse()),
        }
    }

    filter_by_copy!(Image2D);
}

impl ElementaryStrel2D {
    /// Horizontal or vertical segment
    pub fn is_axis_aligned(&self) -> bool {
        matches!(self, ElementaryStrel2D::Horizontal(_) | ElementaryStrel2D::Vertical(_))
    }
}

impl InPlaceStrel2D for ElementaryStrel2D {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        dispatch_2d!(self, s => s.in_place_dilation_with(image, listener))
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        dispatch_2d!(self, s => s.in_place_erosion_with(image, listener))
    }
}

/// Volumetric decomposition steps: planar steps run on every z-plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementaryStrel3D {
    Planar(ElementaryStrel2D),
    Depth(LinearDepthStrel3D),
}

impl Strel3D for ElementaryStrel3D {
    fn name(&self) -> &'static str {
        match self {
            ElementaryStrel3D::Planar(s) => s.name(),
            ElementaryStrel3D::Depth(s) => s.name(),
        }
    }

    fn size(&self) -> [usize; 3] {
        match self {
            ElementaryStrel3D::Planar(s) => {
                let [size_x, size_y] = s.size();
                [size_x, size_y, 1]
            }
            ElementaryStrel3D::Depth(s) => s.size(),
        }
    }

    fn offset(&self) -> [usize; 3] {
        match self {
            ElementaryStrel3D::Planar(s) => {
                let [x, y] = s.offset();
                [x, y, 0]
            }
            ElementaryStrel3D::Depth(s) => s.offset(),
        }
    }

    fn mask(&self) -> Array3<bool> {
        match self {
            ElementaryStrel3D::Planar(s) => s.mask().insert_axis(Axis(0)),
            ElementaryStrel3D::Depth(s) => s.mask(),
        }
    }

    fn shifts(&self) -> Vec<[isize; 3]> {
        match self {
            ElementaryStrel3D::Planar(s) => {
                s.shifts().into_iter().map(|[dx, dy]| [dx, dy, 0]).collect()
            }
            ElementaryStrel3D::Depth(s) => s.shifts(),
        }
    }

    fn reverse(&self) -> Self {
        match self {
            ElementaryStrel3D::Planar(s) => ElementaryStrel3D::Planar(s.reverse()),
            ElementaryStrel3D::Depth(s) => ElementaryStrel3D::Depth(s.reverse()),
        }
    }

    filter_by_copy!(Image3D);
}

impl ElementaryStrel3D {
    pub fn is_axis_aligned(&self) -> bool {
        match self {
            ElementaryStrel3D::Planar(s) => s.is_axis_aligned(),
            ElementaryStrel3D::Depth(_) => true,
        }
    }
}

impl InPlaceStrel3D for ElementaryStrel3D {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        match self {
            ElementaryStrel3D::Planar(s) => in_place_per_slice(s, image, Extremum::Max, listener),
            ElementaryStrel3D::Depth(s) => s.in_place_dilation_with(image, listener),
        }
    }

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        listener: &mut dyn ProgressListener,
    ) {
        match self {
            ElementaryStrel3D::Planar(s) => in_place_per_slice(s, image, Extremum::Min, listener),
            ElementaryStrel3D::Depth(s) => s.in_place_erosion_with(image, listener),
        }
    }
}

/// Planar strel that decomposes into elementary in-place strels
pub trait SeparableStrel2D: Strel2D {
    fn decompose(&self) -> Vec<ElementaryStrel2D>;
}

/// Volumetric strel that decomposes into elementary in-place strels
pub trait SeparableStrel3D: Strel3D {
    fn decompose(&self) -> Vec<ElementaryStrel3D>;
}

/// Components of the reversed strel, in the order that makes the second half
/// of a closing or opening adjoint to the first half
pub fn reversed_sequence<S, F: Fn(&S) -> S>(components: &[S], reverse: F) -> Vec<S> {
    components.iter().rev().map(reverse).collect()
}

/// Apply `components` in sequence to `image`
pub(crate) fn run_sequence_2d<T: MorphElement>(
    components: &[ElementaryStrel2D],
    mut image: ArrayViewMut2<'_, T>,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) {
    let total = components.len();
    for (i, component) in components.iter().enumerate() {
        trace!(
            strel = label,
            step = i + 1,
            total,
            component = component.name(),
            size = ?component.size(),
            offset = ?component.offset(),
            "decomposition step"
        );
        component.in_place_filter_with(image.view_mut(), mode, listener);
        listener.on_progress(&ProgressEvent::new(label, i + 1, total));
    }
}

pub(crate) fn run_sequence_3d<T: MorphElement>(
    components: &[ElementaryStrel3D],
    mut image: ArrayViewMut3<'_, T>,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) {
    let total = components.len();
    for (i, component) in components.iter().enumerate() {
        trace!(
            strel = label,
            step = i + 1,
            total,
            component = component.name(),
            size = ?component.size(),
            offset = ?component.offset(),
            "decomposition step"
        );
        component.in_place_filter_with(image.view_mut(), mode, listener);
        listener.on_progress(&ProgressEvent::new(label, i + 1, total));
    }
}

/// Margins `(before, after)` per axis, in `[x, y, z]` order, that contain
/// every partial sum of the component shifts
fn sequence_margins<const N: usize>(shifts: &[Vec<[isize; N]>]) -> [(usize, usize); N] {
    let mut margins = [(0usize, 0usize); N];
    for component in shifts {
        for (d, margin) in margins.iter_mut().enumerate() {
            let low = component.iter().map(|s| s[d]).min().unwrap_or(0);
            let high = component.iter().map(|s| s[d]).max().unwrap_or(0);
            margin.0 += low.min(0).unsigned_abs();
            margin.1 += high.max(0).unsigned_abs();
        }
    }
    margins
}

/// Run `components` on a copy of `image`.
///
/// Axis-aligned segments never need cells outside the image. Any other
/// sequence runs on a copy padded with the sentinel of `mode`, so that
/// intermediate results outside the image are kept and the output equals
/// filtering by the dense Minkowski sum.
fn filter_sequence_2d<T: MorphElement>(
    components: &[ElementaryStrel2D],
    image: &Image2D<T>,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Image2D<T> {
    let mut result = image.clone();
    if components.iter().all(ElementaryStrel2D::is_axis_aligned) || image.is_empty() {
        run_sequence_2d(components, result.view_mut(), mode, label, listener);
        return result;
    }

    let shifts: Vec<_> = components.iter().map(Strel2D::shifts).collect();
    let [(left, right), (top, bottom)] = sequence_margins(&shifts);
    let [size_x, size_y] = image.size();
    let mut padded = Array2::from_elem(
        (top + size_y + bottom, left + size_x + right),
        mode.sentinel::<T>(),
    );
    let (rows, cols) = (top..top + size_y, left..left + size_x);
    padded
        .slice_mut(s![rows.clone(), cols.clone()])
        .assign(image.data());
    run_sequence_2d(components, padded.view_mut(), mode, label, listener);
    result.data_mut().assign(&padded.slice(s![rows, cols]));
    result
}

fn filter_sequence_3d<T: MorphElement>(
    components: &[ElementaryStrel3D],
    image: &Image3D<T>,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Image3D<T> {
    let mut result = image.clone();
    if components.iter().all(ElementaryStrel3D::is_axis_aligned) || image.is_empty() {
        run_sequence_3d(components, result.view_mut(), mode, label, listener);
        return result;
    }

    let shifts: Vec<_> = components.iter().map(Strel3D::shifts).collect();
    let [(left, right), (top, bottom), (front, back)] = sequence_margins(&shifts);
    let [size_x, size_y, size_z] = image.size();
    let mut padded = Array3::from_elem(
        (front + size_z + back, top + size_y + bottom, left + size_x + right),
        mode.sentinel::<T>(),
    );
    let (planes, rows, cols) = (front..front + size_z, top..top + size_y, left..left + size_x);
    padded
        .slice_mut(s![planes.clone(), rows.clone(), cols.clone()])
        .assign(image.data());
    run_sequence_3d(components, padded.view_mut(), mode, label, listener);
    result.data_mut().assign(&padded.slice(s![planes, rows, cols]));
    result
}

/// Dilation (`Max`) or erosion (`Min`) by a separable strel, on a copy
pub(crate) fn separable_filter_2d<T: MorphElement>(
    components: &[ElementaryStrel2D],
    image: &Image2D<T>,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Image2D<T> {
    filter_sequence_2d(components, image, mode, label, listener)
}

/// Closing when `first` is `Max`, opening when it is `Min`
pub(crate) fn separable_pair_2d<T: MorphElement>(
    components: &[ElementaryStrel2D],
    image: &Image2D<T>,
    first: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Image2D<T> {
    let half = filter_sequence_2d(components, image, first, label, listener);
    let reversed = reversed_sequence(components, Strel2D::reverse);
    filter_sequence_2d(&reversed, &half, first.opposite(), label, listener)
}

pub(crate) fn separable_filter_3d<T: MorphElement>(
    components: &[ElementaryStrel3D],
    image: &Image3D<T>,
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Image3D<T> {
    filter_sequence_3d(components, image, mode, label, listener)
}

pub(crate) fn separable_pair_3d<T: MorphElement>(
    components: &[ElementaryStrel3D],
    image: &Image3D<T>,
    first: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Image3D<T> {
    let half = filter_sequence_3d(components, image, first, label, listener);
    let reversed = reversed_sequence(components, Strel3D::reverse);
    filter_sequence_3d(&reversed, &half, first.opposite(), label, listener)
}

/// Shifts of the Minkowski sum of the component masks, sorted
pub fn minkowski_shifts_2d(components: &[ElementaryStrel2D]) -> Vec<[isize; 2]> {
    let mut points = BTreeSet::from([[0isize, 0]]);
    for component in components {
        let shifts = component.shifts();
        points = points
            .iter()
            .flat_map(|p| shifts.iter().map(move |s| [p[0] + s[0], p[1] + s[1]]))
            .collect();
    }
    points.into_iter().collect()
}

pub fn minkowski_shifts_3d(components: &[ElementaryStrel3D]) -> Vec<[isize; 3]> {
    let mut points = BTreeSet::from([[0isize, 0, 0]]);
    for component in components {
        let shifts = component.shifts();
        points = points
            .iter()
            .flat_map(|p| {
                shifts
                    .iter()
                    .map(move |s| [p[0] + s[0], p[1] + s[1], p[2] + s[2]])
            })
            .collect();
    }
    points.into_iter().collect()
}

/// Dense mask of a shift list anchored at `offset`. Shifts falling outside
/// the box are dropped.
pub fn mask_from_shifts_2d(
    shifts: &[[isize; 2]],
    size: [usize; 2],
    offset: [usize; 2],
) -> Array2<bool> {
    let mut mask = Array2::from_elem((size[1], size[0]), false);
    for &[dx, dy] in shifts {
        let x = offset[0] as isize + dx;
        let y = offset[1] as isize + dy;
        if x >= 0 && y >= 0 && (x as usize) < size[0] && (y as usize) < size[1] {
            mask[[y as usize, x as usize]] = true;
        }
    }
    mask
}

pub fn mask_from_shifts_3d(
    shifts: &[[isize; 3]],
    size: [usize; 3],
    offset: [usize; 3],
) -> Array3<bool> {
    let mut mask = Array3::from_elem((size[2], size[1], size[0]), false);
    for shift in shifts {
        let pos: [isize; 3] = std::array::from_fn(|d| offset[d] as isize + shift[d]);
        if (0..3).all(|d| pos[d] >= 0 && (pos[d] as usize) < size[d]) {
            mask[[pos[2] as usize, pos[1] as usize, pos[0] as usize]] = true;
        }
    }
    mask
}

/// Implements the four filters of a `Strel2D` through `SeparableStrel2D::decompose`
macro_rules! separable_filters_2d {
    () => {
        fn dilation_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image2D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image2D<T> {
            $crate::morphology::separable::separable_filter_2d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Max,
                self.name(),
                listener,
            )
        }

        fn erosion_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image2D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image2D<T> {
            $crate::morphology::separable::separable_filter_2d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Min,
                self.name(),
                listener,
            )
        }

        fn closing_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image2D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image2D<T> {
            $crate::morphology::separable::separable_pair_2d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Max,
                self.name(),
                listener,
            )
        }

        fn opening_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image2D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image2D<T> {
            $crate::morphology::separable::separable_pair_2d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Min,
                self.name(),
                listener,
            )
        }
    };
}

macro_rules! separable_filters_3d {
    () => {
        fn dilation_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image3D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image3D<T> {
            $crate::morphology::separable::separable_filter_3d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Max,
                self.name(),
                listener,
            )
        }

        fn erosion_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image3D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image3D<T> {
            $crate::morphology::separable::separable_filter_3d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Min,
                self.name(),
                listener,
            )
        }

        fn closing_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image3D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image3D<T> {
            $crate::morphology::separable::separable_pair_3d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Max,
                self.name(),
                listener,
            )
        }

        fn opening_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::Image3D<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::Image3D<T> {
            $crate::morphology::separable::separable_pair_3d(
                &self.decompose(),
                image,
                $crate::morphology::buffer::Extremum::Min,
                self.name(),
                listener,
            )
        }
    };
}

pub(crate) use separable_filters_2d;
pub(crate) use separable_filters_3d;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::cross::Direction;
    use surtmorph_core::Silent;

    fn components() -> Vec<ElementaryStrel2D> {
        vec![
            ElementaryStrel2D::Horizontal(LinearHorizontalStrel::with_offset(3, 0).unwrap()),
            ElementaryStrel2D::ShiftedCross(ShiftedCross3x3Strel::new(Direction::Down)),
        ]
    }

    #[test]
    fn test_minkowski_sum_of_segments_is_rectangle() {
        let parts = [
            ElementaryStrel2D::Horizontal(LinearHorizontalStrel::new(3).unwrap()),
            ElementaryStrel2D::Vertical(LinearVerticalStrel::new(2).unwrap()),
        ];
        let shifts = minkowski_shifts_2d(&parts);
        assert_eq!(shifts.len(), 6);
        let mask = mask_from_shifts_2d(&shifts, [3, 2], [1, 0]);
        assert!(mask.iter().all(|&b| b));
    }

    #[test]
    fn test_sequence_margins_cover_partial_sums() {
        let shifts: Vec<_> = components().iter().map(Strel2D::shifts).collect();
        // segment reaches x + 2, the shifted cross y + 2
        assert_eq!(sequence_margins(&shifts), [(1, 3), (0, 2)]);
    }

    #[test]
    fn test_diagonal_sequence_keeps_values_routed_outside() {
        let mut image = Image2D::new(4, 3);
        image.set(0, 0, 50u8).unwrap();
        // the only path from (0, 0) to (2, 0) goes through (1, -1)
        let parts = [
            ElementaryStrel2D::DiagUp(LinearDiagUpStrel::with_offset(2, 1).unwrap()),
            ElementaryStrel2D::DiagDown(LinearDiagDownStrel::with_offset(2, 1).unwrap()),
        ];
        let result = separable_filter_2d(&parts, &image, Extremum::Max, "diagonals", &mut Silent);
        let shifts = minkowski_shifts_2d(&parts);
        for y in 0..3 {
            for x in 0..4 {
                let reached = shifts.contains(&[-(x as isize), -(y as isize)]);
                let expected = if reached { 50 } else { 0 };
                assert_eq!(result.get(x, y).unwrap(), expected, "({}, {})", x, y);
            }
        }
        assert_eq!(result.get(2, 0).unwrap(), 50);
    }

    #[test]
    fn test_reversed_sequence_order() {
        let parts = components();
        let reversed = reversed_sequence(&parts, Strel2D::reverse);
        assert_eq!(reversed.len(), 2);
        assert_eq!(reversed[0], parts[1].reverse());
        assert_eq!(reversed[1], parts[0].reverse());
        assert_eq!(reversed[1].offset(), [2, 0]);
    }

    #[test]
    fn test_sequence_reports_each_step() {
        let mut image = Image2D::filled(4, 4, 3u8);
        let mut steps = Vec::new();
        let mut listener = |e: &ProgressEvent| {
            if e.label == "sequence" {
                steps.push(e.current)
            }
        };
        run_sequence_2d(&components(), image.view_mut(), Extremum::Max, "sequence", &mut listener);
        assert_eq!(steps, vec![1, 2]);
    }

    #[test]
    fn test_separable_closing_is_extensive() {
        let image = Image2D::from_fn(6, 5, |x, y| ((x * 7 + y * 13) % 10) as u8);
        let closed = separable_pair_2d(&components(), &image, Extremum::Max, "pair", &mut Silent);
        let opened = separable_pair_2d(&components(), &image, Extremum::Min, "pair", &mut Silent);
        for ((&c, &o), &v) in closed.data().iter().zip(opened.data()).zip(image.data()) {
            assert!(o <= v && v <= c, "{} <= {} <= {}", o, v, c);
        }
    }

    #[test]
    fn test_planar_component_in_volume() {
        let planar = ElementaryStrel3D::Planar(ElementaryStrel2D::Cross(Cross3x3Strel));
        assert_eq!(planar.size(), [3, 3, 1]);
        assert_eq!(planar.offset(), [1, 1, 0]);
        assert_eq!(planar.mask().dim(), (1, 3, 3));
        let mut shifts = minkowski_shifts_3d(&[
            planar,
            ElementaryStrel3D::Depth(LinearDepthStrel3D::new(3).unwrap()),
        ]);
        shifts.sort();
        assert_eq!(shifts.len(), 15);
        assert!(shifts.contains(&[1, 0, -1]));
    }
}
