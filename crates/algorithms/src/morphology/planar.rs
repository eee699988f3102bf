//! Applying planar strels to volumes, one z-plane at a time

use ndarray::ArrayViewMut3;
use surtmorph_core::{Image2D, Image3D, ProgressListener};

use super::buffer::Extremum;
use super::histogram::MorphElement;
use super::strel::InPlaceStrel2D;

/// Run an in-place planar filter on every z-plane of `image`
pub fn in_place_per_slice<S, T>(
    strel: &S,
    mut image: ArrayViewMut3<'_, T>,
    mode: Extremum,
    listener: &mut dyn ProgressListener,
) where
    S: InPlaceStrel2D,
    T: MorphElement,
{
    for plane in image.outer_iter_mut() {
        strel.in_place_filter_with(plane, mode, listener);
    }
}

/// Build a volume whose z-planes are `filter` applied to the planes of
/// `image`.
///
/// Works with any planar operation, e.g.
/// `apply_per_slice(&volume, |plane| disk.closing(plane))`.
pub fn apply_per_slice<T, F>(image: &Image3D<T>, mut filter: F) -> Image3D<T>
where
    T: MorphElement,
    F: FnMut(&Image2D<T>) -> Image2D<T>,
{
    let mut result = image.clone();
    for (source, mut target) in image.data().outer_iter().zip(result.data_mut().outer_iter_mut()) {
        let filtered = filter(&Image2D::from_array(source.to_owned()));
        target.assign(filtered.data());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::linear::LinearHorizontalStrel;
    use crate::morphology::strel::Strel2D;
    use surtmorph_core::Silent;

    fn stripes() -> Image3D<u8> {
        Image3D::from_fn(5, 2, 3, |x, _, z| if x == z + 1 { 10 * (z as u8 + 1) } else { 0 })
    }

    #[test]
    fn test_in_place_per_slice_filters_each_plane() {
        let mut image = stripes();
        let strel = LinearHorizontalStrel::new(3).unwrap();
        in_place_per_slice(&strel, image.view_mut(), Extremum::Max, &mut Silent);
        for z in 0..3 {
            for x in 0..5usize {
                let expected = if x.abs_diff(z + 1) <= 1 { 10 * (z as u8 + 1) } else { 0 };
                assert_eq!(image.get(x, 1, z).unwrap(), expected, "x = {}, z = {}", x, z);
            }
        }
    }

    #[test]
    fn test_apply_per_slice_matches_planar_filter() {
        let image = stripes();
        let strel = LinearHorizontalStrel::new(3).unwrap();
        let result = apply_per_slice(&image, |plane| strel.erosion(plane));
        for z in 0..3 {
            let expected = strel.erosion(&image.slice_image(z).unwrap());
            assert_eq!(result.slice_image(z).unwrap(), expected, "plane {}", z);
        }
    }
}
