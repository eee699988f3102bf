//! Structuring element contracts
//!
//! A strel is a binary mask over an orthogonal bounding box plus an anchor
//! (`offset`) inside that box. Its shifts are the mask cells relative to the
//! anchor, and filtering uses them as
//!
//! ```text
//! dilation(X)(p) = max { X(p + s) : s in shifts, p + s inside X }
//! erosion(X)(p)  = min { X(p + s) : s in shifts, p + s inside X }
//! ```
//!
//! Closing is `reverse().erosion(dilation(X))` and opening its dual, where
//! `reverse()` point-reflects the mask through the anchor.
//!
//! Sizes, offsets and shifts are ordered `[x, y]` / `[x, y, z]`; masks are
//! ndarray arrays indexed `[[y, x]]` / `[[z, y, x]]` like the images.

use ndarray::{s, Array2, Array3, ArrayViewMut2, ArrayViewMut3};
use surtmorph_core::{Error, Image2D, Image3D, ProgressListener, Result, Silent};

use super::buffer::Extremum;
use super::histogram::MorphElement;

/// Planar structuring element
pub trait Strel2D {
    /// Short name used in progress events and logs
    fn name(&self) -> &'static str;

    /// Bounding box extents `[size_x, size_y]`
    fn size(&self) -> [usize; 2];

    /// Anchor position inside the bounding box, `[x, y]`
    fn offset(&self) -> [usize; 2];

    /// Dense binary mask indexed `[[y, x]]`
    fn mask(&self) -> Array2<bool>;

    /// Mask cells relative to the anchor, `[dx, dy]`
    fn shifts(&self) -> Vec<[isize; 2]> {
        shifts_from_mask_2d(&self.mask(), self.offset())
    }

    /// Point reflection through the anchor
    fn reverse(&self) -> Self
    where
        Self: Sized;

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T>;

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T>;

    fn closing_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T>
    where
        Self: Sized,
    {
        let dilated = self.dilation_with(image, listener);
        self.reverse().erosion_with(&dilated, listener)
    }

    fn opening_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T>
    where
        Self: Sized,
    {
        let eroded = self.erosion_with(image, listener);
        self.reverse().dilation_with(&eroded, listener)
    }

    fn dilation<T: MorphElement>(&self, image: &Image2D<T>) -> Image2D<T> {
        self.dilation_with(image, &mut Silent)
    }

    fn erosion<T: MorphElement>(&self, image: &Image2D<T>) -> Image2D<T> {
        self.erosion_with(image, &mut Silent)
    }

    fn closing<T: MorphElement>(&self, image: &Image2D<T>) -> Image2D<T>
    where
        Self: Sized,
    {
        self.closing_with(image, &mut Silent)
    }

    fn opening<T: MorphElement>(&self, image: &Image2D<T>) -> Image2D<T>
    where
        Self: Sized,
    {
        self.opening_with(image, &mut Silent)
    }
}

/// Volumetric structuring element
pub trait Strel3D {
    fn name(&self) -> &'static str;

    /// Bounding box extents `[size_x, size_y, size_z]`
    fn size(&self) -> [usize; 3];

    /// Anchor position inside the bounding box, `[x, y, z]`
    fn offset(&self) -> [usize; 3];

    /// Dense binary mask indexed `[[z, y, x]]`
    fn mask(&self) -> Array3<bool>;

    /// Mask cells relative to the anchor, `[dx, dy, dz]`
    fn shifts(&self) -> Vec<[isize; 3]> {
        shifts_from_mask_3d(&self.mask(), self.offset())
    }

    fn reverse(&self) -> Self
    where
        Self: Sized;

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T>;

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T>;

    fn closing_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T>
    where
        Self: Sized,
    {
        let dilated = self.dilation_with(image, listener);
        self.reverse().erosion_with(&dilated, listener)
    }

    fn opening_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T>
    where
        Self: Sized,
    {
        let eroded = self.erosion_with(image, listener);
        self.reverse().dilation_with(&eroded, listener)
    }

    fn dilation<T: MorphElement>(&self, image: &Image3D<T>) -> Image3D<T> {
        self.dilation_with(image, &mut Silent)
    }

    fn erosion<T: MorphElement>(&self, image: &Image3D<T>) -> Image3D<T> {
        self.erosion_with(image, &mut Silent)
    }

    fn closing<T: MorphElement>(&self, image: &Image3D<T>) -> Image3D<T>
    where
        Self: Sized,
    {
        self.closing_with(image, &mut Silent)
    }

    fn opening<T: MorphElement>(&self, image: &Image3D<T>) -> Image3D<T>
    where
        Self: Sized,
    {
        self.opening_with(image, &mut Silent)
    }
}

/// Planar strel able to filter a buffer without a full-size copy.
///
/// In-place operations are not transactional: a panic mid-sweep leaves the
/// buffer partially filtered.
pub trait InPlaceStrel2D: Strel2D {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    );

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        listener: &mut dyn ProgressListener,
    );

    /// Dilation for `Extremum::Max`, erosion for `Extremum::Min`
    fn in_place_filter_with<T: MorphElement>(
        &self,
        image: ArrayViewMut2<'_, T>,
        mode: Extremum,
        listener: &mut dyn ProgressListener,
    ) {
        match mode {
            Extremum::Max => self.in_place_dilation_with(image, listener),
            Extremum::Min => self.in_place_erosion_with(image, listener),
        }
    }

    fn in_place_dilation<T: MorphElement>(&self, image: &mut Image2D<T>) {
        self.in_place_dilation_with(image.view_mut(), &mut Silent)
    }

    fn in_place_erosion<T: MorphElement>(&self, image: &mut Image2D<T>) {
        self.in_place_erosion_with(image.view_mut(), &mut Silent)
    }
}

/// Volumetric strel able to filter a buffer without a full-size copy
pub trait InPlaceStrel3D: Strel3D {
    fn in_place_dilation_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        listener: &mut dyn ProgressListener,
    );

    fn in_place_erosion_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        listener: &mut dyn ProgressListener,
    );

    fn in_place_filter_with<T: MorphElement>(
        &self,
        image: ArrayViewMut3<'_, T>,
        mode: Extremum,
        listener: &mut dyn ProgressListener,
    ) {
        match mode {
            Extremum::Max => self.in_place_dilation_with(image, listener),
            Extremum::Min => self.in_place_erosion_with(image, listener),
        }
    }

    fn in_place_dilation<T: MorphElement>(&self, image: &mut Image3D<T>) {
        self.in_place_dilation_with(image.view_mut(), &mut Silent)
    }

    fn in_place_erosion<T: MorphElement>(&self, image: &mut Image3D<T>) {
        self.in_place_erosion_with(image.view_mut(), &mut Silent)
    }
}

/// Implements `dilation_with` / `erosion_with` of a `Strel2D` or `Strel3D`
/// by copying the input and running the in-place sweep on the copy.
macro_rules! filter_by_copy {
    ($image:ident) => {
        fn dilation_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::$image<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::$image<T> {
            let mut result = image.clone();
            self.in_place_dilation_with(result.view_mut(), listener);
            result
        }

        fn erosion_with<T: $crate::morphology::histogram::MorphElement>(
            &self,
            image: &surtmorph_core::$image<T>,
            listener: &mut dyn surtmorph_core::ProgressListener,
        ) -> surtmorph_core::$image<T> {
            let mut result = image.clone();
            self.in_place_erosion_with(result.view_mut(), listener);
            result
        }
    };
}

pub(crate) use filter_by_copy;

// Geometry helpers

/// Mask cells relative to `offset`
pub fn shifts_from_mask_2d(mask: &Array2<bool>, offset: [usize; 2]) -> Vec<[isize; 2]> {
    mask.indexed_iter()
        .filter(|(_, on)| **on)
        .map(|((y, x), _)| {
            [
                x as isize - offset[0] as isize,
                y as isize - offset[1] as isize,
            ]
        })
        .collect()
}

/// Mask cells relative to `offset`
pub fn shifts_from_mask_3d(mask: &Array3<bool>, offset: [usize; 3]) -> Vec<[isize; 3]> {
    mask.indexed_iter()
        .filter(|(_, on)| **on)
        .map(|((z, y, x), _)| {
            [
                x as isize - offset[0] as isize,
                y as isize - offset[1] as isize,
                z as isize - offset[2] as isize,
            ]
        })
        .collect()
}

/// Point reflection of a mask through the centre of its box
pub fn reverse_mask_2d(mask: &Array2<bool>) -> Array2<bool> {
    mask.slice(s![..;-1, ..;-1]).to_owned()
}

/// Point reflection of a mask through the centre of its box
pub fn reverse_mask_3d(mask: &Array3<bool>) -> Array3<bool> {
    mask.slice(s![..;-1, ..;-1, ..;-1]).to_owned()
}

/// Anchor of the reversed strel: `size - 1 - offset` in every dimension
pub fn reverse_offset<const D: usize>(size: [usize; D], offset: [usize; D]) -> [usize; D] {
    std::array::from_fn(|d| size[d] - 1 - offset[d])
}

pub(crate) fn validate_size(name: &'static str, size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::invalid_parameter(
            name,
            size,
            "structuring element size must be at least 1",
        ));
    }
    Ok(())
}

pub(crate) fn validate_offset(name: &'static str, size: usize, offset: usize) -> Result<()> {
    if offset >= size {
        return Err(Error::invalid_parameter(
            name,
            offset,
            format!("offset must lie in [0, {})", size),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shifts_from_mask() {
        let mask = array![[true, false, false], [true, true, true]];
        let shifts = shifts_from_mask_2d(&mask, [0, 1]);
        assert_eq!(shifts, vec![[0, -1], [0, 0], [1, 0], [2, 0]]);
    }

    #[test]
    fn test_reverse_mask_and_offset() {
        let mask = array![[true, true, false], [false, false, false]];
        let reversed = reverse_mask_2d(&mask);
        assert_eq!(reversed, array![[false, false, false], [false, true, true]]);
        assert_eq!(reverse_offset([3, 2], [0, 0]), [2, 1]);
        // shifts are negated by the reflection
        let mut before: Vec<_> = shifts_from_mask_2d(&mask, [0, 0])
            .into_iter()
            .map(|[dx, dy]| [-dx, -dy])
            .collect();
        let mut after = shifts_from_mask_2d(&reversed, [2, 1]);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reverse_mask_3d() {
        let mut mask = Array3::from_elem((2, 2, 3), false);
        mask[[0, 0, 0]] = true;
        let reversed = reverse_mask_3d(&mask);
        assert!(reversed[[1, 1, 2]]);
        assert_eq!(reversed.iter().filter(|&&b| b).count(), 1);
        assert_eq!(shifts_from_mask_3d(&reversed, [2, 1, 1]), vec![[0, 0, 0]]);
    }

    #[test]
    fn test_validation() {
        assert!(validate_size("size", 0).is_err());
        assert!(validate_size("size", 1).is_ok());
        assert!(validate_offset("offset", 3, 3).is_err());
        assert!(validate_offset("offset", 3, 2).is_ok());
    }
}
