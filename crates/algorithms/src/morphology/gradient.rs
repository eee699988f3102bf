//! Morphological gradients
//!
//! Highlights edges and boundaries:
//! - **Gradient** (Beucher): dilation - erosion
//! - **Internal gradient**: original - erosion
//! - **External gradient**: dilation - original

use ndarray::{Array, Dimension, Zip};
use surtmorph_core::{Image2D, Image3D, Result, ScalarElement};
use tracing::debug;

use super::element::{StructuringElement, StructuringElement3D};
use super::histogram::MorphElement;
use super::strel::{Strel2D, Strel3D};

/// `minuend - subtrahend` cell by cell, clamped at zero
///
/// The clamp only matters for elements that do not contain their anchor,
/// where a pixel may have no neighbor inside the image.
pub(crate) fn clamped_difference<T, D>(mut minuend: Array<T, D>, subtrahend: &Array<T, D>) -> Array<T, D>
where
    T: ScalarElement,
    D: Dimension,
{
    Zip::from(&mut minuend).and(subtrahend).for_each(|a, &b| {
        *a = if *a > b { *a - b } else { T::zero() };
    });
    minuend
}

/// Compute the morphological gradient of a planar image
///
/// Gradient = dilate - erode. The result is non-negative.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn gradient<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "gradient");
    let dilated = strel.dilation(image).into_array();
    let eroded = strel.erosion(image);
    Ok(Image2D::from_array(clamped_difference(dilated, eroded.data())))
}

/// Original minus erosion
pub fn internal_gradient<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "internal gradient");
    let eroded = strel.erosion(image);
    Ok(Image2D::from_array(clamped_difference(image.data().clone(), eroded.data())))
}

/// Dilation minus original
pub fn external_gradient<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "external gradient");
    let dilated = strel.dilation(image).into_array();
    Ok(Image2D::from_array(clamped_difference(dilated, image.data())))
}

/// Morphological gradient of a volume
pub fn gradient_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "gradient 3d");
    let dilated = strel.dilation(image).into_array();
    let eroded = strel.erosion(image);
    Ok(Image3D::from_array(clamped_difference(dilated, eroded.data())))
}

pub fn internal_gradient_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "internal gradient 3d");
    let eroded = strel.erosion(image);
    Ok(Image3D::from_array(clamped_difference(image.data().clone(), eroded.data())))
}

pub fn external_gradient_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "external gradient 3d");
    let dilated = strel.dilation(image).into_array();
    Ok(Image3D::from_array(clamped_difference(dilated, image.data())))
}
