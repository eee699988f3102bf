//! Morphological closing (dilation followed by erosion)
//!
//! Fills dark features smaller than the structuring element while
//! preserving the shape of larger dark regions.

use surtmorph_core::{Image2D, Image3D, Result};
use tracing::debug;

use super::element::{StructuringElement, StructuringElement3D};
use super::histogram::MorphElement;
use super::strel::{Strel2D, Strel3D};

/// Perform morphological closing on a planar image
///
/// Closing = erode(dilate(image)) with the reversed element, so the result
/// is never below the input.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn closing<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(
        strel = strel.name(),
        size_x = image.size_x(),
        size_y = image.size_y(),
        element_type = std::any::type_name::<T>(),
        "closing"
    );
    Ok(strel.closing(image))
}

/// Perform morphological closing on a volume
pub fn closing_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "closing 3d");
    Ok(strel.closing(image))
}
