//! Morphological erosion (minimum filter)
//!
//! Replaces each pixel with the minimum value in its structuring element
//! neighborhood. Shrinks bright regions and enlarges dark regions.

use surtmorph_core::{Image2D, Image3D, Result};
use tracing::debug;

use super::element::{StructuringElement, StructuringElement3D};
use super::histogram::MorphElement;
use super::strel::{Strel2D, Strel3D};

/// Perform morphological erosion on a planar image
///
/// Each output pixel is the minimum over the structuring element
/// neighborhood. Neighbors outside the image are ignored.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn erode<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(
        strel = strel.name(),
        size_x = image.size_x(),
        size_y = image.size_y(),
        element_type = std::any::type_name::<T>(),
        "erosion"
    );
    Ok(strel.erosion(image))
}

/// Perform morphological erosion on a volume
pub fn erode_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(
        strel = strel.name(),
        size = ?image.size(),
        element_type = std::any::type_name::<T>(),
        "erosion 3d"
    );
    Ok(strel.erosion(image))
}
