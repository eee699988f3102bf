//! Top-hat and black-hat morphological transforms
//!
//! - **Top-hat** (white top-hat): original - opening. Extracts small bright
//!   features on a dark background.
//! - **Black-hat**: closing - original. Extracts small dark features on a
//!   bright background.

use surtmorph_core::{Image2D, Image3D, Result};
use tracing::debug;

use super::element::{StructuringElement, StructuringElement3D};
use super::gradient::clamped_difference;
use super::histogram::MorphElement;
use super::strel::{Strel2D, Strel3D};

/// Compute the top-hat (white top-hat) transform
///
/// Top-hat = original - opening. Extracts bright features smaller than
/// the structuring element.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn top_hat<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "top-hat");
    let opened = strel.opening(image);
    Ok(Image2D::from_array(clamped_difference(image.data().clone(), opened.data())))
}

/// Compute the black-hat transform
///
/// Black-hat = closing - original. Extracts dark features smaller than
/// the structuring element.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn black_hat<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "black-hat");
    let closed = strel.closing(image).into_array();
    Ok(Image2D::from_array(clamped_difference(closed, image.data())))
}

/// Top-hat transform of a volume
pub fn top_hat_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "top-hat 3d");
    let opened = strel.opening(image);
    Ok(Image3D::from_array(clamped_difference(image.data().clone(), opened.data())))
}

/// Black-hat transform of a volume
pub fn black_hat_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "black-hat 3d");
    let closed = strel.closing(image).into_array();
    Ok(Image3D::from_array(clamped_difference(closed, image.data())))
}
