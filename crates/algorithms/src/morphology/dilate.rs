//! Morphological dilation (maximum filter)
//!
//! Replaces each pixel with the maximum value in its structuring element
//! neighborhood. Enlarges bright regions and shrinks dark regions.

use surtmorph_core::{Image2D, Image3D, Result};
use tracing::debug;

use super::element::{StructuringElement, StructuringElement3D};
use super::histogram::MorphElement;
use super::strel::{Strel2D, Strel3D};

/// Perform morphological dilation on a planar image
///
/// Each output pixel is the maximum over the structuring element
/// neighborhood. Neighbors outside the image are ignored, so border pixels
/// take the maximum of the neighbors that exist.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn dilate<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(
        strel = strel.name(),
        size_x = image.size_x(),
        size_y = image.size_y(),
        element_type = std::any::type_name::<T>(),
        "dilation"
    );
    Ok(strel.dilation(image))
}

/// Perform morphological dilation on a volume
pub fn dilate_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(
        strel = strel.name(),
        size = ?image.size(),
        element_type = std::any::type_name::<T>(),
        "dilation 3d"
    );
    Ok(strel.dilation(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_uniform() {
        let image = Image2D::filled(7, 7, 5.0f64);
        let result = dilate(&image, &StructuringElement::Square(3)).unwrap();
        assert!(
            result.data().iter().all(|&v| (v - 5.0).abs() < 1e-10),
            "Uniform dilation should preserve value"
        );
    }

    #[test]
    fn test_dilate_picks_maximum() {
        let mut image = Image2D::filled(7, 7, 5.0f64);
        image.set(4, 3, 20.0).unwrap();

        let result = dilate(&image, &StructuringElement::Square(3)).unwrap();
        let val = result.get(3, 3).unwrap();
        assert!(
            (val - 20.0).abs() < 1e-10,
            "Dilation should pick maximum neighbor, got {}",
            val
        );
        assert_eq!(result.get(1, 3).unwrap(), 5.0);
    }

    #[test]
    fn test_dilate_edges_use_existing_neighbors() {
        let mut image = Image2D::new(5, 5);
        image.set(0, 1, 9u8).unwrap();
        let result = dilate(&image, &StructuringElement::Square(3)).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), 9);
        assert_eq!(result.get(1, 2).unwrap(), 9);
        assert_eq!(result.get(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_dilate_cross_element() {
        let mut image = Image2D::filled(7, 7, 5i16);
        image.set(2, 2, 99).unwrap();

        let result = dilate(&image, &StructuringElement::Cross3x3).unwrap();
        assert_eq!(
            result.get(3, 3).unwrap(),
            5,
            "Cross should not include diagonal"
        );
        assert_eq!(result.get(2, 3).unwrap(), 99);
    }

    #[test]
    fn test_dilate_invalid_element() {
        let image = Image2D::filled(3, 3, 1u8);
        assert!(dilate(&image, &StructuringElement::Diamond(2)).is_err());
    }

    #[test]
    fn test_dilate_3d_ball() {
        let mut image = Image3D::new(5, 5, 5);
        image.set(2, 2, 2, 7u32).unwrap();
        let result = dilate_3d(&image, &StructuringElement3D::Ball(1.0)).unwrap();
        assert_eq!(result.get(2, 2, 1).unwrap(), 7);
        assert_eq!(result.get(3, 3, 2).unwrap(), 7);
        assert_eq!(result.get(3, 3, 3).unwrap(), 0);
    }
}
