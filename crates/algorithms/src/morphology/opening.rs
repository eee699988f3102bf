//! Morphological opening (erosion followed by dilation)
//!
//! Removes bright features smaller than the structuring element while
//! preserving the shape of larger bright regions.

use surtmorph_core::{Image2D, Image3D, Result};
use tracing::debug;

use super::element::{StructuringElement, StructuringElement3D};
use super::histogram::MorphElement;
use super::strel::{Strel2D, Strel3D};

/// Perform morphological opening on a planar image
///
/// Opening = dilate(erode(image)) with the reversed element, so the result
/// never exceeds the input.
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
pub fn opening<T: MorphElement>(
    image: &Image2D<T>,
    element: &StructuringElement,
) -> Result<Image2D<T>> {
    let strel = element.build()?;
    debug!(
        strel = strel.name(),
        size_x = image.size_x(),
        size_y = image.size_y(),
        element_type = std::any::type_name::<T>(),
        "opening"
    );
    Ok(strel.opening(image))
}

/// Perform morphological opening on a volume
pub fn opening_3d<T: MorphElement>(
    image: &Image3D<T>,
    element: &StructuringElement3D,
) -> Result<Image3D<T>> {
    let strel = element.build()?;
    debug!(strel = strel.name(), size = ?image.size(), "opening 3d");
    Ok(strel.opening(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_uniform() {
        let image = Image2D::filled(9, 9, 5u8);
        let result = opening(&image, &StructuringElement::Square(3)).unwrap();
        assert_eq!(result, image);
    }

    #[test]
    fn test_opening_removes_bright_spot() {
        let mut image = Image2D::filled(9, 9, 5.0f64);
        image.set(4, 4, 100.0).unwrap();

        let result = opening(&image, &StructuringElement::Square(3)).unwrap();
        let val = result.get(4, 4).unwrap();
        assert!(
            (val - 5.0).abs() < 1e-10,
            "Opening should remove a single bright pixel, got {}",
            val
        );
    }

    #[test]
    fn test_opening_preserves_large_bright_region() {
        let image = Image2D::from_fn(11, 11, |x, y| {
            if (3..8).contains(&x) && (3..8).contains(&y) {
                50u16
            } else {
                10
            }
        });
        let result = opening(&image, &StructuringElement::Square(3)).unwrap();
        assert_eq!(result, image, "A 5x5 block should survive a 3x3 opening");
    }

    #[test]
    fn test_opening_anti_extensive_with_offset_element() {
        let image = Image2D::from_fn(8, 7, |x, y| ((x * 7 + y * 13) % 11) as i32);
        let element = StructuringElement::Custom {
            mask: vec![vec![true, true, true], vec![false, true, false]],
            offset: [0, 1],
        };
        let result = opening(&image, &element).unwrap();
        for (o, i) in result.data().iter().zip(image.data().iter()) {
            assert!(o <= i);
        }
    }

    #[test]
    fn test_opening_3d_removes_bright_voxel() {
        let mut image = Image3D::filled(5, 5, 5, 1u8);
        image.set(2, 2, 2, 9).unwrap();
        let result = opening_3d(&image, &StructuringElement3D::Cube(3)).unwrap();
        assert!(result.data().iter().all(|&v| v == 1));
    }
}
