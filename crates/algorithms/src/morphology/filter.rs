//! `Algorithm` front end selecting a morphological operation by parameter

use std::fmt;
use std::marker::PhantomData;

use surtmorph_core::{Algorithm, Error, Image2D, Image3D, Result};

use super::closing::{closing, closing_3d};
use super::dilate::{dilate, dilate_3d};
use super::element::{StructuringElement, StructuringElement3D};
use super::erode::{erode, erode_3d};
use super::gradient::{gradient, gradient_3d};
use super::histogram::MorphElement;
use super::opening::{opening, opening_3d};
use super::tophat::{black_hat, black_hat_3d, top_hat, top_hat_3d};

/// Morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Dilation,
    Erosion,
    Opening,
    Closing,
    Gradient,
    TopHat,
    BlackHat,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Dilation => "dilation",
            Operation::Erosion => "erosion",
            Operation::Opening => "opening",
            Operation::Closing => "closing",
            Operation::Gradient => "gradient",
            Operation::TopHat => "top-hat",
            Operation::BlackHat => "black-hat",
        };
        f.write_str(name)
    }
}

/// Parameters for planar morphology
#[derive(Debug, Clone, Default)]
pub struct MorphologyParams {
    pub operation: Operation,
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Parameters for volumetric morphology
#[derive(Debug, Clone, Default)]
pub struct MorphologyParams3D {
    pub operation: Operation,
    /// Structuring element shape
    pub element: StructuringElement3D,
}

/// Planar morphology algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct Morphology<T> {
    element_type: PhantomData<T>,
}

impl<T: MorphElement> Morphology<T> {
    pub fn new() -> Self {
        Self {
            element_type: PhantomData,
        }
    }
}

impl<T: MorphElement> Algorithm for Morphology<T> {
    type Input = Image2D<T>;
    type Output = Image2D<T>;
    type Params = MorphologyParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Morphology"
    }

    fn description(&self) -> &'static str {
        "Grayscale morphology (dilation, erosion and derived filters) on planar images"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = &params.element;
        match params.operation {
            Operation::Dilation => dilate(&input, element),
            Operation::Erosion => erode(&input, element),
            Operation::Opening => opening(&input, element),
            Operation::Closing => closing(&input, element),
            Operation::Gradient => gradient(&input, element),
            Operation::TopHat => top_hat(&input, element),
            Operation::BlackHat => black_hat(&input, element),
        }
    }
}

/// Volumetric morphology algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct Morphology3D<T> {
    element_type: PhantomData<T>,
}

impl<T: MorphElement> Morphology3D<T> {
    pub fn new() -> Self {
        Self {
            element_type: PhantomData,
        }
    }
}

impl<T: MorphElement> Algorithm for Morphology3D<T> {
    type Input = Image3D<T>;
    type Output = Image3D<T>;
    type Params = MorphologyParams3D;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Morphology3D"
    }

    fn description(&self) -> &'static str {
        "Grayscale morphology (dilation, erosion and derived filters) on volumes"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = &params.element;
        match params.operation {
            Operation::Dilation => dilate_3d(&input, element),
            Operation::Erosion => erode_3d(&input, element),
            Operation::Opening => opening_3d(&input, element),
            Operation::Closing => closing_3d(&input, element),
            Operation::Gradient => gradient_3d(&input, element),
            Operation::TopHat => top_hat_3d(&input, element),
            Operation::BlackHat => black_hat_3d(&input, element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_default_dilates_with_square() {
        let mut image = Image2D::new(5, 5);
        image.set(2, 2, 4u8).unwrap();
        let result = Morphology::new().execute_default(image).unwrap();
        let lit = result.data().iter().filter(|&&v| v == 4).count();
        assert_eq!(lit, 9);
    }

    #[test]
    fn test_execute_selects_operation() {
        let image = Image2D::from_fn(6, 6, |x, y| ((x * 3 + y * 5) % 7) as f64);
        let algorithm = Morphology::<f64>::new();
        for operation in [Operation::Erosion, Operation::Closing, Operation::BlackHat] {
            let params = MorphologyParams {
                operation,
                element: StructuringElement::Diamond(3),
            };
            let expected = match operation {
                Operation::Erosion => erode(&image, &params.element).unwrap(),
                Operation::Closing => closing(&image, &params.element).unwrap(),
                _ => black_hat(&image, &params.element).unwrap(),
            };
            let result = algorithm.execute(image.clone(), params).unwrap();
            assert_eq!(result, expected, "{}", operation);
        }
    }

    #[test]
    fn test_execute_reports_invalid_element() {
        let params = MorphologyParams {
            operation: Operation::Gradient,
            element: StructuringElement::Disk(-2.0),
        };
        let result = Morphology::new().execute(Image2D::filled(3, 3, 1i32), params);
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn test_execute_3d() {
        let algorithm = Morphology3D::<u8>::new();
        assert_eq!(algorithm.name(), "Morphology3D");
        let mut image = Image3D::new(4, 4, 4);
        image.set(1, 1, 1, 3).unwrap();
        let params = MorphologyParams3D {
            operation: Operation::TopHat,
            element: StructuringElement3D::Cube(2),
        };
        let result = algorithm.execute(image, params).unwrap();
        assert_eq!(result.get(1, 1, 1).unwrap(), 3);
        assert_eq!(Operation::TopHat.to_string(), "top-hat");
    }
}
