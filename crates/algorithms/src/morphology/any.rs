//! Strels selected at runtime
//!
//! The strel traits have generic methods, so they cannot be used as trait
//! objects. These enums wrap every concrete strel and forward to it, keeping
//! the specialised closing and opening of the separable shapes.

use ndarray::{Array2, Array3, Axis};
use surtmorph_core::{Image2D, Image3D, ProgressListener};

use super::ball::{NaiveBallStrel3D, SlidingBallStrel3D};
use super::cross::Cross3x3Strel;
use super::cube::CubeStrel;
use super::diagonal::{LinearDiagDownStrel, LinearDiagUpStrel};
use super::diamond::DiamondStrel;
use super::disk::{NaiveDiskStrel, SlidingDiskStrel};
use super::histogram::MorphElement;
use super::linear::{LinearDepthStrel3D, LinearHorizontalStrel, LinearVerticalStrel};
use super::mask::{MaskStrel2D, MaskStrel3D};
use super::octagon::OctagonStrel;
use super::planar::apply_per_slice;
use super::square::SquareStrel;
use super::strel::{Strel2D, Strel3D};

/// Any planar strel
#[derive(Debug, Clone, PartialEq)]
pub enum AnyStrel2D {
    Square(SquareStrel),
    Diamond(DiamondStrel),
    Octagon(OctagonStrel),
    Disk(SlidingDiskStrel),
    NaiveDisk(NaiveDiskStrel),
    Horizontal(LinearHorizontalStrel),
    Vertical(LinearVerticalStrel),
    DiagUp(LinearDiagUpStrel),
    DiagDown(LinearDiagDownStrel),
    Cross(Cross3x3Strel),
    Mask(MaskStrel2D),
}

macro_rules! forward_2d {
    ($self:expr, $strel:ident => $body:expr) => {
        match $self {
            AnyStrel2D::Square($strel) => $body,
            AnyStrel2D::Diamond($strel) => $body,
            AnyStrel2D::Octagon($strel) => $body,
            AnyStrel2D::Disk($strel) => $body,
            AnyStrel2D::NaiveDisk($strel) => $body,
            AnyStrel2D::Horizontal($strel) => $body,
            AnyStrel2D::Vertical($strel) => $body,
            AnyStrel2D::DiagUp($strel) => $body,
            AnyStrel2D::DiagDown($strel) => $body,
            AnyStrel2D::Cross($strel) => $body,
            AnyStrel2D::Mask($strel) => $body,
        }
    };
}

impl Strel2D for AnyStrel2D {
    fn name(&self) -> &'static str {
        forward_2d!(self, s => s.name())
    }

    fn size(&self) -> [usize; 2] {
        forward_2d!(self, s => s.size())
    }

    fn offset(&self) -> [usize; 2] {
        forward_2d!(self, s => s.offset())
    }

    fn mask(&self) -> Array2<bool> {
        forward_2d!(self, s => s.mask())
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        forward_2d!(self, s => s.shifts())
    }

    fn reverse(&self) -> Self {
        match self {
            AnyStrel2D::Square(s) => AnyStrel2D::Square(s.reverse()),
            AnyStrel2D::Diamond(s) => AnyStrel2D::Diamond(s.reverse()),
            AnyStrel2D::Octagon(s) => AnyStrel2D::Octagon(s.reverse()),
            AnyStrel2D::Disk(s) => AnyStrel2D::Disk(s.reverse()),
            AnyStrel2D::NaiveDisk(s) => AnyStrel2D::NaiveDisk(s.reverse()),
            AnyStrel2D::Horizontal(s) => AnyStrel2D::Horizontal(s.reverse()),
            AnyStrel2D::Vertical(s) => AnyStrel2D::Vertical(s.reverse()),
            AnyStrel2D::DiagUp(s) => AnyStrel2D::DiagUp(s.reverse()),
            AnyStrel2D::DiagDown(s) => AnyStrel2D::DiagDown(s.reverse()),
            AnyStrel2D::Cross(s) => AnyStrel2D::Cross(s.reverse()),
            AnyStrel2D::Mask(s) => AnyStrel2D::Mask(s.reverse()),
        }
    }

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        forward_2d!(self, s => s.dilation_with(image, listener))
    }

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        forward_2d!(self, s => s.erosion_with(image, listener))
    }

    fn closing_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        forward_2d!(self, s => s.closing_with(image, listener))
    }

    fn opening_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        forward_2d!(self, s => s.opening_with(image, listener))
    }
}

/// Any volumetric strel, including planar strels applied plane by plane
#[derive(Debug, Clone, PartialEq)]
pub enum AnyStrel3D {
    Cube(CubeStrel),
    Ball(SlidingBallStrel3D),
    NaiveBall(NaiveBallStrel3D),
    Depth(LinearDepthStrel3D),
    Planar(AnyStrel2D),
    Mask(MaskStrel3D),
}

impl Strel3D for AnyStrel3D {
    fn name(&self) -> &'static str {
        match self {
            AnyStrel3D::Cube(s) => s.name(),
            AnyStrel3D::Ball(s) => s.name(),
            AnyStrel3D::NaiveBall(s) => s.name(),
            AnyStrel3D::Depth(s) => s.name(),
            AnyStrel3D::Planar(s) => s.name(),
            AnyStrel3D::Mask(s) => s.name(),
        }
    }

    fn size(&self) -> [usize; 3] {
        match self {
            AnyStrel3D::Cube(s) => s.size(),
            AnyStrel3D::Ball(s) => s.size(),
            AnyStrel3D::NaiveBall(s) => s.size(),
            AnyStrel3D::Depth(s) => s.size(),
            AnyStrel3D::Planar(s) => {
                let [x, y] = s.size();
                [x, y, 1]
            }
            AnyStrel3D::Mask(s) => s.size(),
        }
    }

    fn offset(&self) -> [usize; 3] {
        match self {
            AnyStrel3D::Cube(s) => s.offset(),
            AnyStrel3D::Ball(s) => s.offset(),
            AnyStrel3D::NaiveBall(s) => s.offset(),
            AnyStrel3D::Depth(s) => s.offset(),
            AnyStrel3D::Planar(s) => {
                let [x, y] = s.offset();
                [x, y, 0]
            }
            AnyStrel3D::Mask(s) => s.offset(),
        }
    }

    fn mask(&self) -> Array3<bool> {
        match self {
            AnyStrel3D::Cube(s) => s.mask(),
            AnyStrel3D::Ball(s) => s.mask(),
            AnyStrel3D::NaiveBall(s) => s.mask(),
            AnyStrel3D::Depth(s) => s.mask(),
            AnyStrel3D::Planar(s) => s.mask().insert_axis(Axis(0)),
            AnyStrel3D::Mask(s) => s.mask(),
        }
    }

    fn reverse(&self) -> Self {
        match self {
            AnyStrel3D::Cube(s) => AnyStrel3D::Cube(s.reverse()),
            AnyStrel3D::Ball(s) => AnyStrel3D::Ball(s.reverse()),
            AnyStrel3D::NaiveBall(s) => AnyStrel3D::NaiveBall(s.reverse()),
            AnyStrel3D::Depth(s) => AnyStrel3D::Depth(s.reverse()),
            AnyStrel3D::Planar(s) => AnyStrel3D::Planar(s.reverse()),
            AnyStrel3D::Mask(s) => AnyStrel3D::Mask(s.reverse()),
        }
    }

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        match self {
            AnyStrel3D::Cube(s) => s.dilation_with(image, listener),
            AnyStrel3D::Ball(s) => s.dilation_with(image, listener),
            AnyStrel3D::NaiveBall(s) => s.dilation_with(image, listener),
            AnyStrel3D::Depth(s) => s.dilation_with(image, listener),
            AnyStrel3D::Planar(s) => apply_per_slice(image, |plane| s.dilation_with(plane, listener)),
            AnyStrel3D::Mask(s) => s.dilation_with(image, listener),
        }
    }

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        match self {
            AnyStrel3D::Cube(s) => s.erosion_with(image, listener),
            AnyStrel3D::Ball(s) => s.erosion_with(image, listener),
            AnyStrel3D::NaiveBall(s) => s.erosion_with(image, listener),
            AnyStrel3D::Depth(s) => s.erosion_with(image, listener),
            AnyStrel3D::Planar(s) => apply_per_slice(image, |plane| s.erosion_with(plane, listener)),
            AnyStrel3D::Mask(s) => s.erosion_with(image, listener),
        }
    }

    fn closing_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        match self {
            AnyStrel3D::Cube(s) => s.closing_with(image, listener),
            AnyStrel3D::Ball(s) => s.closing_with(image, listener),
            AnyStrel3D::NaiveBall(s) => s.closing_with(image, listener),
            AnyStrel3D::Depth(s) => s.closing_with(image, listener),
            AnyStrel3D::Planar(s) => apply_per_slice(image, |plane| s.closing_with(plane, listener)),
            AnyStrel3D::Mask(s) => s.closing_with(image, listener),
        }
    }

    fn opening_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        match self {
            AnyStrel3D::Cube(s) => s.opening_with(image, listener),
            AnyStrel3D::Ball(s) => s.opening_with(image, listener),
            AnyStrel3D::NaiveBall(s) => s.opening_with(image, listener),
            AnyStrel3D::Depth(s) => s.opening_with(image, listener),
            AnyStrel3D::Planar(s) => apply_per_slice(image, |plane| s.opening_with(plane, listener)),
            AnyStrel3D::Mask(s) => s.opening_with(image, listener),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_strel_keeps_separable_closing() {
        let square = SquareStrel::with_offset(3, [0, 2]).unwrap();
        let any = AnyStrel2D::Square(square);
        let image = Image2D::from_fn(7, 6, |x, y| ((x * 5 + y * 11) % 13) as u8);
        assert_eq!(any.closing(&image), square.closing(&image));
        assert_eq!(any.reverse(), AnyStrel2D::Square(square.reverse()));
        assert_eq!(any.name(), "Square");
    }

    #[test]
    fn test_planar_strel_in_volume() {
        let line = AnyStrel3D::Planar(AnyStrel2D::Horizontal(LinearHorizontalStrel::new(3).unwrap()));
        assert_eq!(line.size(), [3, 1, 1]);
        assert_eq!(line.offset(), [1, 0, 0]);
        let mut image = Image3D::new(4, 2, 3);
        image.set(1, 1, 2, 8u16).unwrap();
        let result = line.dilation(&image);
        assert_eq!(result.get(0, 1, 2).unwrap(), 8);
        assert_eq!(result.get(2, 1, 2).unwrap(), 8);
        assert_eq!(result.get(3, 1, 2).unwrap(), 0);
        assert_eq!(result.get(1, 1, 1).unwrap(), 0);
        assert_eq!(result.get(1, 0, 2).unwrap(), 0);
    }
}
