//! Structuring element descriptions for morphological operations
//!
//! A structuring element description is plain configuration data. Calling
//! `build` validates it and returns the strel that filters images.

use ndarray::{Array2, Array3};
use surtmorph_core::{Error, Result};

use super::any::{AnyStrel2D, AnyStrel3D};
use super::ball::{NaiveBallStrel3D, SlidingBallStrel3D};
use super::cross::Cross3x3Strel;
use super::cube::CubeStrel;
use super::diagonal::{LinearDiagDownStrel, LinearDiagUpStrel};
use super::diamond::DiamondStrel;
use super::disk::{NaiveDiskStrel, SlidingDiskStrel};
use super::linear::{LinearDepthStrel3D, LinearHorizontalStrel, LinearVerticalStrel};
use super::mask::{MaskStrel2D, MaskStrel3D};
use super::octagon::OctagonStrel;
use super::square::SquareStrel;

/// Shape of a planar structuring element
#[derive(Debug, Clone, PartialEq)]
pub enum StructuringElement {
    /// Square of the given side, decomposed into two segments
    Square(usize),
    /// Diamond of the given odd diameter, decomposed into 3x3 crosses
    Diamond(usize),
    /// Octagon of the given diameter, decomposed into lines
    Octagon(usize),
    /// Disk of the given radius, filtered with a sliding histogram
    Disk(f64),
    /// Disk of the given radius, filtered with a full neighbor scan
    NaiveDisk(f64),
    HorizontalLine(usize),
    VerticalLine(usize),
    DiagUpLine(usize),
    DiagDownLine(usize),
    Cross3x3,
    /// User-provided mask, indexed `mask[y][x]`, anchored at `offset = [x, y]`
    Custom {
        mask: Vec<Vec<bool>>,
        offset: [usize; 2],
    },
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::Square(3)
    }
}

impl StructuringElement {
    /// Validate the structuring element, returning an error for invalid configurations
    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }

    /// Build the strel described by this element
    pub fn build(&self) -> Result<AnyStrel2D> {
        let strel = match self {
            StructuringElement::Square(size) => AnyStrel2D::Square(SquareStrel::new(*size)?),
            StructuringElement::Diamond(size) => AnyStrel2D::Diamond(DiamondStrel::new(*size)?),
            StructuringElement::Octagon(size) => AnyStrel2D::Octagon(OctagonStrel::new(*size)?),
            StructuringElement::Disk(radius) => AnyStrel2D::Disk(SlidingDiskStrel::new(*radius)?),
            StructuringElement::NaiveDisk(radius) => {
                AnyStrel2D::NaiveDisk(NaiveDiskStrel::new(*radius)?)
            }
            StructuringElement::HorizontalLine(size) => {
                AnyStrel2D::Horizontal(LinearHorizontalStrel::new(*size)?)
            }
            StructuringElement::VerticalLine(size) => {
                AnyStrel2D::Vertical(LinearVerticalStrel::new(*size)?)
            }
            StructuringElement::DiagUpLine(size) => {
                AnyStrel2D::DiagUp(LinearDiagUpStrel::new(*size)?)
            }
            StructuringElement::DiagDownLine(size) => {
                AnyStrel2D::DiagDown(LinearDiagDownStrel::new(*size)?)
            }
            StructuringElement::Cross3x3 => AnyStrel2D::Cross(Cross3x3Strel::new()),
            StructuringElement::Custom { mask, offset } => {
                AnyStrel2D::Mask(MaskStrel2D::new(nested_mask_2d(mask)?, *offset)?)
            }
        };
        Ok(strel)
    }
}

/// Shape of a volumetric structuring element
#[derive(Debug, Clone, PartialEq)]
pub enum StructuringElement3D {
    Cube(usize),
    /// Ball of the given radius, filtered with a sliding histogram
    Ball(f64),
    /// Ball of the given radius, filtered with a full neighbor scan
    NaiveBall(f64),
    /// Segment along z
    DepthLine(usize),
    /// Planar element applied independently to every z-plane
    Planar(StructuringElement),
    /// User-provided mask, indexed `mask[z][y][x]`, anchored at `offset = [x, y, z]`
    Custom {
        mask: Vec<Vec<Vec<bool>>>,
        offset: [usize; 3],
    },
}

impl Default for StructuringElement3D {
    fn default() -> Self {
        StructuringElement3D::Cube(3)
    }
}

impl StructuringElement3D {
    /// Validate the structuring element, returning an error for invalid configurations
    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }

    /// Build the strel described by this element
    pub fn build(&self) -> Result<AnyStrel3D> {
        let strel = match self {
            StructuringElement3D::Cube(size) => AnyStrel3D::Cube(CubeStrel::new(*size)?),
            StructuringElement3D::Ball(radius) => {
                AnyStrel3D::Ball(SlidingBallStrel3D::new(*radius)?)
            }
            StructuringElement3D::NaiveBall(radius) => {
                AnyStrel3D::NaiveBall(NaiveBallStrel3D::new(*radius)?)
            }
            StructuringElement3D::DepthLine(size) => {
                AnyStrel3D::Depth(LinearDepthStrel3D::new(*size)?)
            }
            StructuringElement3D::Planar(element) => AnyStrel3D::Planar(element.build()?),
            StructuringElement3D::Custom { mask, offset } => {
                AnyStrel3D::Mask(MaskStrel3D::new(nested_mask_3d(mask)?, *offset)?)
            }
        };
        Ok(strel)
    }
}

fn rectangular_width<R: AsRef<[bool]>>(rows: &[R]) -> Result<usize> {
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    match rows.iter().find(|row| row.as_ref().len() != width) {
        Some(row) => Err(Error::invalid_parameter(
            "custom_mask",
            format!("row length {}", row.as_ref().len()),
            format!("custom mask must be rectangular (expected {})", width),
        )),
        None => Ok(width),
    }
}

fn nested_mask_2d(rows: &[Vec<bool>]) -> Result<Array2<bool>> {
    if rows.is_empty() {
        return Err(Error::invalid_parameter("custom_mask", "empty", "custom mask must not be empty"));
    }
    let width = rectangular_width(rows)?;
    let cells: Vec<bool> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), cells).map_err(|e| Error::Other(e.to_string()))
}

fn nested_mask_3d(planes: &[Vec<Vec<bool>>]) -> Result<Array3<bool>> {
    if planes.is_empty() {
        return Err(Error::invalid_parameter("custom_mask", "empty", "custom mask must not be empty"));
    }
    let height = planes[0].len();
    if let Some(plane) = planes.iter().find(|plane| plane.len() != height) {
        return Err(Error::invalid_parameter(
            "custom_mask",
            format!("plane height {}", plane.len()),
            format!("custom mask must be box shaped (expected {})", height),
        ));
    }
    let rows: Vec<&[bool]> = planes.iter().flatten().map(Vec::as_slice).collect();
    let width = rectangular_width(&rows)?;
    let cells: Vec<bool> = rows.iter().flat_map(|row| row.iter().copied()).collect();
    Array3::from_shape_vec((planes.len(), height, width), cells)
        .map_err(|e| Error::Other(e.to_string()))
}
