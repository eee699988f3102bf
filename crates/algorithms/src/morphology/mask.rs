//! Dense-mask structuring elements
//!
//! Arbitrary boolean masks filtered by the naive neighbor scan. Any other
//! strel can be densified with `from_strel`, which gives the reference result
//! its fast implementation must agree with.

use ndarray::{Array2, Array3};
use surtmorph_core::{Error, Image2D, Image3D, ProgressListener, Result};

use super::buffer::Extremum;
use super::histogram::MorphElement;
use super::scan::{neighbor_scan_2d, neighbor_scan_3d};
use super::strel::{
    reverse_mask_2d, reverse_mask_3d, reverse_offset, shifts_from_mask_2d, shifts_from_mask_3d,
    Strel2D, Strel3D,
};

fn check_mask<const D: usize>(shape: [usize; D], cells: usize, offset: [usize; D]) -> Result<()> {
    if shape.iter().any(|&n| n == 0) {
        return Err(Error::invalid_parameter(
            "mask",
            format!("{:?}", shape),
            "mask must not be empty",
        ));
    }
    if cells == 0 {
        return Err(Error::invalid_parameter(
            "mask",
            format!("{:?}", shape),
            "mask must contain at least one element",
        ));
    }
    if (0..D).any(|d| offset[d] >= shape[d]) {
        return Err(Error::invalid_parameter(
            "offset",
            format!("{:?}", offset),
            format!("offset must lie inside the mask box {:?}", shape),
        ));
    }
    Ok(())
}

/// Planar strel given by an explicit mask, indexed `[[y, x]]`
#[derive(Debug, Clone, PartialEq)]
pub struct MaskStrel2D {
    mask: Array2<bool>,
    offset: [usize; 2],
    shifts: Vec<[isize; 2]>,
}

impl MaskStrel2D {
    /// Strel from `mask` with its anchor at `offset = [x, y]`
    pub fn new(mask: Array2<bool>, offset: [usize; 2]) -> Result<Self> {
        let (size_y, size_x) = mask.dim();
        let cells = mask.iter().filter(|&&on| on).count();
        check_mask([size_x, size_y], cells, offset)?;
        let shifts = shifts_from_mask_2d(&mask, offset);
        Ok(Self {
            mask,
            offset,
            shifts,
        })
    }

    /// Dense copy of the geometry of `strel`
    pub fn from_strel<S: Strel2D>(strel: &S) -> Self {
        let mask = strel.mask();
        let offset = strel.offset();
        let shifts = shifts_from_mask_2d(&mask, offset);
        Self {
            mask,
            offset,
            shifts,
        }
    }

    /// Number of mask cells
    pub fn element_count(&self) -> usize {
        self.shifts.len()
    }
}

impl Strel2D for MaskStrel2D {
    fn name(&self) -> &'static str {
        "Mask"
    }

    fn size(&self) -> [usize; 2] {
        let (size_y, size_x) = self.mask.dim();
        [size_x, size_y]
    }

    fn offset(&self) -> [usize; 2] {
        self.offset
    }

    fn mask(&self) -> Array2<bool> {
        self.mask.clone()
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        self.shifts.clone()
    }

    fn reverse(&self) -> Self {
        let mask = reverse_mask_2d(&self.mask);
        let offset = reverse_offset(self.size(), self.offset);
        let shifts = shifts_from_mask_2d(&mask, offset);
        Self {
            mask,
            offset,
            shifts,
        }
    }

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        let data =
            neighbor_scan_2d(image.view(), &self.shifts, Extremum::Max, self.name(), listener);
        Image2D::from_array(data)
    }

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        let data =
            neighbor_scan_2d(image.view(), &self.shifts, Extremum::Min, self.name(), listener);
        Image2D::from_array(data)
    }
}

/// Volumetric strel given by an explicit mask, indexed `[[z, y, x]]`
#[derive(Debug, Clone, PartialEq)]
pub struct MaskStrel3D {
    mask: Array3<bool>,
    offset: [usize; 3],
    shifts: Vec<[isize; 3]>,
}

impl MaskStrel3D {
    /// Strel from `mask` with its anchor at `offset = [x, y, z]`
    pub fn new(mask: Array3<bool>, offset: [usize; 3]) -> Result<Self> {
        let (size_z, size_y, size_x) = mask.dim();
        let cells = mask.iter().filter(|&&on| on).count();
        check_mask([size_x, size_y, size_z], cells, offset)?;
        let shifts = shifts_from_mask_3d(&mask, offset);
        Ok(Self {
            mask,
            offset,
            shifts,
        })
    }

    pub fn from_strel<S: Strel3D>(strel: &S) -> Self {
        let mask = strel.mask();
        let offset = strel.offset();
        let shifts = shifts_from_mask_3d(&mask, offset);
        Self {
            mask,
            offset,
            shifts,
        }
    }

    pub fn element_count(&self) -> usize {
        self.shifts.len()
    }
}

impl Strel3D for MaskStrel3D {
    fn name(&self) -> &'static str {
        "Mask3D"
    }

    fn size(&self) -> [usize; 3] {
        let (size_z, size_y, size_x) = self.mask.dim();
        [size_x, size_y, size_z]
    }

    fn offset(&self) -> [usize; 3] {
        self.offset
    }

    fn mask(&self) -> Array3<bool> {
        self.mask.clone()
    }

    fn shifts(&self) -> Vec<[isize; 3]> {
        self.shifts.clone()
    }

    fn reverse(&self) -> Self {
        let mask = reverse_mask_3d(&self.mask);
        let offset = reverse_offset(self.size(), self.offset);
        let shifts = shifts_from_mask_3d(&mask, offset);
        Self {
            mask,
            offset,
            shifts,
        }
    }

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        let data =
            neighbor_scan_3d(image.view(), &self.shifts, Extremum::Max, self.name(), listener);
        Image3D::from_array(data)
    }

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        let data =
            neighbor_scan_3d(image.view(), &self.shifts, Extremum::Min, self.name(), listener);
        Image3D::from_array(data)
    }
}
