//! Run-length geometry of digital disks and balls
//!
//! A disk of radius `r` contains the integer shifts with
//! `dx² + dy² <= (r + 0.5)²`. Every scanline of it is a symmetric run
//! `[-w, w]`; scanlines with equal half-width share one stored run, and a row
//! index maps each scanline to its run. Balls do the same for the `(dy, dz)`
//! scanlines of the `(2R + 1)²` square, some of which are empty.

use ndarray::{Array2, Array3};
use surtmorph_core::{Error, Result};

/// Symmetric run `[-half_width, half_width]` of one scanline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub half_width: usize,
}

impl Run {
    /// Number of cells of the run
    pub fn len(&self) -> usize {
        2 * self.half_width + 1
    }

    /// Runs hold at least their centre cell
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, dx: isize) -> bool {
        dx.unsigned_abs() <= self.half_width
    }
}

pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(Error::invalid_parameter(
            "radius",
            radius,
            "radius must be finite and non-negative",
        ));
    }
    Ok(())
}

/// Integer extent `R = floor(r + 0.5)`: shifts lie in `[-R, R]`
fn integer_extent(radius: f64) -> usize {
    (radius + 0.5).floor() as usize
}

/// Largest `w` with `w² <= limit - d2`, or `None` when `d2 > limit`
fn half_width(limit: f64, d2: usize) -> Option<usize> {
    let remainder = limit - d2 as f64;
    if remainder < 0.0 {
        return None;
    }
    let mut w = remainder.sqrt().floor() as usize;
    // correct floating-point rounding of the square root
    while ((w + 1) * (w + 1)) as f64 <= remainder {
        w += 1;
    }
    while w > 0 && (w * w) as f64 > remainder {
        w -= 1;
    }
    Some(w)
}

/// Stable deduplication: index of `run` in `rows`, appending it if new
fn intern(rows: &mut Vec<Run>, run: Run) -> usize {
    match rows.iter().position(|&r| r == run) {
        Some(index) => index,
        None => {
            rows.push(run);
            rows.len() - 1
        }
    }
}

/// Disk geometry as deduplicated scanline runs
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRowsStrel2D {
    radius: f64,
    extent: usize,
    row_index: Vec<usize>,
    rows: Vec<Run>,
}

impl IndexedRowsStrel2D {
    pub fn new(radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        let extent = integer_extent(radius);
        let limit = (radius + 0.5) * (radius + 0.5);

        let mut rows = Vec::new();
        let mut row_index = Vec::with_capacity(2 * extent + 1);
        for dy in 0..=2 * extent {
            let dy = dy.abs_diff(extent);
            // |dy| <= R <= r + 0.5, so every scanline is non-empty
            let w = half_width(limit, dy * dy).unwrap_or(0);
            row_index.push(intern(&mut rows, Run { half_width: w }));
        }

        Ok(Self {
            radius,
            extent,
            row_index,
            rows,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Integer extent `R`: the bounding box is `2R + 1` wide
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Distinct runs, in order of first appearance from the top scanline
    pub fn rows(&self) -> &[Run] {
        &self.rows
    }

    /// Run index of every scanline, top to bottom
    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    /// Run of scanline `dy`, `None` outside `[-R, R]`
    pub fn row(&self, dy: isize) -> Option<Run> {
        let i = dy + self.extent as isize;
        if i < 0 {
            return None;
        }
        self.row_index.get(i as usize).map(|&r| self.rows[r])
    }

    /// Scanlines as `(dy, half_width)` pairs
    pub fn scanlines(&self) -> Vec<(isize, usize)> {
        let extent = self.extent as isize;
        self.row_index
            .iter()
            .enumerate()
            .map(|(i, &r)| (i as isize - extent, self.rows[r].half_width))
            .collect()
    }

    /// Number of cells of the disk
    pub fn element_count(&self) -> usize {
        self.row_index.iter().map(|&r| self.rows[r].len()).sum()
    }

    pub fn size(&self) -> [usize; 2] {
        [2 * self.extent + 1; 2]
    }

    pub fn offset(&self) -> [usize; 2] {
        [self.extent; 2]
    }

    pub fn mask(&self) -> Array2<bool> {
        let n = 2 * self.extent + 1;
        Array2::from_shape_fn((n, n), |(y, x)| {
            self.rows[self.row_index[y]].contains(x as isize - self.extent as isize)
        })
    }

    pub fn shifts(&self) -> Vec<[isize; 2]> {
        let mut shifts = Vec::with_capacity(self.element_count());
        for (dy, w) in self.scanlines() {
            let w = w as isize;
            shifts.extend((-w..=w).map(|dx| [dx, dy]));
        }
        shifts
    }
}

/// Ball geometry as deduplicated scanline runs, one per `(dy, dz)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRowsStrel3D {
    radius: f64,
    extent: usize,
    // indexed by (dz + R) * (2R + 1) + (dy + R); None for scanlines missing the ball
    row_index: Vec<Option<usize>>,
    rows: Vec<Run>,
}

impl IndexedRowsStrel3D {
    pub fn new(radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        let extent = integer_extent(radius);
        let limit = (radius + 0.5) * (radius + 0.5);
        let n = 2 * extent + 1;

        let mut rows = Vec::new();
        let mut row_index = Vec::with_capacity(n * n);
        for dz in 0..n {
            let dz = dz.abs_diff(extent);
            for dy in 0..n {
                let dy = dy.abs_diff(extent);
                let index = half_width(limit, dy * dy + dz * dz)
                    .map(|w| intern(&mut rows, Run { half_width: w }));
                row_index.push(index);
            }
        }

        Ok(Self {
            radius,
            extent,
            row_index,
            rows,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn rows(&self) -> &[Run] {
        &self.rows
    }

    pub fn row_index(&self) -> &[Option<usize>] {
        &self.row_index
    }

    /// Run of scanline `(dy, dz)`, `None` when it misses the ball
    pub fn row(&self, dy: isize, dz: isize) -> Option<Run> {
        let extent = self.extent as isize;
        let n = 2 * extent + 1;
        let (iy, iz) = (dy + extent, dz + extent);
        if !(0..n).contains(&iy) || !(0..n).contains(&iz) {
            return None;
        }
        self.row_index[(iz * n + iy) as usize].map(|r| self.rows[r])
    }

    /// Non-empty scanlines as `(dy, dz, half_width)` triples
    pub fn scanlines(&self) -> Vec<(isize, isize, usize)> {
        let extent = self.extent as isize;
        let n = 2 * self.extent + 1;
        self.row_index
            .iter()
            .enumerate()
            .filter_map(|(i, index)| {
                index.map(|r| {
                    let dy = (i % n) as isize - extent;
                    let dz = (i / n) as isize - extent;
                    (dy, dz, self.rows[r].half_width)
                })
            })
            .collect()
    }

    pub fn element_count(&self) -> usize {
        self.row_index
            .iter()
            .flatten()
            .map(|&r| self.rows[r].len())
            .sum()
    }

    pub fn size(&self) -> [usize; 3] {
        [2 * self.extent + 1; 3]
    }

    pub fn offset(&self) -> [usize; 3] {
        [self.extent; 3]
    }

    pub fn mask(&self) -> Array3<bool> {
        let n = 2 * self.extent + 1;
        let extent = self.extent as isize;
        Array3::from_shape_fn((n, n, n), |(z, y, x)| {
            self.row(y as isize - extent, z as isize - extent)
                .is_some_and(|run| run.contains(x as isize - extent))
        })
    }

    pub fn shifts(&self) -> Vec<[isize; 3]> {
        let mut shifts = Vec::with_capacity(self.element_count());
        for (dy, dz, w) in self.scanlines() {
            let w = w as isize;
            shifts.extend((-w..=w).map(|dx| [dx, dy, dz]));
        }
        shifts
    }
}
