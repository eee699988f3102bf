//! Ball structuring elements, the volumetric counterparts of the disks

use ndarray::{Array3, ArrayView1, ArrayView3, Axis};
use surtmorph_core::{Image3D, ProgressEvent, ProgressListener, Result};

use super::buffer::Extremum;
use super::histogram::{LocalHistogram, MorphElement};
use super::indexed_rows::IndexedRowsStrel3D;
use super::scan::neighbor_scan_3d;
use super::strel::Strel3D;

/// Ball filtered by a full neighbor scan, O(r³) per voxel
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBallStrel3D {
    geometry: IndexedRowsStrel3D,
    shifts: Vec<[isize; 3]>,
}

impl NaiveBallStrel3D {
    /// Ball of voxels with `dx² + dy² + dz² <= (radius + 0.5)²`
    pub fn new(radius: f64) -> Result<Self> {
        let geometry = IndexedRowsStrel3D::new(radius)?;
        let shifts = geometry.shifts();
        Ok(Self { geometry, shifts })
    }

    pub fn radius(&self) -> f64 {
        self.geometry.radius()
    }

    pub fn geometry(&self) -> &IndexedRowsStrel3D {
        &self.geometry
    }
}

impl Strel3D for NaiveBallStrel3D {
    fn name(&self) -> &'static str {
        "NaiveBall"
    }

    fn size(&self) -> [usize; 3] {
        self.geometry.size()
    }

    fn offset(&self) -> [usize; 3] {
        self.geometry.offset()
    }

    fn mask(&self) -> Array3<bool> {
        self.geometry.mask()
    }

    fn shifts(&self) -> Vec<[isize; 3]> {
        self.shifts.clone()
    }

    fn reverse(&self) -> Self {
        self.clone()
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

/// Ball filtered by a sliding local histogram, O(r²) per voxel
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingBallStrel3D {
    geometry: IndexedRowsStrel3D,
}

impl SlidingBallStrel3D {
    /// Ball of voxels with `dx² + dy² + dz² <= (radius + 0.5)²`
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            geometry: IndexedRowsStrel3D::new(radius)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.geometry.radius()
    }

    pub fn geometry(&self) -> &IndexedRowsStrel3D {
        &self.geometry
    }

    fn slide<T: MorphElement>(
        &self,
        image: ArrayView3<'_, T>,
        mode: Extremum,
        listener: &mut dyn ProgressListener,
    ) -> Array3<T> {
        let (size_z, size_y, size_x) = image.dim();
        let sentinel = mode.sentinel::<T>();
        let scanlines = self.geometry.scanlines();
        let count = self.geometry.element_count();
        let mut output = Array3::from_elem((size_z, size_y, size_x), sentinel);
        let mut histogram = T::Histogram::with_fill(count, sentinel);
        let width = size_x as isize;
        let inside = |v: isize, n: usize| (0..n as isize).contains(&v);

        for (z, mut out_plane) in output.axis_iter_mut(Axis(0)).enumerate() {
            for (y, mut out_row) in out_plane.axis_iter_mut(Axis(0)).enumerate() {
                let rows: Vec<(ArrayView1<'_, T>, isize)> = scanlines
                    .iter()
                    .filter_map(|&(dy, dz, w)| {
                        let yy = y as isize + dy;
                        let zz = z as isize + dz;
                        (inside(yy, size_y) && inside(zz, size_z)).then(|| {
                            let line = image.index_axis(Axis(0), zz as usize);
                            (line.index_axis_move(Axis(0), yy as usize), w as isize)
                        })
                    })
                    .collect();

                histogram.reset(count, sentinel);
                for (line, w) in &rows {
                    for xx in 0..=(*w).min(width - 1) {
                        histogram.replace(sentinel, line[xx as usize]);
                    }
                }
                if size_x > 0 {
                    out_row[0] = histogram.extremum(mode);
                }

                for x in 1..width {
                    for (line, w) in &rows {
                        let leaving = x - 1 - w;
                        let entering = x + w;
                        let old = if leaving >= 0 { line[leaving as usize] } else { sentinel };
                        let new = if entering < width { line[entering as usize] } else { sentinel };
                        histogram.replace(old, new);
                    }
                    out_row[x as usize] = histogram.extremum(mode);
                }
            }
            listener.on_progress(&ProgressEvent::new(self.name(), z + 1, size_z));
        }
        output
    }
}

impl Strel3D for SlidingBallStrel3D {
    fn name(&self) -> &'static str {
        "SlidingBall"
    }

    fn size(&self) -> [usize; 3] {
        self.geometry.size()
    }

    fn offset(&self) -> [usize; 3] {
        self.geometry.offset()
    }

    fn mask(&self) -> Array3<bool> {
        self.geometry.mask()
    }

    fn shifts(&self) -> Vec<[isize; 3]> {
        self.geometry.shifts()
    }

    fn reverse(&self) -> Self {
        self.clone()
    }

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        Image3D::from_array(self.slide(image.view(), Extremum::Max, listener))
    }

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image3D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image3D<T> {
        Image3D::from_array(self.slide(image.view(), Extremum::Min, listener))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_ball_spike() {
        let mut image = Image3D::new(7, 7, 7);
        image.set(3, 3, 3, 100u8).unwrap();
        let result = SlidingBallStrel3D::new(2.0).unwrap().dilation(&image);
        for ((z, y, x), &v) in result.data().indexed_iter() {
            let d2 = [x, y, z].iter().map(|&c| (c as f64 - 3.0).powi(2)).sum::<f64>();
            let expected = if d2 <= 6.25 { 100 } else { 0 };
            assert_eq!(v, expected, "({}, {}, {})", x, y, z);
        }
    }

    #[test]
    fn test_sliding_ball_matches_naive() {
        let image = Image3D::from_fn(6, 5, 4, |x, y, z| {
            ((x * 19 + y * 53 + z * 71 + x * z * 3) % 97) as f32 * 0.25
        });
        for radius in [0.0, 1.0, 1.5, 3.0] {
            let sliding = SlidingBallStrel3D::new(radius).unwrap();
            let naive = NaiveBallStrel3D::new(radius).unwrap();
            assert_eq!(sliding.dilation(&image), naive.dilation(&image), "r = {}", radius);
            assert_eq!(sliding.erosion(&image), naive.erosion(&image), "r = {}", radius);
        }
    }

    #[test]
    fn test_ball_geometry_and_progress() {
        let ball = SlidingBallStrel3D::new(1.0).unwrap();
        assert_eq!(ball.size(), [3, 3, 3]);
        assert_eq!(ball.shifts().len(), 19);
        assert_eq!(ball.reverse(), ball);

        let image = Image3D::filled(3, 3, 5, 2i16);
        let mut planes = Vec::new();
        let mut listener = |e: &ProgressEvent| planes.push(e.current);
        let result = ball.erosion_with(&image, &mut listener);
        assert_eq!(planes, vec![1, 2, 3, 4, 5]);
        assert!(result.data().iter().all(|&v| v == 2));
    }
}
