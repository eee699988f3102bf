//! Disk structuring elements
//!
//! [`NaiveDiskStrel`] visits every disk cell for every pixel, O(r²) per pixel.
//! [`SlidingDiskStrel`] keeps the disk neighborhood in a [`LocalHistogram`]
//! while sweeping each row: moving one pixel right changes every scanline run
//! by one value at each end, so the update costs one `replace` per scanline,
//! O(r) per pixel.

use ndarray::{Array2, ArrayView2, Axis};
use surtmorph_core::{Image2D, ProgressEvent, ProgressListener, Result};

use super::buffer::Extremum;
use super::histogram::{LocalHistogram, MorphElement};
use super::indexed_rows::IndexedRowsStrel2D;
use super::scan::neighbor_scan_2d;
use super::strel::Strel2D;

/// Disk filtered by a full neighbor scan
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveDiskStrel {
    geometry: IndexedRowsStrel2D,
    shifts: Vec<[isize; 2]>,
}

impl NaiveDiskStrel {
    /// Disk of cells with `dx² + dy² <= (radius + 0.5)²`
    pub fn new(radius: f64) -> Result<Self> {
        let geometry = IndexedRowsStrel2D::new(radius)?;
        let shifts = geometry.shifts();
        Ok(Self { geometry, shifts })
    }

    pub fn radius(&self) -> f64 {
        self.geometry.radius()
    }

    pub fn geometry(&self) -> &IndexedRowsStrel2D {
        &self.geometry
    }
}

impl Strel2D for NaiveDiskStrel {
    fn name(&self) -> &'static str {
        "NaiveDisk"
    }

    fn size(&self) -> [usize; 2] {
        self.geometry.size()
    }

    fn offset(&self) -> [usize; 2] {
        self.geometry.offset()
    }

    fn mask(&self) -> Array2<bool> {
        self.geometry.mask()
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        self.shifts.clone()
    }

    fn reverse(&self) -> Self {
        self.clone()
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

/// Disk filtered by a sliding local histogram
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingDiskStrel {
    geometry: IndexedRowsStrel2D,
}

impl SlidingDiskStrel {
    /// Disk of cells with `dx² + dy² <= (radius + 0.5)²`
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            geometry: IndexedRowsStrel2D::new(radius)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.geometry.radius()
    }

    pub fn geometry(&self) -> &IndexedRowsStrel2D {
        &self.geometry
    }

    fn slide<T: MorphElement>(
        &self,
        image: ArrayView2<'_, T>,
        mode: Extremum,
        listener: &mut dyn ProgressListener,
    ) -> Array2<T> {
        let (size_y, size_x) = image.dim();
        let sentinel = mode.sentinel::<T>();
        let scanlines = self.geometry.scanlines();
        let count = self.geometry.element_count();
        let mut output = Array2::from_elem((size_y, size_x), sentinel);
        let mut histogram = T::Histogram::with_fill(count, sentinel);
        let width = size_x as isize;

        for (y, mut out_row) in output.axis_iter_mut(Axis(0)).enumerate() {
            // scanlines of the neighborhood that fall inside the image
            let rows: Vec<_> = scanlines
                .iter()
                .filter_map(|&(dy, w)| {
                    let yy = y as isize + dy;
                    (0..size_y as isize)
                        .contains(&yy)
                        .then(|| (image.row(yy as usize), w as isize))
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

            listener.on_progress(&ProgressEvent::new(self.name(), y + 1, size_y));
        }
        output
    }
}

impl Strel2D for SlidingDiskStrel {
    fn name(&self) -> &'static str {
        "SlidingDisk"
    }

    fn size(&self) -> [usize; 2] {
        self.geometry.size()
    }

    fn offset(&self) -> [usize; 2] {
        self.geometry.offset()
    }

    fn mask(&self) -> Array2<bool> {
        self.geometry.mask()
    }

    fn shifts(&self) -> Vec<[isize; 2]> {
        self.geometry.shifts()
    }

    fn reverse(&self) -> Self {
        self.clone()
    }

    fn dilation_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        Image2D::from_array(self.slide(image.view(), Extremum::Max, listener))
    }

    fn erosion_with<T: MorphElement>(
        &self,
        image: &Image2D<T>,
        listener: &mut dyn ProgressListener,
    ) -> Image2D<T> {
        Image2D::from_array(self.slide(image.view(), Extremum::Min, listener))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(size: usize, value: u8) -> Image2D<u8> {
        let mut image = Image2D::new(size, size);
        image.set(size / 2, size / 2, value).unwrap();
        image
    }

    #[test]
    fn test_sliding_disk_spike() {
        let image = spike(9, 255);
        let result = SlidingDiskStrel::new(3.0).unwrap().dilation(&image);
        for y in 0..9 {
            for x in 0..9 {
                let (dx, dy) = (x as f64 - 4.0, y as f64 - 4.0);
                let expected = if dx.hypot(dy) <= 3.5 { 255 } else { 0 };
                assert_eq!(result.get(x, y).unwrap(), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_sliding_matches_naive_on_small_images() {
        // disks wider than the image exercise both sentinel ends of every run
        let image = Image2D::from_fn(5, 4, |x, y| ((x * 83 + y * 29) % 101) as i32 - 50);
        for radius in [0.0, 1.0, 2.0, 4.5] {
            let sliding = SlidingDiskStrel::new(radius).unwrap();
            let naive = NaiveDiskStrel::new(radius).unwrap();
            assert_eq!(sliding.dilation(&image), naive.dilation(&image), "r = {}", radius);
            assert_eq!(sliding.erosion(&image), naive.erosion(&image), "r = {}", radius);
        }
    }

    #[test]
    fn test_disk_geometry() {
        let disk = SlidingDiskStrel::new(2.0).unwrap();
        assert_eq!(disk.size(), [5, 5]);
        assert_eq!(disk.offset(), [2, 2]);
        assert_eq!(disk.reverse(), disk);
        assert_eq!(disk.shifts().len(), 21);
        let naive = NaiveDiskStrel::new(2.0).unwrap();
        assert_eq!(naive.mask(), disk.mask());
        assert!(NaiveDiskStrel::new(-0.5).is_err());
    }

    #[test]
    fn test_disk_erosion_of_spike_is_zero() {
        let image = spike(9, 255);
        let result = NaiveDiskStrel::new(3.0).unwrap().erosion(&image);
        assert!(result.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sliding_progress_per_row() {
        let image = spike(6, 1);
        let mut rows = 0;
        let mut listener = |_: &ProgressEvent| rows += 1;
        SlidingDiskStrel::new(1.0)
            .unwrap()
            .dilation_with(&image, &mut listener);
        assert_eq!(rows, 6);
    }
}
