//! Local histograms over irregular neighborhoods
//!
//! Used by the sliding disk and ball strels: the neighborhood is a multiset
//! of a fixed number of values that changes by one `replace(old, new)` per
//! scanline each time the sweep advances. The histogram answers min/max
//! queries, recomputing an extremum only when its count drops to zero.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use surtmorph_core::ScalarElement;

use super::buffer::Extremum;

/// Multiset of values with fast extremum queries
pub trait LocalHistogram<T> {
    /// Histogram holding `count` copies of `value`
    fn with_fill(count: usize, value: T) -> Self;

    /// Reinitialise to `count` copies of `value`
    fn reset(&mut self, count: usize, value: T);

    /// Remove one `old` and insert one `new`
    fn replace(&mut self, old: T, new: T);

    /// Smallest value with a nonzero count
    fn min_value(&mut self) -> T;

    /// Largest value with a nonzero count
    fn max_value(&mut self) -> T;

    /// Total number of values held
    fn count(&self) -> usize;

    fn extremum(&mut self, mode: Extremum) -> T {
        match mode {
            Extremum::Max => self.max_value(),
            Extremum::Min => self.min_value(),
        }
    }
}

/// Element types with an associated histogram implementation.
///
/// Bytes use a dense 256-bin array; every other type uses the sparse
/// ordered-map variant.
pub trait MorphElement: ScalarElement {
    type Histogram: LocalHistogram<Self>;
}

impl MorphElement for u8 {
    type Histogram = ByteHistogram;
}

macro_rules! impl_sparse_histogram_element {
    ($($t:ty),*) => {
        $(
            impl MorphElement for $t {
                type Histogram = SparseHistogram<$t>;
            }
        )*
    };
}

impl_sparse_histogram_element!(i8, i16, i32, i64, u16, u32, u64, f32, f64);

/// Histogram of byte values stored as 256 counts
#[derive(Debug, Clone)]
pub struct ByteHistogram {
    counts: [usize; 256],
    total: usize,
    min: u8,
    max: u8,
    min_dirty: bool,
    max_dirty: bool,
}

impl ByteHistogram {
    /// Number of copies of `value` currently held
    pub fn count_of(&self, value: u8) -> usize {
        self.counts[value as usize]
    }
}

impl LocalHistogram<u8> for ByteHistogram {
    fn with_fill(count: usize, value: u8) -> Self {
        let mut histogram = Self {
            counts: [0; 256],
            total: 0,
            min: value,
            max: value,
            min_dirty: false,
            max_dirty: false,
        };
        histogram.reset(count, value);
        histogram
    }

    fn reset(&mut self, count: usize, value: u8) {
        self.counts = [0; 256];
        self.counts[value as usize] = count;
        self.total = count;
        self.min = value;
        self.max = value;
        self.min_dirty = false;
        self.max_dirty = false;
    }

    #[inline]
    fn replace(&mut self, old: u8, new: u8) {
        if old == new {
            return;
        }
        self.counts[old as usize] -= 1;
        self.counts[new as usize] += 1;

        if new > self.max {
            self.max = new;
            self.max_dirty = false;
        } else if old == self.max && self.counts[old as usize] == 0 {
            self.max_dirty = true;
        }

        if new < self.min {
            self.min = new;
            self.min_dirty = false;
        } else if old == self.min && self.counts[old as usize] == 0 {
            self.min_dirty = true;
        }
    }

    fn min_value(&mut self) -> u8 {
        if self.min_dirty {
            // the true minimum can only have moved up
            let start = self.min as usize;
            self.min = (start..256)
                .find(|&i| self.counts[i] > 0)
                .map_or(u8::MAX, |i| i as u8);
            self.min_dirty = false;
        }
        self.min
    }

    fn max_value(&mut self) -> u8 {
        if self.max_dirty {
            // the true maximum can only have moved down
            let start = self.max as usize;
            self.max = (0..=start)
                .rev()
                .find(|&i| self.counts[i] > 0)
                .map_or(0, |i| i as u8);
            self.max_dirty = false;
        }
        self.max
    }

    fn count(&self) -> usize {
        self.total
    }
}

/// Map key ordering values by [`ScalarElement::total_cmp`]
#[derive(Debug, Clone, Copy)]
struct Key<T>(T);

impl<T: ScalarElement> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl<T: ScalarElement> Eq for Key<T> {}

impl<T: ScalarElement> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ScalarElement> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Histogram of arbitrary-range values stored as an ordered map of counts
#[derive(Debug, Clone)]
pub struct SparseHistogram<T> {
    counts: BTreeMap<Key<T>, usize>,
    total: usize,
}

impl<T: ScalarElement> SparseHistogram<T> {
    /// Number of distinct values currently held
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    fn remove_one(&mut self, value: T) {
        let key = Key(value);
        if let Some(count) = self.counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&key);
            }
        }
    }
}

impl<T: ScalarElement> LocalHistogram<T> for SparseHistogram<T> {
    fn with_fill(count: usize, value: T) -> Self {
        let mut histogram = Self {
            counts: BTreeMap::new(),
            total: 0,
        };
        histogram.reset(count, value);
        histogram
    }

    fn reset(&mut self, count: usize, value: T) {
        self.counts.clear();
        if count > 0 {
            self.counts.insert(Key(value), count);
        }
        self.total = count;
    }

    #[inline]
    fn replace(&mut self, old: T, new: T) {
        if Key(old) == Key(new) {
            return;
        }
        self.remove_one(old);
        *self.counts.entry(Key(new)).or_insert(0) += 1;
    }

    fn min_value(&mut self) -> T {
        self.counts
            .first_key_value()
            .map_or_else(T::max_value, |(key, _)| key.0)
    }

    fn max_value(&mut self) -> T {
        self.counts
            .last_key_value()
            .map_or_else(T::min_value, |(key, _)| key.0)
    }

    fn count(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_histogram_tracks_extrema() {
        let mut hist = ByteHistogram::with_fill(5, 0);
        assert_eq!(hist.max_value(), 0);
        hist.replace(0, 200);
        hist.replace(0, 50);
        assert_eq!(hist.max_value(), 200);
        assert_eq!(hist.min_value(), 0);
        hist.replace(200, 10);
        assert_eq!(hist.max_value(), 50);
        hist.replace(0, 30);
        hist.replace(0, 40);
        hist.replace(0, 60);
        assert_eq!(hist.min_value(), 10);
        assert_eq!(hist.count(), 5);
        assert_eq!(hist.count_of(0), 0);
    }

    #[test]
    fn test_byte_histogram_keeps_duplicates() {
        let mut hist = ByteHistogram::with_fill(3, 0);
        hist.replace(0, 9);
        hist.replace(0, 9);
        hist.replace(9, 1);
        assert_eq!(hist.max_value(), 9);
        hist.replace(9, 2);
        assert_eq!(hist.max_value(), 2);
    }

    #[test]
    fn test_byte_histogram_reset() {
        let mut hist = ByteHistogram::with_fill(4, 10);
        hist.replace(10, 250);
        hist.reset(7, 255);
        assert_eq!(hist.min_value(), 255);
        assert_eq!(hist.max_value(), 255);
        assert_eq!(hist.count(), 7);
    }

    #[test]
    fn test_sparse_histogram_floats() {
        let mut hist = SparseHistogram::with_fill(4, f64::NEG_INFINITY);
        hist.replace(f64::NEG_INFINITY, 2.5);
        hist.replace(f64::NEG_INFINITY, -1.25);
        assert_eq!(hist.max_value(), 2.5);
        assert_eq!(hist.min_value(), f64::NEG_INFINITY);
        hist.replace(2.5, 0.5);
        assert_eq!(hist.max_value(), 0.5);
        assert_eq!(hist.distinct(), 3);
        assert_eq!(hist.extremum(Extremum::Max), 0.5);
        assert_eq!(hist.count(), 4);
    }

    #[test]
    fn test_sparse_histogram_integers() {
        let mut hist = SparseHistogram::with_fill(3, i32::MAX);
        hist.replace(i32::MAX, -7);
        hist.replace(i32::MAX, 12);
        assert_eq!(hist.extremum(Extremum::Min), -7);
        hist.replace(-7, i32::MAX);
        assert_eq!(hist.extremum(Extremum::Min), 12);
    }
}
