//! Sliding-window extremum buffer
//!
//! A fixed-size circular buffer that tracks the maximum (or minimum) of the
//! last K inserted values. The tracked extremum is updated eagerly when a new
//! value beats it and is recomputed lazily, in O(K), only after the slot
//! holding it has been overwritten. Sweeping a line of length N therefore
//! costs O(N) amortized, independently of K.

use surtmorph_core::ScalarElement;

/// Which extremum a buffer or histogram tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Running maximum (dilation)
    Max,
    /// Running minimum (erosion)
    Min,
}

impl Extremum {
    /// Fill value for positions outside the image: the value that can never
    /// win, i.e. the type minimum for `Max` and the type maximum for `Min`
    pub fn sentinel<T: ScalarElement>(self) -> T {
        match self {
            Extremum::Max => T::min_value(),
            Extremum::Min => T::max_value(),
        }
    }

    /// Whether `candidate` strictly beats `current`
    #[inline]
    pub fn beats<T: PartialOrd>(self, candidate: T, current: T) -> bool {
        match self {
            Extremum::Max => candidate > current,
            Extremum::Min => candidate < current,
        }
    }

    /// The dual extremum
    pub fn opposite(self) -> Self {
        match self {
            Extremum::Max => Extremum::Min,
            Extremum::Min => Extremum::Max,
        }
    }
}

/// Circular buffer keeping the extremum of its last `len()` values
#[derive(Debug, Clone)]
pub struct LocalExtremumBuffer<T> {
    buffer: Vec<T>,
    write_index: usize,
    extremum: T,
    dirty: bool,
    mode: Extremum,
}

impl<T: ScalarElement> LocalExtremumBuffer<T> {
    /// Create a buffer of `size` slots, all holding the sentinel of `mode`.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize, mode: Extremum) -> Self {
        assert!(size > 0, "extremum buffer needs at least one slot");
        let sentinel = mode.sentinel();
        Self {
            buffer: vec![sentinel; size],
            write_index: 0,
            extremum: sentinel,
            dirty: false,
            mode,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false; a buffer has at least one slot
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn mode(&self) -> Extremum {
        self.mode
    }

    /// Reset every slot to `value`
    pub fn fill(&mut self, value: T) {
        self.buffer.fill(value);
        self.write_index = 0;
        self.extremum = value;
        self.dirty = false;
    }

    /// Push `value`, evicting the oldest one
    #[inline]
    pub fn add(&mut self, value: T) {
        let evicted = std::mem::replace(&mut self.buffer[self.write_index], value);
        self.write_index += 1;
        if self.write_index == self.buffer.len() {
            self.write_index = 0;
        }

        if self.mode.beats(value, self.extremum) {
            // beats the tracked value, hence every value still in the window
            self.extremum = value;
            self.dirty = false;
        } else if evicted == self.extremum && value != self.extremum {
            // another copy may or may not remain; decide on next read
            self.dirty = true;
        }
    }

    /// Extremum of the current window
    #[inline]
    pub fn extremum(&mut self) -> T {
        if self.dirty {
            self.recompute();
        }
        self.extremum
    }

    fn recompute(&mut self) {
        let mode = self.mode;
        let mut best = self.buffer[0];
        for &value in &self.buffer[1..] {
            if mode.beats(value, best) {
                best = value;
            }
        }
        self.extremum = best;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_max(values: &[i32], end: usize, size: usize) -> i32 {
        let start = (end + 1).saturating_sub(size);
        values[start..=end].iter().copied().max().unwrap()
    }

    #[test]
    fn test_running_max_matches_window_scan() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3, 2, 3, 8, 4];
        let size = 4;
        let mut buffer = LocalExtremumBuffer::new(size, Extremum::Max);
        for (i, &v) in values.iter().enumerate() {
            buffer.add(v);
            let expected = if i + 1 < size {
                // window still holds sentinels, which never win
                window_max(&values, i, i + 1)
            } else {
                window_max(&values, i, size)
            };
            assert_eq!(buffer.extremum(), expected, "window ending at {}", i);
        }
    }

    #[test]
    fn test_running_min_with_evicted_duplicates() {
        let mut buffer = LocalExtremumBuffer::new(3, Extremum::Min);
        buffer.fill(10u8);
        buffer.add(2);
        buffer.add(2);
        buffer.add(7);
        assert_eq!(buffer.extremum(), 2);
        // evicts the first 2, a second copy remains
        buffer.add(8);
        assert_eq!(buffer.extremum(), 2);
        // evicts the last 2
        buffer.add(9);
        assert_eq!(buffer.extremum(), 7);
    }

    #[test]
    fn test_fill_resets_window() {
        let mut buffer = LocalExtremumBuffer::new(3, Extremum::Max);
        buffer.add(100.0f32);
        buffer.fill(f32::NEG_INFINITY);
        assert_eq!(buffer.extremum(), f32::NEG_INFINITY);
        buffer.add(-5.0);
        assert_eq!(buffer.extremum(), -5.0);
    }

    #[test]
    fn test_single_slot_tracks_last_value() {
        let mut buffer = LocalExtremumBuffer::new(1, Extremum::Max);
        for v in [5u16, 3, 8, 1] {
            buffer.add(v);
            assert_eq!(buffer.extremum(), v);
        }
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Extremum::Max.sentinel::<u8>(), 0);
        assert_eq!(Extremum::Min.sentinel::<u8>(), 255);
        assert_eq!(Extremum::Max.opposite(), Extremum::Min);
    }
}
