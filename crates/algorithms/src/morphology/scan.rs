//! Naive neighbor scans: every output sample visits every shift.
//!
//! O(N * |shifts|), used by the dense-mask strels and the naive disk/ball.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use surtmorph_core::{ProgressEvent, ProgressListener};

use super::buffer::Extremum;
use super::histogram::MorphElement;

/// Extremum of `image` over `p + shifts` for every position `p`, shifts given
/// as `[dx, dy]`. Out-of-bounds positions are skipped.
pub(crate) fn neighbor_scan_2d<T: MorphElement>(
    image: ArrayView2<'_, T>,
    shifts: &[[isize; 2]],
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Array2<T> {
    let (size_y, size_x) = image.dim();
    let sentinel = mode.sentinel::<T>();
    let mut output = Array2::from_elem((size_y, size_x), sentinel);

    for (y, mut row) in output.axis_iter_mut(Axis(0)).enumerate() {
        for (x, out) in row.iter_mut().enumerate() {
            let mut best = sentinel;
            for &[dx, dy] in shifts {
                let xx = x as isize + dx;
                let yy = y as isize + dy;
                if xx < 0 || yy < 0 || xx >= size_x as isize || yy >= size_y as isize {
                    continue;
                }
                let value = image[[yy as usize, xx as usize]];
                if mode.beats(value, best) {
                    best = value;
                }
            }
            *out = best;
        }
        listener.on_progress(&ProgressEvent::new(label, y + 1, size_y));
    }
    output
}

/// Extremum of `image` over `p + shifts` for every position `p`, shifts given
/// as `[dx, dy, dz]`. Reports progress once per plane.
pub(crate) fn neighbor_scan_3d<T: MorphElement>(
    image: ArrayView3<'_, T>,
    shifts: &[[isize; 3]],
    mode: Extremum,
    label: &'static str,
    listener: &mut dyn ProgressListener,
) -> Array3<T> {
    let (size_z, size_y, size_x) = image.dim();
    let dims = [size_x as isize, size_y as isize, size_z as isize];
    let sentinel = mode.sentinel::<T>();
    let mut output = Array3::from_elem((size_z, size_y, size_x), sentinel);

    for (z, mut plane) in output.axis_iter_mut(Axis(0)).enumerate() {
        for ((y, x), out) in plane.indexed_iter_mut() {
            let mut best = sentinel;
            for shift in shifts {
                let pos = [
                    x as isize + shift[0],
                    y as isize + shift[1],
                    z as isize + shift[2],
                ];
                if (0..3).any(|d| pos[d] < 0 || pos[d] >= dims[d]) {
                    continue;
                }
                let value = image[[pos[2] as usize, pos[1] as usize, pos[0] as usize]];
                if mode.beats(value, best) {
                    best = value;
                }
            }
            *out = best;
        }
        listener.on_progress(&ProgressEvent::new(label, z + 1, size_z));
    }
    output
}
