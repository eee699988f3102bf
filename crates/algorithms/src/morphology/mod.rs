//! Grayscale mathematical morphology on planar images and volumes
//!
//! Classical morphological operations for image analysis:
//! - **Erosion**: minimum filter (shrinks bright regions)
//! - **Dilation**: maximum filter (expands bright regions)
//! - **Opening**: erosion then dilation (removes small bright features)
//! - **Closing**: dilation then erosion (fills small dark gaps)
//! - **Gradient**: dilation minus erosion (edge detection)
//! - **Top-hat**: original minus opening (bright feature extraction)
//! - **Black-hat**: closing minus original (dark feature extraction)
//!
//! Every structuring element ("strel") is a set of shifts relative to an
//! anchor: `dilation(X)(p) = max X(p + s)` and `erosion(X)(p) = min X(p + s)`
//! over the shifts `s` that land inside the image. Three families are
//! available, with the same result for the same footprint:
//! - elementary strels (segments, 3x3 crosses) filtered in place with a
//!   monotone [`LocalExtremumBuffer`] sweep,
//! - separable strels (square, diamond, octagon, cube) filtered as a
//!   sequence of elementary strels,
//! - disks and balls, filtered either by a full neighbor scan or by a
//!   [`LocalHistogram`] sliding along each row.

mod any;
mod ball;
mod buffer;
mod closing;
mod cross;
mod cube;
mod diagonal;
mod diamond;
mod dilate;
mod disk;
mod element;
mod erode;
mod filter;
mod gradient;
mod histogram;
mod indexed_rows;
mod linear;
mod mask;
mod octagon;
mod opening;
mod planar;
mod scan;
mod separable;
mod square;
mod strel;
mod tophat;

pub use any::{AnyStrel2D, AnyStrel3D};
pub use ball::{NaiveBallStrel3D, SlidingBallStrel3D};
pub use buffer::{Extremum, LocalExtremumBuffer};
pub use closing::{closing, closing_3d};
pub use cross::{Cross3x3Strel, Direction, ShiftedCross3x3Strel};
pub use cube::CubeStrel;
pub use diagonal::{LinearDiagDownStrel, LinearDiagUpStrel};
pub use diamond::DiamondStrel;
pub use dilate::{dilate, dilate_3d};
pub use disk::{NaiveDiskStrel, SlidingDiskStrel};
pub use element::{StructuringElement, StructuringElement3D};
pub use erode::{erode, erode_3d};
pub use filter::{Morphology, Morphology3D, MorphologyParams, MorphologyParams3D, Operation};
pub use gradient::{
    external_gradient, external_gradient_3d, gradient, gradient_3d, internal_gradient,
    internal_gradient_3d,
};
pub use histogram::{ByteHistogram, LocalHistogram, MorphElement, SparseHistogram};
pub use indexed_rows::{IndexedRowsStrel2D, IndexedRowsStrel3D, Run};
pub use linear::{LinearDepthStrel3D, LinearHorizontalStrel, LinearVerticalStrel};
pub use mask::{MaskStrel2D, MaskStrel3D};
pub use octagon::OctagonStrel;
pub use opening::{opening, opening_3d};
pub use planar::{apply_per_slice, in_place_per_slice};
pub use separable::{
    mask_from_shifts_2d, mask_from_shifts_3d, minkowski_shifts_2d, minkowski_shifts_3d,
    reversed_sequence, ElementaryStrel2D, ElementaryStrel3D, SeparableStrel2D, SeparableStrel3D,
};
pub use square::SquareStrel;
pub use strel::{
    reverse_mask_2d, reverse_mask_3d, reverse_offset, shifts_from_mask_2d, shifts_from_mask_3d,
    InPlaceStrel2D, InPlaceStrel3D, Strel2D, Strel3D,
};
pub use tophat::{black_hat, black_hat_3d, top_hat, top_hat_3d};
