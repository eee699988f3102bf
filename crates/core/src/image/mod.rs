//! Scalar image data structures

mod element;
mod grid2d;
mod grid3d;

pub use element::ScalarElement;
pub use grid2d::{Image2D, ImageStatistics};
pub use grid3d::Image3D;
