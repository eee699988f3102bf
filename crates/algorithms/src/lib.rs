//! # SurtMorph Algorithms
//!
//! Structuring elements and grayscale morphological filtering for
//! SurtMorph images.
//!
//! ## Available Algorithm Categories
//!
//! - **morphology**: dilation, erosion, opening, closing, gradients and
//!   top-hats with linear, separable, disk and ball structuring elements

pub mod morphology;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::morphology::{
        black_hat, closing, dilate, erode, gradient, opening, top_hat, AnyStrel2D, AnyStrel3D,
        InPlaceStrel2D, InPlaceStrel3D, Morphology, Morphology3D, MorphologyParams,
        MorphologyParams3D, Operation, Strel2D, Strel3D, StructuringElement,
        StructuringElement3D,
    };
    pub use surtmorph_core::prelude::*;
}
