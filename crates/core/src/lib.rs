//! # SurtMorph Core
//!
//! Core types and traits shared by the SurtMorph crates.
//!
//! This crate provides:
//! - `Image2D<T>` / `Image3D<T>`: scalar grids backed by ndarray
//! - `ScalarElement`: numeric element types with min/max sentinels
//! - Progress listeners for long-running sweeps
//! - Algorithm traits for consistent API

pub mod error;
pub mod image;
pub mod progress;

pub use error::{Error, Result};
pub use image::{Image2D, Image3D, ImageStatistics, ScalarElement};
pub use progress::{ProgressEvent, ProgressListener, Silent};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image2D, Image3D, ScalarElement};
    pub use crate::progress::{ProgressEvent, ProgressListener, Silent};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in SurtMorph.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
