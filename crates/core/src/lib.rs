//! # hydroside core
//!
//! Core types for the hydroside flow-routing library.
//!
//! This crate provides:
//! - `Raster<T>`: owned 2D grid with a no-data sentinel, addressable by
//!   (row, col) or linear index
//! - `GeoTransform`: cell size and cell area
//! - `Direction`: the eight neighbour directions, their offsets, unit
//!   vectors and step lengths
//! - `Error` / `Result` and the `Algorithm` trait shared by all algorithms

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{Direction, GeoTransform, Raster, RasterElement, NO_DIRECTION};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Direction, GeoTransform, Raster, RasterElement, NO_DIRECTION};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in hydroside.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    type Input;
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    type Error: std::error::Error;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(
        &self,
        input: Self::Input,
    ) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
