//! Raster data structures and neighbour geometry

mod direction;
mod element;
mod geotransform;
mod grid;

pub use direction::{Direction, NO_DIRECTION};
pub use element::RasterElement;
pub use geotransform::GeoTransform;
pub use grid::Raster;
