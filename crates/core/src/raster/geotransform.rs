//! Affine geotransformation for rasters
//!
//! Only the cell geometry matters to flow routing: the step length between
//! neighbours and the cell area used to convert cell counts into areas.

use serde::{Deserialize, Serialize};

/// Affine transformation coefficients for a north-up raster.
///
/// ```text
/// x = origin_x + col * pixel_width
/// y = origin_y + row * pixel_height
/// ```
///
/// `pixel_height` is usually negative (rows grow southwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Square-cell transform anchored at the origin.
    pub fn with_cell_size(cell_size: f64) -> Self {
        Self::new(0.0, 0.0, cell_size, -cell_size)
    }

    /// Cell size (assumes square pixels)
    pub fn cell_size(&self) -> f64 {
        self.pixel_width.abs()
    }

    /// Area of one cell in map units squared
    pub fn cell_area(&self) -> f64 {
        (self.pixel_width * self.pixel_height).abs()
    }

    /// Centre of the cell at (row, col) in map coordinates
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_width,
            self.origin_y + (row as f64 + 0.5) * self.pixel_height,
        )
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cell_geometry() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);
        assert_relative_eq!(gt.cell_size(), 10.0);
        assert_relative_eq!(gt.cell_area(), 100.0);

        let (x, y) = gt.cell_center(1, 2);
        assert_relative_eq!(x, 125.0, epsilon = 1e-10);
        assert_relative_eq!(y, 185.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rectangular_cell_area() {
        let gt = GeoTransform::new(0.0, 0.0, 2.0, -3.0);
        assert_relative_eq!(gt.cell_area(), 6.0);
    }
}
