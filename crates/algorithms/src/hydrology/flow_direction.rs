//! D8 flow direction grid
//!
//! Steepest-descent direction of every cell, encoded with the same
//! direction codes used by sink routes and target networks:
//! ```text
//!   7  0  1
//!   6     2
//!   5  4  3
//! ```
//! `-1` marks a pit or flat (no downslope neighbour); cells that are
//! no-data in the DEM get [`DIRECTION_NODATA`].

use hydroside_core::raster::{Direction, Raster};
use hydroside_core::{Algorithm, Error, Result};
use ndarray::Array2;

use super::routing::{FlowRouting, D8};
use crate::maybe_rayon::*;

/// No-data value of direction grids
pub const DIRECTION_NODATA: i32 = -9999;

/// Flow direction algorithm (D8)
#[derive(Debug, Clone, Default)]
pub struct FlowDirection;

impl Algorithm for FlowDirection {
    type Input = Raster<f64>;
    type Output = Raster<i32>;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Flow Direction (D8)"
    }

    fn description(&self) -> &'static str {
        "Calculate D8 flow direction codes from a DEM"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        flow_direction(&input)
    }
}

/// Calculate D8 flow direction from a DEM.
///
/// # Arguments
/// * `dem` - Input DEM
///
/// # Returns
/// Raster<i32> with direction codes 0-7, `-1` for pits and flats,
/// [`DIRECTION_NODATA`] where the DEM is no-data
pub fn flow_direction(dem: &Raster<f64>) -> Result<Raster<i32>> {
    if dem.is_empty() {
        return Err(Error::EmptyRaster);
    }
    let (rows, cols) = dem.shape();

    let output_data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .map(|col| {
                    if !dem.is_valid(row, col) {
                        DIRECTION_NODATA
                    } else {
                        Direction::encode(D8.fractions(dem, row, col).primary())
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let mut output = dem.with_same_meta::<i32>();
    output.set_nodata(Some(DIRECTION_NODATA));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydroside_core::{GeoTransform, NO_DIRECTION};

    fn dem_from(f: impl Fn(usize, usize) -> f64) -> Raster<f64> {
        let mut dem = Raster::new(5, 5);
        dem.set_transform(GeoTransform::new(0.0, 5.0, 1.0, -1.0));
        for row in 0..5 {
            for col in 0..5 {
                dem.set(row, col, f(row, col)).unwrap();
            }
        }
        dem
    }

    #[test]
    fn test_flow_direction_slope_east() {
        let dem = dem_from(|_, col| (5 - col) as f64 * 10.0);
        let fdir = flow_direction(&dem).unwrap();
        let center = fdir.get(2, 2).unwrap();
        assert_eq!(center, Direction::E.code(), "Expected flow direction E, got {}", center);
    }

    #[test]
    fn test_flow_direction_slope_south() {
        let dem = dem_from(|row, _| (5 - row) as f64 * 10.0);
        let fdir = flow_direction(&dem).unwrap();
        assert_eq!(fdir.get(2, 2).unwrap(), Direction::S.code());
        // Bottom row has nowhere lower to go
        assert_eq!(fdir.get(4, 2).unwrap(), NO_DIRECTION);
    }

    #[test]
    fn test_flow_direction_pit() {
        let dem = dem_from(|row, col| if (row, col) == (2, 2) { 1.0 } else { 10.0 });
        let fdir = flow_direction(&dem).unwrap();
        assert_eq!(fdir.get(2, 2).unwrap(), NO_DIRECTION, "Expected pit");
        assert_eq!(fdir.get(1, 1).unwrap(), Direction::SE.code());
        assert_eq!(fdir.get(3, 2).unwrap(), Direction::N.code());
    }

    #[test]
    fn test_flow_direction_diagonal() {
        let dem = dem_from(|row, col| (10 - row - col) as f64 * 10.0);
        let fdir = flow_direction(&dem).unwrap();
        assert_eq!(fdir.get(2, 2).unwrap(), Direction::SE.code());
    }

    #[test]
    fn test_flow_direction_nodata() {
        let mut dem = dem_from(|row, _| (5 - row) as f64);
        dem.set(2, 2, f64::NAN).unwrap();
        let fdir = flow_direction(&dem).unwrap();

        assert_eq!(fdir.nodata(), Some(DIRECTION_NODATA));
        assert_eq!(fdir.get(2, 2).unwrap(), DIRECTION_NODATA);
        // The cell above cannot drain into no-data and picks a diagonal
        let above = fdir.get(1, 2).unwrap();
        assert!(above == Direction::SE.code() || above == Direction::SW.code());
    }
}
