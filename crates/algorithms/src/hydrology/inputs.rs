//! Input rasters of the flow engine

use hydroside_core::raster::Raster;
use hydroside_core::{Error, Result};

/// Rasters consumed by the flow engine. Only the DEM is required; every
/// other grid must share its shape.
#[derive(Debug, Clone, Copy)]
pub struct FlowInputs<'a> {
    /// Elevation
    pub dem: &'a Raster<f64>,
    /// Routing overrides for pits and flats (see [`sink_direction`](super::sink_direction))
    pub sink_route: Option<&'a Raster<i32>>,
    /// Per-cell weight, 1.0 when absent
    pub weight: Option<&'a Raster<f64>>,
    /// Per-cell material, 1.0 when absent
    pub material: Option<&'a Raster<f64>>,
    /// Stream network carrying stream direction codes; no-data outside
    pub target: Option<&'a Raster<i32>>,
    /// Values averaged over each catchment
    pub mean_input: Option<&'a Raster<f64>>,
}

impl<'a> FlowInputs<'a> {
    pub fn new(dem: &'a Raster<f64>) -> Self {
        Self {
            dem,
            sink_route: None,
            weight: None,
            material: None,
            target: None,
            mean_input: None,
        }
    }

    pub fn with_sink_route(mut self, sink_route: &'a Raster<i32>) -> Self {
        self.sink_route = Some(sink_route);
        self
    }

    pub fn with_weight(mut self, weight: &'a Raster<f64>) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_material(mut self, material: &'a Raster<f64>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_target(mut self, target: &'a Raster<i32>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_mean_input(mut self, mean_input: &'a Raster<f64>) -> Self {
        self.mean_input = Some(mean_input);
        self
    }

    /// Reject an empty DEM and auxiliary grids of a different shape.
    pub fn validate(&self) -> Result<()> {
        if self.dem.is_empty() {
            return Err(Error::EmptyRaster);
        }
        if let Some(grid) = self.sink_route {
            self.dem.check_shape(grid, "sink_route")?;
        }
        if let Some(grid) = self.weight {
            self.dem.check_shape(grid, "weight")?;
        }
        if let Some(grid) = self.material {
            self.dem.check_shape(grid, "material")?;
        }
        if let Some(grid) = self.target {
            self.dem.check_shape(grid, "target")?;
        }
        if let Some(grid) = self.mean_input {
            self.dem.check_shape(grid, "mean_input")?;
        }
        Ok(())
    }
}

/// Optional grid read through one fallback rule: an absent grid yields
/// `default`, a no-data cell of a present grid yields `None` from
/// [`AuxGrid::defined`] and 0.0 from [`AuxGrid::value`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct AuxGrid<'a> {
    grid: Option<&'a Raster<f64>>,
    default: f64,
}

impl<'a> AuxGrid<'a> {
    pub(crate) fn new(grid: Option<&'a Raster<f64>>, default: f64) -> Self {
        Self { grid, default }
    }

    pub(crate) fn is_present(&self) -> bool {
        self.grid.is_some()
    }

    /// Cell value, `None` where a present grid holds no-data
    pub(crate) fn defined(&self, row: usize, col: usize) -> Option<f64> {
        match self.grid {
            None => Some(self.default),
            Some(grid) => {
                let value = grid[(row, col)];
                (!grid.is_nodata(value)).then_some(value)
            }
        }
    }

    /// Cell value with no-data read as 0.0
    pub(crate) fn value(&self, row: usize, col: usize) -> f64 {
        self.defined(row, col).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_dem() {
        let dem: Raster<f64> = Raster::new(0, 0);
        assert!(matches!(FlowInputs::new(&dem).validate(), Err(Error::EmptyRaster)));
    }

    #[test]
    fn test_validate_rejects_mismatched_grids() {
        let dem: Raster<f64> = Raster::new(4, 4);
        let weight: Raster<f64> = Raster::new(4, 5);
        let target: Raster<i32> = Raster::new(3, 4);

        let err = FlowInputs::new(&dem).with_weight(&weight).validate();
        assert!(matches!(err, Err(Error::SizeMismatch { name: "weight", .. })));

        let err = FlowInputs::new(&dem).with_target(&target).validate();
        assert!(matches!(err, Err(Error::SizeMismatch { name: "target", .. })));
    }

    #[test]
    fn test_aux_grid_fallbacks() {
        let absent = AuxGrid::new(None, 1.0);
        assert!(!absent.is_present());
        assert_eq!(absent.value(3, 3), 1.0);
        assert_eq!(absent.defined(0, 0), Some(1.0));

        let mut grid = Raster::from_vec(vec![2.0, -9999.0], 1, 2).unwrap();
        grid.set_nodata(Some(-9999.0));
        let present = AuxGrid::new(Some(&grid), 1.0);
        assert_eq!(present.value(0, 0), 2.0);
        assert_eq!(present.value(0, 1), 0.0);
        assert_eq!(present.defined(0, 1), None);
    }
}
