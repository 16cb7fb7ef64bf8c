//! Direction-selection strategies
//!
//! A strategy decides, for one cell, how its outflow is shared among the
//! eight neighbours:
//!
//! - [`D8`]: everything goes to the steepest downslope neighbour.
//! - [`Mfd`]: every downslope neighbour receives a share proportional to
//!   `tan(β)^p`, optionally weighted by contour length (Freeman 1991,
//!   Quinn et al. 1991).
//!
//! Pits and flats get no outflow unless a sink route overrides them.
//!
//! References:
//! - Freeman, T.G. (1991). Calculating catchment area with divergent flow
//!   based on a regular grid. *Computers & Geosciences*, 17(3), 413–422.
//! - Quinn, P. et al. (1991). The prediction of hillslope flow paths.
//!   *Hydrological Processes*, 5(1), 59–79.

use hydroside_core::raster::{Direction, Raster};
use hydroside_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Contour length factor per direction (Quinn et al. 1991):
/// 0.5 · cell size for orthogonal, 0.354 · cell size for diagonal neighbours.
const CONTOUR_ORTHOGONAL: f64 = 0.5;
const CONTOUR_DIAGONAL: f64 = 0.354;

/// Outflow shares of one cell, indexed by direction code.
///
/// The shares sum to 1.0 for a draining cell and to 0.0 for a pit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowFractions([f64; 8]);

impl FlowFractions {
    /// No outflow (pit, flat or no-data)
    pub fn none() -> Self {
        Self::default()
    }

    /// Whole outflow to one neighbour
    pub fn single(direction: Direction) -> Self {
        let mut fractions = Self::default();
        fractions.0[direction.index()] = 1.0;
        fractions
    }

    pub fn get(&self, direction: Direction) -> f64 {
        self.0[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, fraction: f64) {
        self.0[direction.index()] = fraction;
    }

    /// Sum of all shares
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when nothing leaves the cell
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&f| f <= 0.0)
    }

    /// Directions receiving a positive share, in direction order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, f64)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|d| (d, self.0[d.index()]))
            .filter(|&(_, f)| f > 0.0)
    }

    /// Direction with the largest share; the first one wins a tie.
    pub fn primary(&self) -> Option<Direction> {
        let mut best: Option<(Direction, f64)> = None;
        for (dir, fraction) in self.iter() {
            if best.map_or(true, |(_, f)| fraction > f) {
                best = Some((dir, fraction));
            }
        }
        best.map(|(dir, _)| dir)
    }
}

/// Strategy deciding where the outflow of a cell goes.
pub trait FlowRouting {
    /// Human-readable strategy name
    fn name(&self) -> &'static str;

    /// Outflow shares of the cell at (row, col) from the DEM alone.
    fn fractions(&self, dem: &Raster<f64>, row: usize, col: usize) -> FlowFractions;

    /// Outflow shares honouring an optional sink-route grid: a routed cell
    /// sends everything to its route direction.
    fn route(
        &self,
        dem: &Raster<f64>,
        sink_route: Option<&Raster<i32>>,
        row: usize,
        col: usize,
    ) -> FlowFractions {
        match sink_route.and_then(|route| sink_direction(route, row, col)) {
            Some(direction) => FlowFractions::single(direction),
            None => self.fractions(dem, row, col),
        }
    }

    /// Check strategy parameters before a run
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Route direction stored in a sink-route grid.
///
/// A value `k > 0` routes to direction `k % 8` (8 = N, 1 = NE, …, 7 = NW);
/// zero, negative values and no-data mean "no route".
pub fn sink_direction(route: &Raster<i32>, row: usize, col: usize) -> Option<Direction> {
    let code = route.get(row, col).ok()?;
    if route.is_nodata(code) || code <= 0 {
        return None;
    }
    Direction::from_code(code % 8)
}

/// Downslope gradient (drop / step length) towards every valid neighbour.
/// Uphill, level, off-grid and no-data neighbours get 0.
fn downslope_gradients(dem: &Raster<f64>, row: usize, col: usize) -> [f64; 8] {
    let mut gradients = [0.0; 8];
    if !dem.is_valid(row, col) {
        return gradients;
    }

    let z = dem[(row, col)];
    let cell_size = dem.cell_size();

    for dir in Direction::ALL {
        let Some((nr, nc)) = dem.neighbor(row, col, dir) else {
            continue;
        };
        if !dem.is_valid(nr, nc) {
            continue;
        }
        let drop = z - dem[(nr, nc)];
        if drop > 0.0 {
            gradients[dir.index()] = drop / dir.length(cell_size);
        }
    }

    gradients
}

/// Deterministic eight-neighbour routing (steepest descent).
#[derive(Debug, Clone, Copy, Default)]
pub struct D8;

impl FlowRouting for D8 {
    fn name(&self) -> &'static str {
        "D8"
    }

    fn fractions(&self, dem: &Raster<f64>, row: usize, col: usize) -> FlowFractions {
        let gradients = downslope_gradients(dem, row, col);

        let mut steepest: Option<Direction> = None;
        let mut max_gradient = 0.0;
        for dir in Direction::ALL {
            if gradients[dir.index()] > max_gradient {
                max_gradient = gradients[dir.index()];
                steepest = Some(dir);
            }
        }

        steepest.map_or_else(FlowFractions::none, FlowFractions::single)
    }
}

/// Parameters for multiple-flow-direction routing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfdParams {
    /// Convergence exponent p applied to the gradient.
    /// p=1.0: Quinn et al. 1991; p=1.1: Freeman 1991 (default).
    /// Larger values concentrate flow (approaching D8 as p→∞).
    pub exponent: f64,
    /// Weight each share by the contour length of the receiving direction
    pub contour_weighting: bool,
}

impl Default for MfdParams {
    fn default() -> Self {
        Self {
            exponent: 1.1,
            contour_weighting: false,
        }
    }
}

/// Multiple-flow-direction routing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mfd {
    params: MfdParams,
}

impl Mfd {
    pub fn new(params: MfdParams) -> Result<Self> {
        let mfd = Self { params };
        mfd.validate()?;
        Ok(mfd)
    }

    pub fn params(&self) -> &MfdParams {
        &self.params
    }
}

impl FlowRouting for Mfd {
    fn name(&self) -> &'static str {
        "MFD"
    }

    fn fractions(&self, dem: &Raster<f64>, row: usize, col: usize) -> FlowFractions {
        let gradients = downslope_gradients(dem, row, col);

        let mut weights = [0.0; 8];
        let mut sum = 0.0;
        for dir in Direction::ALL {
            let gradient = gradients[dir.index()];
            if gradient <= 0.0 {
                continue;
            }
            let mut weight = gradient.powf(self.params.exponent);
            if self.params.contour_weighting {
                weight *= if dir.is_diagonal() {
                    CONTOUR_DIAGONAL
                } else {
                    CONTOUR_ORTHOGONAL
                };
            }
            weights[dir.index()] = weight;
            sum += weight;
        }

        let mut fractions = FlowFractions::none();
        if sum > 0.0 {
            for dir in Direction::ALL {
                if weights[dir.index()] > 0.0 {
                    fractions.set(dir, weights[dir.index()] / sum);
                }
            }
        }
        fractions
    }

    fn validate(&self) -> Result<()> {
        let p = self.params.exponent;
        if !p.is_finite() || p <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "exponent",
                value: p.to_string(),
                reason: "must be a finite number > 0".into(),
            });
        }
        Ok(())
    }
}

/// Serializable strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum RoutingMethod {
    #[default]
    D8,
    Mfd(MfdParams),
}

impl FlowRouting for RoutingMethod {
    fn name(&self) -> &'static str {
        match self {
            RoutingMethod::D8 => D8.name(),
            RoutingMethod::Mfd(_) => "MFD",
        }
    }

    fn fractions(&self, dem: &Raster<f64>, row: usize, col: usize) -> FlowFractions {
        match self {
            RoutingMethod::D8 => D8.fractions(dem, row, col),
            RoutingMethod::Mfd(params) => Mfd { params: *params }.fractions(dem, row, col),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            RoutingMethod::D8 => Ok(()),
            RoutingMethod::Mfd(params) => Mfd { params: *params }.validate(),
        }
    }
}
