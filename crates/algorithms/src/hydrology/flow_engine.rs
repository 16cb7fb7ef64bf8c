//! Flow accumulation engine
//!
//! Routes weighted contributions over a DEM and accumulates, for every
//! cell, what drains through it:
//!
//! - flow accumulation (sum of upstream weights, in cells or area units)
//! - flow path length (optional)
//! - mean of an input grid over each catchment (optional)
//! - total accumulated material, split into left-bank and right-bank
//!   contributions where flow enters a stream network (optional)
//!
//! A run has three phases:
//!
//! 1. **initialize**: every valid source cell is seeded with its own weight
//!    (and weight × value, weight × material).
//! 2. **traverse**: cells are visited from highest to lowest elevation
//!    (stable, so ties keep raster order). With a sink-route grid, routes
//!    may cross flats or climb, so the order follows the routing graph
//!    instead ([`routing_schedule`]). The routing strategy splits each
//!    cell's outflow among its neighbours and [`FlowEngine::add_fraction`]
//!    pushes the shares downstream. A cell is only visited after every
//!    cell draining into it, so its sums are complete when it propagates.
//! 3. **finalize**: per-cell normalization and no-data masking, run in
//!    parallel with the `parallel` feature.
//!
//! Point mode ([`FlowEngine::run_point`]) instead computes the share (in
//! percent) of each cell's outflow that reaches one outlet cell.

use hydroside_core::raster::{Direction, Raster};
use hydroside_core::{Algorithm, Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::candidate_queue::{CandidateQueue, QueueOrder};
use super::inputs::{AuxGrid, FlowInputs};
use super::routing::{FlowFractions, FlowRouting, RoutingMethod};
use super::side::{find_sides, Sides};
use crate::maybe_rayon::*;

/// Unit of the flow accumulation output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationUnit {
    /// Weighted number of cells
    Cells,
    /// Weighted number of cells × cell area
    #[default]
    CellArea,
}

/// Parameters for flow accumulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    /// Source sampling stride: only cells with `row % step == 0` and
    /// `col % step == 0` seed their own contribution. Every cell is still
    /// routed. Must be >= 1. Default: 1
    pub step: usize,
    /// Unit of the accumulation output. Default: cell area
    pub unit: AccumulationUnit,
    /// Compute the flow path length grid. Default: false
    pub flow_path: bool,
    /// Compute accumulated material grids. They are also produced whenever
    /// a material or target grid is supplied. Default: false
    pub material: bool,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            step: 1,
            unit: AccumulationUnit::CellArea,
            flow_path: false,
            material: false,
        }
    }
}

/// Accumulated material, total and split by stream bank
#[derive(Debug, Clone)]
pub struct MaterialAccumulation {
    pub total: Raster<f64>,
    /// Material entering the network from the left bank
    pub left: Raster<f64>,
    /// Material entering the network from the right bank
    pub right: Raster<f64>,
}

/// Output grids of a run. No-data is `NaN`.
#[derive(Debug, Clone)]
pub struct FlowOutputs {
    pub accumulation: Raster<f64>,
    pub flow_path: Option<Raster<f64>>,
    pub catchment_mean: Option<Raster<f64>>,
    pub material: Option<MaterialAccumulation>,
}

/// Phase of a [`FlowEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Created,
    Initialized,
    Traversed,
    Finalized,
}

/// How left/right material follows one flow step
#[derive(Debug, Clone, Copy)]
enum Transfer {
    Proportional,
    Sided(Sides),
}

impl MaterialAccumulation {
    fn transfer(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
        fraction: f64,
        transfer: Transfer,
    ) {
        let total = self.total[from];
        let left = self.left[from];
        let right = self.right[from];

        self.total[to] += fraction * total;

        match transfer {
            Transfer::Proportional => {
                self.left[to] += fraction * left;
                self.right[to] += fraction * right;
            }
            Transfer::Sided(Sides { left: true, right: true }) => {
                self.left[to] += 0.5 * fraction * left;
                self.right[to] += 0.5 * fraction * right;
            }
            Transfer::Sided(Sides { left: false, right: true }) => {
                self.right[to] += fraction * right;
            }
            Transfer::Sided(Sides { left: true, right: false }) => {
                self.left[to] += fraction * left;
            }
            Transfer::Sided(Sides { left: false, right: false }) => {}
        }
    }
}

fn output_raster(dem: &Raster<f64>) -> Raster<f64> {
    let mut raster = dem.with_same_meta::<f64>();
    raster.set_nodata(Some(f64::NAN));
    raster
}

fn is_source(step: usize, row: usize, col: usize) -> bool {
    row % step == 0 && col % step == 0
}

/// Valid DEM cells ordered from highest to lowest elevation.
/// Equal elevations keep raster scan order.
pub fn elevation_schedule(dem: &Raster<f64>) -> Vec<(usize, usize)> {
    let mut cells: Vec<((usize, usize), f64)> = dem
        .indexed_iter()
        .filter_map(|(cell, &z)| (!dem.is_nodata(z)).then_some((cell, z)))
        .collect();
    cells.sort_by(|a, b| b.1.total_cmp(&a.1));
    cells.into_iter().map(|(cell, _)| cell).collect()
}

/// Valid DEM cells ordered so that every cell comes after all cells
/// routing into it (Kahn's algorithm over the routing graph, sink routes
/// included). Among cells that are ready at the same time the highest
/// leaves first, ties in raster scan order. Cells caught in a routing cycle
/// cannot be ordered and follow at the end, highest first.
pub fn routing_schedule<R: FlowRouting>(
    dem: &Raster<f64>,
    sink_route: Option<&Raster<i32>>,
    routing: &R,
) -> Vec<(usize, usize)> {
    let (rows, cols) = dem.shape();
    let mut pending = Array2::<u32>::zeros((rows, cols));
    let mut receivers: Vec<FlowFractions> = Vec::with_capacity(rows * cols);

    for ((row, col), &z) in dem.indexed_iter() {
        let fractions = if dem.is_nodata(z) {
            FlowFractions::none()
        } else {
            routing.route(dem, sink_route, row, col)
        };
        for (dir, _) in fractions.iter() {
            if let Some((nr, nc)) = dem.neighbor(row, col, dir) {
                if dem.is_valid(nr, nc) {
                    pending[(nr, nc)] += 1;
                }
            }
        }
        receivers.push(fractions);
    }

    let mut ready = CandidateQueue::new(QueueOrder::HighestFirst);
    for ((row, col), &z) in dem.indexed_iter() {
        if !dem.is_nodata(z) && pending[(row, col)] == 0 {
            ready.push(row, col, (), z);
        }
    }

    let mut order = Vec::with_capacity(rows * cols);
    let mut scheduled = Array2::from_elem((rows, cols), false);
    while let Some(cell) = ready.pop() {
        let (row, col) = (cell.row, cell.col);
        order.push((row, col));
        scheduled[(row, col)] = true;

        for (dir, _) in receivers[row * cols + col].iter() {
            let Some((nr, nc)) = dem.neighbor(row, col, dir) else {
                continue;
            };
            if !dem.is_valid(nr, nc) {
                continue;
            }
            pending[(nr, nc)] -= 1;
            if pending[(nr, nc)] == 0 {
                ready.push(nr, nc, (), dem[(nr, nc)]);
            }
        }
    }

    let ordered = order.len();
    order.extend(
        elevation_schedule(dem)
            .into_iter()
            .filter(|&cell| !scheduled[cell]),
    );
    if order.len() > ordered {
        warn!(cells = order.len() - ordered, "routing cycle; cells visited by elevation");
    }
    order
}

/// Flow accumulation state machine: initialize → traverse → finalize.
pub struct FlowEngine<'a, R> {
    inputs: FlowInputs<'a>,
    routing: R,
    params: FlowParams,
    weight: AuxGrid<'a>,
    material: AuxGrid<'a>,
    mean_input: AuxGrid<'a>,
    outputs: FlowOutputs,
    state: EngineState,
}

impl<'a, R: FlowRouting> FlowEngine<'a, R> {
    /// Validate inputs and parameters and allocate the requested outputs.
    pub fn new(inputs: FlowInputs<'a>, routing: R, params: FlowParams) -> Result<Self> {
        inputs.validate()?;
        routing.validate()?;
        if params.step == 0 {
            return Err(Error::InvalidParameter {
                name: "step",
                value: params.step.to_string(),
                reason: "must be >= 1".into(),
            });
        }

        let mut engine = Self {
            inputs,
            routing,
            params,
            weight: AuxGrid::new(inputs.weight, 1.0),
            material: AuxGrid::new(inputs.material, 1.0),
            mean_input: AuxGrid::new(inputs.mean_input, 0.0),
            outputs: FlowOutputs {
                accumulation: output_raster(inputs.dem),
                flow_path: None,
                catchment_mean: None,
                material: None,
            },
            state: EngineState::Created,
        };
        engine.outputs = engine.fresh_outputs();
        Ok(engine)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn params(&self) -> &FlowParams {
        &self.params
    }

    pub fn routing(&self) -> &R {
        &self.routing
    }

    /// Current output grids; partial sums unless the state is `Finalized`.
    pub fn outputs(&self) -> &FlowOutputs {
        &self.outputs
    }

    pub fn into_outputs(self) -> FlowOutputs {
        self.outputs
    }

    fn fresh_outputs(&self) -> FlowOutputs {
        let dem = self.inputs.dem;
        let with_material =
            self.params.material || self.material.is_present() || self.inputs.target.is_some();

        FlowOutputs {
            accumulation: output_raster(dem),
            flow_path: self.params.flow_path.then(|| output_raster(dem)),
            catchment_mean: self.mean_input.is_present().then(|| output_raster(dem)),
            material: with_material.then(|| MaterialAccumulation {
                total: output_raster(dem),
                left: output_raster(dem),
                right: output_raster(dem),
            }),
        }
    }

    fn source_weight(&self, row: usize, col: usize) -> f64 {
        if is_source(self.params.step, row, col) {
            self.weight.value(row, col)
        } else {
            0.0
        }
    }

    /// Reset all outputs and seed every valid cell with its own contribution.
    pub fn initialize(&mut self) {
        self.outputs = self.fresh_outputs();

        let dem = self.inputs.dem;
        for ((row, col), &z) in dem.indexed_iter() {
            if !dem.is_nodata(z) {
                self.init_cell(row, col);
            }
        }

        self.state = EngineState::Initialized;
    }

    fn init_cell(&mut self, row: usize, col: usize) {
        let weight = self.source_weight(row, col);
        let local_material = weight * self.material.value(row, col);
        let out = &mut self.outputs;

        out.accumulation[(row, col)] += weight;

        let value = self.mean_input.defined(row, col);
        if let (Some(mean), Some(value)) = (out.catchment_mean.as_mut(), value) {
            mean[(row, col)] += weight * value;
        }

        if let Some(material) = out.material.as_mut() {
            material.total[(row, col)] = local_material;
            material.left[(row, col)] = local_material;
            material.right[(row, col)] = local_material;
        }
    }

    /// Full run: initialize, traverse every cell, finalize.
    ///
    /// `progress(done, total)` is called after each row-sized batch of
    /// cells; returning `false` aborts with [`Error::Cancelled`] and leaves
    /// the engine in its partially traversed `Initialized` state.
    pub fn run<F>(&mut self, mut progress: F) -> Result<()>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let (rows, cols) = self.inputs.dem.shape();
        debug!(
            rows,
            cols,
            routing = self.routing.name(),
            step = self.params.step,
            flow_path = self.params.flow_path,
            catchment_mean = self.mean_input.is_present(),
            target = self.inputs.target.is_some(),
            "flow accumulation started"
        );

        self.initialize();
        self.traverse(&mut progress)?;
        self.finalize();
        Ok(())
    }

    fn traverse<F>(&mut self, progress: &mut F) -> Result<()>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let dem = self.inputs.dem;
        let sink_route = self.inputs.sink_route;
        let schedule = match sink_route {
            Some(_) => routing_schedule(dem, sink_route, &self.routing),
            None => elevation_schedule(dem),
        };
        let total = schedule.len();
        let batch = dem.cols().max(1);

        for (n, &(row, col)) in schedule.iter().enumerate() {
            let fractions = self.routing.route(dem, sink_route, row, col);
            for (direction, fraction) in fractions.iter() {
                self.add_fraction(row, col, direction, fraction);
            }

            let done = n + 1;
            if done % batch == 0 || done == total {
                trace!(done, total, "traversal progress");
                if !progress(done, total) {
                    warn!(done, total, "flow accumulation cancelled");
                    return Err(Error::Cancelled { done, total });
                }
            }
        }

        self.state = EngineState::Traversed;
        Ok(())
    }

    /// Pass `fraction` of the current sums of (row, col) to its neighbour
    /// in `direction`.
    ///
    /// Accumulation and the mean numerator move proportionally; flow path
    /// moves as `fraction × (path + step length)`. Material follows the
    /// stream-side rules when a target network is present: flow between two
    /// off-network cells moves proportionally, flow entering the network
    /// passes its total and routes left/right by [`find_sides`], and flow
    /// leaving or inside the network carries no material.
    ///
    /// Does nothing when either cell is outside the grid, the direction is
    /// undefined or the fraction is not positive.
    pub fn add_fraction(
        &mut self,
        row: usize,
        col: usize,
        direction: impl Into<Option<Direction>>,
        fraction: f64,
    ) {
        let Some(direction) = direction.into() else {
            return;
        };
        let step_length = direction.length(self.inputs.dem.cell_size());
        self.pass(row, col, direction, fraction, step_length);
    }

    /// Pass the whole current sums of (row, col) to its neighbour in
    /// `direction`. Same rules as [`FlowEngine::add_fraction`] with a
    /// fraction of 1, except that the flow path is carried over without
    /// adding the step length.
    pub fn add_portion(&mut self, row: usize, col: usize, direction: impl Into<Option<Direction>>) {
        if let Some(direction) = direction.into() {
            self.pass(row, col, direction, 1.0, 0.0);
        }
    }

    fn pass(
        &mut self,
        row: usize,
        col: usize,
        direction: Direction,
        fraction: f64,
        step_length: f64,
    ) {
        let dem = self.inputs.dem;
        if row >= dem.rows() || col >= dem.cols() || fraction <= 0.0 {
            return;
        }
        let Some(to) = dem.neighbor(row, col, direction) else {
            return;
        };
        let from = (row, col);

        let transfer = self.material_transfer(from, to, direction);
        let out = &mut self.outputs;

        let upstream = out.accumulation[from];
        out.accumulation[to] += fraction * upstream;

        if let Some(path) = out.flow_path.as_mut() {
            let length = path[from] + step_length;
            path[to] += fraction * length;
        }

        if let Some(mean) = out.catchment_mean.as_mut() {
            let numerator = mean[from];
            mean[to] += fraction * numerator;
        }

        if let (Some(material), Some(transfer)) = (out.material.as_mut(), transfer) {
            material.transfer(from, to, fraction, transfer);
        }
    }

    fn material_transfer(
        &self,
        from: (usize, usize),
        to: (usize, usize),
        direction: Direction,
    ) -> Option<Transfer> {
        self.outputs.material.as_ref()?;

        let Some(target) = self.inputs.target else {
            return Some(Transfer::Proportional);
        };

        match (target.is_valid(from.0, from.1), target.is_valid(to.0, to.1)) {
            (false, false) => Some(Transfer::Proportional),
            (false, true) => Some(Transfer::Sided(find_sides(target, from.0, from.1, direction))),
            _ => None,
        }
    }

    /// Normalize the accumulated sums and mirror the DEM no-data mask.
    ///
    /// Per cell: area conversion of the accumulation, path length and mean
    /// divided by the accumulated weight (0 where that weight is 0), and on
    /// network cells half the local material removed from each bank so the
    /// cell's own contribution is not counted twice. Off-network cells get
    /// no-data left/right values. Calling it twice has no further effect.
    pub fn finalize(&mut self) {
        if self.state == EngineState::Finalized {
            return;
        }

        let dem = self.inputs.dem;
        let (rows, cols) = dem.shape();
        let context = FinalizeContext {
            dem,
            target: self.inputs.target,
            outputs: &self.outputs,
            weight: self.weight,
            material: self.material,
            step: self.params.step,
            cell_area: match self.params.unit {
                AccumulationUnit::Cells => None,
                AccumulationUnit::CellArea => Some(dem.cell_area()),
            },
        };

        let cells: Vec<FinalCell> = (0..rows * cols)
            .into_par_iter()
            .map(|index| context.cell(index / cols, index % cols))
            .collect();

        let out = &mut self.outputs;
        for (index, cell) in cells.into_iter().enumerate() {
            let rc = (index / cols, index % cols);
            out.accumulation[rc] = cell.accumulation;
            if let Some(path) = out.flow_path.as_mut() {
                path[rc] = cell.flow_path;
            }
            if let Some(mean) = out.catchment_mean.as_mut() {
                mean[rc] = cell.mean;
            }
            if let Some(material) = out.material.as_mut() {
                material.total[rc] = cell.total;
                material.left[rc] = cell.left;
                material.right[rc] = cell.right;
            }
        }

        self.state = EngineState::Finalized;
    }

    /// Point mode: share of each cell's outflow reaching (row, col), in
    /// percent. The queried cell holds 100, cells outside its catchment 0.
    ///
    /// Only the accumulation output is produced. Contributing cells are
    /// discovered upslope from the outlet through a lowest-first
    /// [`CandidateQueue`], so a cell is evaluated after all lower cells it
    /// drains into.
    pub fn run_point<F>(&mut self, row: usize, col: usize, mut progress: F) -> Result<()>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let dem = self.inputs.dem;
        let (rows, cols) = dem.shape();
        if row >= rows || col >= cols {
            return Err(Error::IndexOutOfBounds { row, col, rows, cols });
        }
        if !dem.is_valid(row, col) {
            return Err(Error::InvalidParameter {
                name: "outlet",
                value: format!("({row}, {col})"),
                reason: "cell is no-data in the DEM".into(),
            });
        }

        debug!(row, col, routing = self.routing.name(), "upslope area started");

        self.outputs = FlowOutputs {
            accumulation: output_raster(dem),
            flow_path: None,
            catchment_mean: None,
            material: None,
        };
        self.state = EngineState::Initialized;

        let mut queued = Array2::from_elem((rows, cols), false);
        let mut queue: CandidateQueue<FlowFractions> = CandidateQueue::new(QueueOrder::LowestFirst);

        self.outputs.accumulation[(row, col)] = 1.0;
        queued[(row, col)] = true;
        self.enqueue_contributors(row, col, &mut queued, &mut queue);

        let total = dem.valid_count();
        let batch = cols.max(1);
        let mut done = 0;

        while let Some(candidate) = queue.pop() {
            let (r, c) = (candidate.row, candidate.col);
            let accumulation = &self.outputs.accumulation;
            let share: f64 = candidate
                .payload
                .iter()
                .filter_map(|(dir, fraction)| {
                    dem.neighbor(r, c, dir).map(|to| fraction * accumulation[to])
                })
                .sum();
            self.outputs.accumulation[(r, c)] = share;
            self.enqueue_contributors(r, c, &mut queued, &mut queue);

            done += 1;
            if done % batch == 0 && !progress(done, total) {
                warn!(done, total, "upslope area cancelled");
                return Err(Error::Cancelled { done, total });
            }
        }
        self.state = EngineState::Traversed;

        let accumulation = &self.outputs.accumulation;
        let percent: Vec<f64> = (0..rows * cols)
            .into_par_iter()
            .map(|index| {
                let rc = (index / cols, index % cols);
                if dem.is_valid(rc.0, rc.1) {
                    100.0 * accumulation[rc]
                } else {
                    f64::NAN
                }
            })
            .collect();
        *self.outputs.accumulation.data_mut() = Array2::from_shape_vec((rows, cols), percent)
            .map_err(|e| Error::Other(e.to_string()))?;

        self.state = EngineState::Finalized;
        Ok(())
    }

    /// Queue every not yet queued neighbour of (row, col) that sends part of
    /// its outflow into (row, col).
    fn enqueue_contributors(
        &self,
        row: usize,
        col: usize,
        queued: &mut Array2<bool>,
        queue: &mut CandidateQueue<FlowFractions>,
    ) {
        let dem = self.inputs.dem;
        for dir in Direction::ALL {
            let Some((nr, nc)) = dem.neighbor(row, col, dir) else {
                continue;
            };
            if queued[(nr, nc)] || !dem.is_valid(nr, nc) {
                continue;
            }
            let fractions = self.routing.route(dem, self.inputs.sink_route, nr, nc);
            if fractions.get(dir.opposite()) > 0.0 {
                queued[(nr, nc)] = true;
                queue.push(nr, nc, fractions, dem[(nr, nc)]);
            }
        }
    }
}

/// Finalized values of one cell
#[derive(Debug, Clone, Copy)]
struct FinalCell {
    accumulation: f64,
    flow_path: f64,
    mean: f64,
    total: f64,
    left: f64,
    right: f64,
}

impl FinalCell {
    const NODATA: FinalCell = FinalCell {
        accumulation: f64::NAN,
        flow_path: f64::NAN,
        mean: f64::NAN,
        total: f64::NAN,
        left: f64::NAN,
        right: f64::NAN,
    };
}

/// Read-only view shared by the finalize workers
struct FinalizeContext<'e> {
    dem: &'e Raster<f64>,
    target: Option<&'e Raster<i32>>,
    outputs: &'e FlowOutputs,
    weight: AuxGrid<'e>,
    material: AuxGrid<'e>,
    step: usize,
    cell_area: Option<f64>,
}

impl FinalizeContext<'_> {
    fn cell(&self, row: usize, col: usize) -> FinalCell {
        if !self.dem.is_valid(row, col) {
            return FinalCell::NODATA;
        }

        let rc = (row, col);
        let out = self.outputs;
        let weight = out.accumulation[rc];

        let normalize = |grid: &Option<Raster<f64>>| match grid {
            Some(grid) if weight > 0.0 => grid[rc] / weight,
            _ => 0.0,
        };

        let (total, left, right) = match &out.material {
            None => (0.0, 0.0, 0.0),
            Some(material) => {
                let total = material.total[rc];
                match self.target {
                    None => (total, material.left[rc], material.right[rc]),
                    Some(target) if !target.is_valid(row, col) => (total, f64::NAN, f64::NAN),
                    Some(_) => {
                        let local = if is_source(self.step, row, col) {
                            self.weight.value(row, col) * self.material.value(row, col)
                        } else {
                            0.0
                        };
                        (total, material.left[rc] - 0.5 * local, material.right[rc] - 0.5 * local)
                    }
                }
            }
        };

        FinalCell {
            accumulation: self.cell_area.map_or(weight, |area| weight * area),
            flow_path: normalize(&out.flow_path),
            mean: normalize(&out.catchment_mean),
            total,
            left,
            right,
        }
    }
}

/// Run a full flow accumulation.
///
/// # Arguments
/// * `inputs` - DEM and optional auxiliary grids
/// * `routing` - direction-selection strategy ([`D8`](super::D8), [`Mfd`](super::Mfd),
///   [`RoutingMethod`])
/// * `params` - step, output unit and optional outputs
///
/// # Returns
/// Finalized [`FlowOutputs`]
pub fn flow_accumulation<R: FlowRouting>(
    inputs: FlowInputs<'_>,
    routing: R,
    params: FlowParams,
) -> Result<FlowOutputs> {
    let mut engine = FlowEngine::new(inputs, routing, params)?;
    engine.run(|_, _| true)?;
    Ok(engine.into_outputs())
}

/// Upslope area of a single outlet cell, as percent of each cell's outflow
/// reaching it.
pub fn upslope_area<R: FlowRouting>(
    inputs: FlowInputs<'_>,
    routing: R,
    row: usize,
    col: usize,
) -> Result<Raster<f64>> {
    let mut engine = FlowEngine::new(inputs, routing, FlowParams::default())?;
    engine.run_point(row, col, |_, _| true)?;
    Ok(engine.into_outputs().accumulation)
}

/// Flow accumulation over a DEM alone
#[derive(Debug, Clone, Default)]
pub struct FlowAccumulation {
    pub routing: RoutingMethod,
}

impl Algorithm for FlowAccumulation {
    type Input = Raster<f64>;
    type Output = FlowOutputs;
    type Params = FlowParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Flow Accumulation"
    }

    fn description(&self) -> &'static str {
        "Accumulate upstream weight, flow path length and material over a DEM"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        flow_accumulation(FlowInputs::new(&input), self.routing, params)
    }
}
