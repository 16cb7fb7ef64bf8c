//! Hydrological flow routing
//!
//! Algorithms for accumulating flow over Digital Elevation Models:
//! - Routing: D8 and multiple-flow-direction (MFD) outflow shares, with
//!   sink-route overrides for pits and flats
//! - Flow engine: flow accumulation, flow path length, catchment mean and
//!   accumulated material, plus single-outlet upslope area
//! - Stream sides: left/right bank classification of flow entering a
//!   stream network
//! - Flow direction and stream network: D8 direction grids and thresholded
//!   target networks

mod candidate_queue;
mod flow_direction;
mod flow_engine;
mod inputs;
mod routing;
mod side;
mod stream_network;

pub use candidate_queue::{Candidate, CandidateQueue, QueueOrder};
pub use flow_direction::{flow_direction, FlowDirection, DIRECTION_NODATA};
pub use flow_engine::{
    elevation_schedule, flow_accumulation, routing_schedule, upslope_area, AccumulationUnit,
    EngineState, FlowAccumulation, FlowEngine, FlowOutputs, FlowParams, MaterialAccumulation,
};
pub use inputs::FlowInputs;
pub use routing::{sink_direction, FlowFractions, FlowRouting, Mfd, MfdParams, RoutingMethod, D8};
pub use side::{find_sides, stream_direction, Sides};
pub use stream_network::{stream_network, StreamNetworkParams};
