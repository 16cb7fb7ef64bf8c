//! # hydroside algorithms
//!
//! Flow routing and accumulation over gridded elevation models.
//!
//! ## Modules
//!
//! - **hydrology**: D8/MFD routing, flow accumulation with flow path, catchment
//!   mean and stream-side material split, upslope area, flow direction and
//!   stream networks

pub mod hydrology;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::hydrology::{
        find_sides, flow_accumulation, flow_direction, stream_network, upslope_area,
        AccumulationUnit, FlowAccumulation, FlowDirection, FlowEngine, FlowInputs, FlowOutputs,
        FlowParams, FlowRouting, Mfd, MfdParams, RoutingMethod, Sides, StreamNetworkParams, D8,
    };
    pub use hydroside_core::prelude::*;
}
