//! Stream network extraction
//!
//! Builds a target network for stream-side material splitting by
//! thresholding flow accumulation: cells with accumulation >= threshold
//! keep their D8 flow direction code, every other cell is no-data.

use hydroside_core::raster::Raster;
use hydroside_core::{Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::flow_direction::{flow_direction, DIRECTION_NODATA};

/// Parameters for stream network extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamNetworkParams {
    /// Flow accumulation threshold, in the units of the accumulation grid.
    /// Cells with accumulation >= this value are classified as streams.
    /// Default: 1000.0
    pub threshold: f64,
}

impl Default for StreamNetworkParams {
    fn default() -> Self {
        Self { threshold: 1000.0 }
    }
}

/// Extract a stream network from a DEM and its flow accumulation.
///
/// # Arguments
/// * `dem` - DEM the accumulation was computed from
/// * `accumulation` - Flow accumulation (from `flow_accumulation`)
/// * `params` - Stream network parameters (threshold)
///
/// # Returns
/// Raster<i32> with the stream direction code on stream cells (`-1` on a
/// stream pit) and [`DIRECTION_NODATA`] elsewhere
pub fn stream_network(
    dem: &Raster<f64>,
    accumulation: &Raster<f64>,
    params: StreamNetworkParams,
) -> Result<Raster<i32>> {
    dem.check_shape(accumulation, "accumulation")?;
    let threshold = params.threshold;
    if !threshold.is_finite() {
        return Err(Error::InvalidParameter {
            name: "threshold",
            value: threshold.to_string(),
            reason: "must be finite".into(),
        });
    }

    let fdir = flow_direction(dem)?;
    let (rows, cols) = dem.shape();
    let mut output_data = Array2::from_elem((rows, cols), DIRECTION_NODATA);

    for ((row, col), &acc) in accumulation.indexed_iter() {
        let code = fdir[(row, col)];
        if !accumulation.is_nodata(acc) && acc >= threshold && code != DIRECTION_NODATA {
            output_data[(row, col)] = code;
        }
    }

    let mut output = dem.with_same_meta::<i32>();
    output.set_nodata(Some(DIRECTION_NODATA));
    *output.data_mut() = output_data;

    Ok(output)
}
