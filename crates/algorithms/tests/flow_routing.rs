//! End-to-end flow routing on synthetic terrain.
//!
//! Exercises the public API the way a caller chains it: accumulation,
//! direction grid, stream network, then stream-side material split.

use approx::assert_relative_eq;
use hydroside_algorithms::hydrology::{
    flow_accumulation, stream_network, upslope_area, AccumulationUnit, FlowInputs, FlowParams,
    FlowRouting, Mfd, RoutingMethod, StreamNetworkParams, D8,
};
use hydroside_core::{GeoTransform, Raster};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn cells() -> FlowParams {
    FlowParams {
        unit: AccumulationUnit::Cells,
        ..Default::default()
    }
}

/// Bowl draining toward the centre, with small noise to avoid flats
fn basin(size: usize) -> Raster<f64> {
    let mut dem = Raster::new(size, size);
    dem.set_transform(GeoTransform::new(0.0, size as f64, 1.0, -1.0));
    let center = size as f64 / 2.0;
    for row in 0..size {
        for col in 0..size {
            let dx = col as f64 - center;
            let dy = row as f64 - center;
            let noise = ((row * 7 + col * 13) % 17) as f64 * 0.01;
            dem.set(row, col, (dx * dx + dy * dy).sqrt() + noise).unwrap();
        }
    }
    dem
}

/// Symmetric V-shaped valley draining south along the middle column
fn valley(rows: usize, cols: usize) -> Raster<f64> {
    let mut dem = Raster::new(rows, cols);
    let mid = cols / 2;
    for row in 0..rows {
        for col in 0..cols {
            let across = (col as f64 - mid as f64).abs() * 2.0;
            dem.set(row, col, across + (rows - row) as f64).unwrap();
        }
    }
    dem
}

fn weights(rows: usize, cols: usize) -> Raster<f64> {
    let mut grid = Raster::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            grid.set(row, col, 0.5 + ((row + 2 * col) % 3) as f64).unwrap();
        }
    }
    grid
}

// ---------------------------------------------------------------------------
// Conservation
// ---------------------------------------------------------------------------

#[test]
fn weight_is_conserved_into_pits() {
    init_logging();
    let dem = basin(24);
    let weight = weights(24, 24);
    let expected: f64 = weight.iter().sum();

    for routing in [RoutingMethod::D8, RoutingMethod::Mfd(Default::default())] {
        let inputs = FlowInputs::new(&dem).with_weight(&weight).with_material(&weight);
        let params = FlowParams { material: true, ..cells() };
        let out = flow_accumulation(inputs, routing, params).unwrap();
        let material = out.material.unwrap();

        let mut trapped = 0.0;
        let mut trapped_material = 0.0;
        for ((row, col), &acc) in out.accumulation.indexed_iter() {
            if routing.fractions(&dem, row, col).is_empty() {
                trapped += acc;
                trapped_material += material.total.get(row, col).unwrap();
            }
        }

        assert_relative_eq!(trapped, expected, max_relative = 1e-9);
        // Material equals weight here, so pits hold Σ weight²
        let expected_material: f64 = weight.iter().map(|w| w * w).sum();
        assert_relative_eq!(trapped_material, expected_material, max_relative = 1e-9);
    }
}

#[test]
fn nodata_cells_stay_nodata() {
    let mut dem = basin(16);
    for col in 3..7 {
        dem.set(2, col, f64::NAN).unwrap();
    }
    let params = FlowParams { flow_path: true, ..cells() };
    let out = flow_accumulation(FlowInputs::new(&dem), Mfd::default(), params).unwrap();
    let path = out.flow_path.unwrap();

    for ((row, col), &z) in dem.indexed_iter() {
        let acc = out.accumulation.get(row, col).unwrap();
        if z.is_nan() {
            assert!(acc.is_nan() && path.get(row, col).unwrap().is_nan());
        } else {
            assert!(acc >= 1.0, "({row}, {col}) accumulation {acc}");
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow: accumulation → stream network → stream sides
// ---------------------------------------------------------------------------

#[test]
fn valley_banks_receive_equal_material() {
    init_logging();
    let (rows, cols) = (12, 9);
    let mid = cols / 2;
    let dem = valley(rows, cols);

    let facc = flow_accumulation(FlowInputs::new(&dem), D8, cells()).unwrap().accumulation;
    let target = stream_network(&dem, &facc, StreamNetworkParams { threshold: 10.0 }).unwrap();

    // The valley floor becomes the network from row 3 down; flanks stay off it
    assert!(target.is_nodata(target.get(2, mid).unwrap()));
    for row in 3..rows - 1 {
        assert!(!target.is_nodata(target.get(row, mid).unwrap()), "row {row}");
        assert!(target.is_nodata(target.get(row, mid - 1).unwrap()));
    }

    let inputs = FlowInputs::new(&dem).with_target(&target);
    let out = flow_accumulation(inputs, D8, cells()).unwrap();
    let material = out.material.unwrap();

    for row in 3..rows {
        let left = material.left.get(row, mid).unwrap();
        let right = material.right.get(row, mid).unwrap();
        assert!(left > 0.0 && right > 0.0);
        assert_relative_eq!(left, right, max_relative = 1e-9);
    }
    for col in 0..mid - 1 {
        assert!(material.left.get(5, col).unwrap().is_nan());
        assert!(material.right.get(5, col).unwrap().is_nan());
    }
    // Everything entering the channel head arrives from off the network
    assert_relative_eq!(
        material.total.get(3, mid).unwrap(),
        out.accumulation.get(3, mid).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Point mode
// ---------------------------------------------------------------------------

#[test]
fn upslope_area_matches_d8_catchment() {
    let dem = valley(12, 9);
    let outlet = (8, 4);

    let area = upslope_area(FlowInputs::new(&dem), D8, outlet.0, outlet.1).unwrap();
    let facc = flow_accumulation(FlowInputs::new(&dem), D8, cells()).unwrap().accumulation;

    let full = area.iter().filter(|&&v| v == 100.0).count();
    assert!(area.iter().all(|&v| v == 0.0 || v == 100.0));
    assert_eq!(full as f64, facc.get(outlet.0, outlet.1).unwrap());
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn routing_and_params_from_json() {
    let routing: RoutingMethod =
        serde_json::from_str(r#"{"method": "mfd", "exponent": 4.0}"#).unwrap();
    let params: FlowParams =
        serde_json::from_str(r#"{"unit": "cells", "flow_path": true}"#).unwrap();
    assert_eq!(params.step, 1);
    assert!(params.flow_path);

    let dem = basin(12);
    let out = flow_accumulation(FlowInputs::new(&dem), routing, params).unwrap();
    assert!(out.flow_path.is_some());
    assert!(out.catchment_mean.is_none());

    let bad: RoutingMethod =
        serde_json::from_str(r#"{"method": "mfd", "exponent": -1.0}"#).unwrap();
    assert!(flow_accumulation(FlowInputs::new(&dem), bad, FlowParams::default()).is_err());
}
