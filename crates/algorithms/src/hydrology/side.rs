//! Stream-side classification
//!
//! Decides whether a flow line entering a stream cell arrives from the left
//! or the right bank of the receiving stream, looking downstream. The flow
//! line direction is compared with the stream's own direction and with the
//! directions of the upstream tributaries feeding the stream cell, using
//! only the z-component of 2D cross products.
//!
//! Reference:
//! Grabs, T., Seibert, J., Laudon, H. (2010). Calculating terrain indices
//! along streams: A new method for separating stream sides. *Water
//! Resources Research*, 46, W12536.

use hydroside_core::raster::{Direction, Raster};

/// |cos θ + 1| below this means the flow line runs against the stream.
const ANTIPARALLEL_TOLERANCE: f64 = 1e-5;

/// Side of a flow line relative to the receiving stream.
///
/// Both flags set means the side is undetermined: a channel head, a flow
/// line running against the stream, or one lying between the tributaries
/// of a junction. Both flags clear never occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides {
    pub left: bool,
    pub right: bool,
}

impl Sides {
    pub const UNDETERMINED: Sides = Sides { left: true, right: true };
    pub const LEFT: Sides = Sides { left: true, right: false };
    pub const RIGHT: Sides = Sides { left: false, right: true };

    fn from_right(right: bool) -> Self {
        Sides { left: !right, right }
    }

    pub fn is_determined(&self) -> bool {
        self.left != self.right
    }
}

impl Default for Sides {
    fn default() -> Self {
        Sides::UNDETERMINED
    }
}

/// Stream direction of a network cell, `None` when the cell is outside the
/// network or carries no valid direction code.
pub fn stream_direction(target: &Raster<i32>, row: usize, col: usize) -> Option<Direction> {
    let code = target.get(row, col).ok()?;
    if target.is_nodata(code) {
        return None;
    }
    Direction::from_code(code)
}

fn cross_z(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn norm(a: (f64, f64)) -> f64 {
    dot(a, a).sqrt()
}

/// Classify the flow line leaving (row, col) in `direction` against the
/// stream cell it points into.
///
/// The stream cell's upstream tributaries are scanned in direction order
/// (N first, clockwise). From the second tributary on, the first change of
/// side marks a junction with the flow line between tributaries; the scan
/// stops there and the result is undetermined.
pub fn find_sides(target: &Raster<i32>, row: usize, col: usize, direction: Direction) -> Sides {
    let Some((sr, sc)) = target.neighbor(row, col, direction) else {
        return Sides::UNDETERMINED;
    };
    let Some(stream_dir) = stream_direction(target, sr, sc) else {
        return Sides::UNDETERMINED;
    };

    let flow_vec = direction.vector();
    let stream_vec = stream_dir.vector();

    let cos = dot(flow_vec, stream_vec) / norm(flow_vec) / norm(stream_vec);
    if (cos + 1.0).abs() < ANTIPARALLEL_TOLERANCE {
        return Sides::UNDETERMINED;
    }

    let zcp_a = cross_z(flow_vec, stream_vec);

    let mut sides = Sides::UNDETERMINED;
    let mut tributaries = 0;

    for dir in Direction::ALL {
        let Some((tr, tc)) = target.neighbor(sr, sc, dir) else {
            continue;
        };
        let Some(trib_dir) = stream_direction(target, tr, tc) else {
            continue;
        };
        if target.neighbor(tr, tc, trib_dir) != Some((sr, sc)) {
            continue;
        }

        tributaries += 1;
        let trib_vec = trib_dir.vector();
        let zcp_b = cross_z(flow_vec, trib_vec);
        let previous = sides;

        // Same sign (or a flow line parallel to the stream): the tributary
        // decides. Opposite signs or zcp_b == 0: sharp bend, the angle
        // between stream and tributary decides.
        let right = if zcp_a * zcp_b >= 0.0 && zcp_b != 0.0 {
            zcp_b < 0.0
        } else {
            cross_z(stream_vec, trib_vec) < 0.0
        };
        sides = Sides::from_right(right);

        if tributaries > 1 && sides.right != previous.right {
            return Sides::UNDETERMINED;
        }
    }

    sides
}
