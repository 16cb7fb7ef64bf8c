//! Eight-neighbour direction codes and their geometry
//!
//! Direction encoding (row 0 is the northern edge):
//! ```text
//!   7  0  1
//!   6  .  2
//!   5  4  3
//! ```
//! Code `-1` in direction rasters means "no defined direction" (pit, flat
//! or outlet); in Rust it is `Option::<Direction>::None`.

use std::f64::consts::SQRT_2;
use std::fmt;

/// Raster encoding of "no defined direction"
pub const NO_DIRECTION: i32 = -1;

/// (row_offset, col_offset) per direction code
const OFFSETS: [(isize, isize); 8] = [
    (-1, 0),  // 0: N
    (-1, 1),  // 1: NE
    (0, 1),   // 2: E
    (1, 1),   // 3: SE
    (1, 0),   // 4: S
    (1, -1),  // 5: SW
    (0, -1),  // 6: W
    (-1, -1), // 7: NW
];

const NAMES: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// One of the eight queen's-move neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    pub const N: Direction = Direction(0);
    pub const NE: Direction = Direction(1);
    pub const E: Direction = Direction(2);
    pub const SE: Direction = Direction(3);
    pub const S: Direction = Direction(4);
    pub const SW: Direction = Direction(5);
    pub const W: Direction = Direction(6);
    pub const NW: Direction = Direction(7);

    /// All directions in priority order (N first, clockwise)
    pub const ALL: [Direction; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Direction from a raster code; anything outside 0–7 is `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        (0..8).contains(&code).then(|| Direction(code as u8))
    }

    /// Raster code of an optional direction (`None` encodes as [`NO_DIRECTION`])
    pub fn encode(direction: Option<Self>) -> i32 {
        direction.map_or(NO_DIRECTION, |d| d.code())
    }

    pub fn code(self) -> i32 {
        self.0 as i32
    }

    /// Position in `[_; 8]` tables
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// (row_offset, col_offset)
    pub fn offset(self) -> (isize, isize) {
        OFFSETS[self.index()]
    }

    /// Unit-offset vector with x pointing east and y pointing north.
    ///
    /// Diagonals are `(±1, ±1)`, not normalized.
    pub fn vector(self) -> (f64, f64) {
        let (dr, dc) = self.offset();
        (dc as f64, -dr as f64)
    }

    pub fn is_diagonal(self) -> bool {
        self.0 % 2 == 1
    }

    /// 1 for orthogonal moves, √2 for diagonal ones
    pub fn distance_factor(self) -> f64 {
        if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }

    /// Distance travelled by one step in this direction
    pub fn length(self, cell_size: f64) -> f64 {
        self.distance_factor() * cell_size
    }

    pub fn opposite(self) -> Direction {
        Direction((self.0 + 4) % 8)
    }

    /// Neighbour coordinates inside a `rows` × `cols` grid
    pub fn neighbor(
        self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = self.offset();
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        if nr < 0 || nc < 0 || nr as usize >= rows || nc as usize >= cols {
            return None;
        }
        Some((nr as usize, nc as usize))
    }

    /// Direction leading from `from` to the adjacent cell `to`
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Self> {
        let dr = to.0 as isize - from.0 as isize;
        let dc = to.1 as isize - from.1 as isize;
        Self::ALL.into_iter().find(|d| d.offset() == (dr, dc))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NAMES[self.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_codes() {
        assert_eq!(Direction::from_code(0), Some(Direction::N));
        assert_eq!(Direction::from_code(7), Some(Direction::NW));
        assert_eq!(Direction::from_code(NO_DIRECTION), None);
        assert_eq!(Direction::from_code(8), None);
        assert_eq!(Direction::encode(None), -1);
        assert_eq!(Direction::encode(Some(Direction::SW)), 5);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::N.opposite(), Direction::S);
        assert_eq!(Direction::E.opposite(), Direction::W);
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::NW.opposite(), Direction::SE);
    }

    #[test]
    fn test_vectors_point_east_north() {
        let table = [
            (Direction::N, (0.0, 1.0)),
            (Direction::NE, (1.0, 1.0)),
            (Direction::E, (1.0, 0.0)),
            (Direction::SE, (1.0, -1.0)),
            (Direction::S, (0.0, -1.0)),
            (Direction::SW, (-1.0, -1.0)),
            (Direction::W, (-1.0, 0.0)),
            (Direction::NW, (-1.0, 1.0)),
        ];
        for (dir, expected) in table {
            assert_eq!(dir.vector(), expected, "vector of {dir}");
        }
    }

    #[test]
    fn test_lengths() {
        assert_relative_eq!(Direction::N.length(10.0), 10.0);
        assert_relative_eq!(Direction::SE.length(10.0), 10.0 * SQRT_2);
        assert_eq!(Direction::ALL.iter().filter(|d| d.is_diagonal()).count(), 4);
    }

    #[test]
    fn test_neighbor_and_between() {
        assert_eq!(Direction::S.neighbor(1, 1, 3, 3), Some((2, 1)));
        assert_eq!(Direction::S.neighbor(2, 1, 3, 3), None);
        assert_eq!(Direction::NW.neighbor(0, 1, 3, 3), None);
        assert_eq!(Direction::between((1, 1), (0, 2)), Some(Direction::NE));
        assert_eq!(Direction::between((1, 1), (1, 1)), None);
        assert_eq!(Direction::between((0, 0), (2, 2)), None);
    }
}
