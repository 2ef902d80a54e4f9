//! Hex grid geometry
//!
//! The map is addressed with "odd-r" offset coordinates: odd rows are shoved
//! half a cell to the right, so the neighbor deltas depend on row parity.
//! Distances go through cube coordinates.

use serde::{Deserialize, Serialize};

use crate::consts::{MAP_HEIGHT, MAP_WIDTH};

/// Neighbor deltas for even rows, indexed by orientation
const DIRECTIONS_EVEN: [(i32, i32); 6] = [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];
/// Neighbor deltas for odd rows, indexed by orientation
const DIRECTIONS_ODD: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)];

/// Cube-space neighbor deltas, indexed by orientation
const CUBE_DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// Offset hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center cell of the map
    pub const fn map_center() -> Self {
        Self::new(MAP_WIDTH / 2, MAP_HEIGHT / 2)
    }

    /// Adjacent cell in direction `orientation` (0..6)
    pub fn neighbor(self, orientation: u8) -> Coord {
        let (dx, dy) = if self.y % 2 == 1 {
            DIRECTIONS_ODD[orientation as usize % 6]
        } else {
            DIRECTIONS_EVEN[orientation as usize % 6]
        };
        Coord::new(self.x + dx, self.y + dy)
    }

    pub fn to_cube(self) -> CubeCoord {
        let x = self.x - (self.y - (self.y & 1)) / 2;
        let z = self.y;
        CubeCoord::new(x, -(x + z), z)
    }

    /// Hex distance in cells
    pub fn distance_to(self, other: Coord) -> i32 {
        self.to_cube().distance_to(other.to_cube())
    }

    /// Bearing toward `target` in sixths of a turn, in `[0, 6)`.
    ///
    /// 0 points along orientation 0 (east) and values grow counter-clockwise,
    /// so an integer bearing lines up with the orientation of the same value.
    pub fn angle(self, target: Coord) -> f64 {
        let dy = (target.y - self.y) as f64 * 3f64.sqrt() / 2.0;
        let dx = (target.x - self.x) as f64 + ((self.y - target.y) & 1) as f64 * 0.5;
        let mut angle = -dy.atan2(dx) * 3.0 / std::f64::consts::PI;
        if angle < 0.0 {
            angle += 6.0;
        } else if angle >= 6.0 {
            angle -= 6.0;
        }
        angle
    }

    pub fn is_inside_map(self) -> bool {
        self.x >= 0 && self.x < MAP_WIDTH && self.y >= 0 && self.y < MAP_HEIGHT
    }

    /// Reflection across the horizontal midline of the map
    pub fn mirrored(self) -> Coord {
        Coord::new(self.x, MAP_HEIGHT - 1 - self.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Cube hex coordinate (x + y + z == 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn to_offset(self) -> Coord {
        Coord::new(self.x + (self.z - (self.z & 1)) / 2, self.z)
    }

    pub fn neighbor(self, orientation: u8) -> CubeCoord {
        let (dx, dy, dz) = CUBE_DIRECTIONS[orientation as usize % 6];
        CubeCoord::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance_to(self, other: CubeCoord) -> i32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()) / 2
    }
}

/// Orientation pointing the other way
#[inline]
pub fn opposite(orientation: u8) -> u8 {
    (orientation + 3) % 6
}
