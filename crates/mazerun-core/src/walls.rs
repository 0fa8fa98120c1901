//! Wall-based grid access.
//!
//! A maze cell carries four wall flags, one per [`Direction`]. Searches read
//! them through [`GridView`]; [`WallGrid`] stores them as one bit mask per
//! cell in row-major order.

use crate::geom::{Point, Range};

/// One of the four cardinal directions, in wall-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    West,
    East,
    South,
}

impl Direction {
    /// All directions in wall-array order (N, W, E, S).
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::East,
        Direction::South,
    ];

    /// Unit step for this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::West => Point::new(-1, 0),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
        }
    }

    /// The direction pointing back.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::West => 2,
            Direction::East => 4,
            Direction::South => 8,
        }
    }
}

/// Read-only view of a walled grid.
///
/// Coordinates run from `(0, 0)` to `(width - 1, height - 1)`.
pub trait GridView {
    /// Number of columns.
    fn width(&self) -> i32;

    /// Number of rows.
    fn height(&self) -> i32;

    /// Whether a wall blocks movement out of `p` towards `dir`.
    ///
    /// Cells outside the grid report every wall as set.
    fn wall_between(&self, p: Point, dir: Direction) -> bool;

    /// The grid rectangle.
    fn bounds(&self) -> Range {
        Range::sized(self.width(), self.height())
    }

    /// Whether `p` lies inside the grid.
    fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}

const ALL_WALLS: u8 = 0b1111;

/// In-memory wall store: one 4-bit mask per cell.
///
/// Walls are kept symmetric: setting the east wall of `(x, y)` also sets the
/// west wall of `(x + 1, y)`. The outer border is always walled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallGrid {
    width: i32,
    height: i32,
    walls: Vec<u8>,
}

impl WallGrid {
    /// A grid with no internal walls.
    pub fn open(width: i32, height: i32) -> Self {
        let mut grid = Self::closed(width, height);
        for p in grid.bounds().iter() {
            for dir in [Direction::East, Direction::South] {
                grid.carve(p, dir);
            }
        }
        grid
    }

    /// A grid with every wall set, the usual starting point for carving.
    pub fn closed(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            walls: vec![ALL_WALLS; (width * height) as usize],
        }
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Set or clear the wall between `p` and its neighbour towards `dir`.
    ///
    /// Does nothing when `p` is out of bounds. Border walls cannot be
    /// removed.
    pub fn set_wall(&mut self, p: Point, dir: Direction, walled: bool) {
        let Some(i) = self.index(p) else {
            return;
        };
        let q = p + dir.offset();
        let Some(j) = self.index(q) else {
            return;
        };
        if walled {
            self.walls[i] |= dir.bit();
            self.walls[j] |= dir.opposite().bit();
        } else {
            self.walls[i] &= !dir.bit();
            self.walls[j] &= !dir.opposite().bit();
        }
    }

    /// Remove the wall between `p` and its neighbour towards `dir`.
    pub fn carve(&mut self, p: Point, dir: Direction) {
        self.set_wall(p, dir, false);
    }

    /// Wall off `p` on all four sides.
    pub fn enclose(&mut self, p: Point) {
        for dir in Direction::ALL {
            self.set_wall(p, dir, true);
        }
    }

    /// Number of open (carved) sides of `p`.
    pub fn open_sides(&self, p: Point) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&d| !self.wall_between(p, d))
            .count()
    }
}

impl GridView for WallGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn wall_between(&self, p: Point, dir: Direction) -> bool {
        match self.index(p) {
            Some(i) => self.walls[i] & dir.bit() != 0,
            None => true,
        }
    }
}
