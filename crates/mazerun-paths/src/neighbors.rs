use mazerun_core::{Direction, GridView, Point};

/// Cached neighbour computation helper.
///
/// Enumerates the cells reachable in one move from a grid point: the
/// direction must not be walled and the target must lie inside the grid.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the open neighbours of `p` in wall order (N, W, E, S).
    pub fn open<G: GridView + ?Sized>(&mut self, grid: &G, p: Point) -> &[Point] {
        self.buf.clear();
        for dir in Direction::ALL {
            if grid.wall_between(p, dir) {
                continue;
            }
            let n = p + dir.offset();
            if grid.contains(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
