//! Breadth-first analysis of a maze: distance maps and the diameter.

use std::collections::VecDeque;

use mazerun_core::{GridView, Point};

use crate::neighbors::Neighbors;

/// Sentinel value meaning "unreachable" in distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Longest shortest path of a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diameter {
    /// Number of moves between the two ends.
    pub length: i32,
    pub from: Point,
    pub to: Point,
    /// Cells from `from` to `to`, both included.
    pub path: Vec<Point>,
}

struct Bfs {
    dist: Vec<i32>,
    parent: Vec<usize>,
    farthest: usize,
}

fn bfs<G: GridView + ?Sized>(grid: &G, from: Point) -> Bfs {
    let w = grid.width();
    let len = grid.bounds().len();
    let idx = |p: Point| (p.y * w + p.x) as usize;
    let mut dist = vec![UNREACHABLE; len];
    let mut parent = vec![usize::MAX; len];
    let mut farthest = 0;
    if !grid.contains(from) {
        return Bfs {
            dist,
            parent,
            farthest,
        };
    }

    let si = idx(from);
    dist[si] = 0;
    farthest = si;
    let mut queue = VecDeque::from([from]);
    let mut nb = Neighbors::new();

    while let Some(cp) = queue.pop_front() {
        let ci = idx(cp);
        let d = dist[ci] + 1;
        for &np in nb.open(grid, cp) {
            let ni = idx(np);
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = d;
            parent[ni] = ci;
            if d > dist[farthest] {
                farthest = ni;
            }
            queue.push_back(np);
        }
    }

    Bfs {
        dist,
        parent,
        farthest,
    }
}

/// Row-major move counts from `from` to every cell.
///
/// Unreached cells hold [`UNREACHABLE`]. An out-of-bounds `from` reaches
/// nothing.
pub fn bfs_distances<G: GridView + ?Sized>(grid: &G, from: Point) -> Vec<i32> {
    bfs(grid, from).dist
}

/// Diameter of the component containing `(0, 0)`, by double BFS.
///
/// Exact when the maze is a tree (a perfect maze); a lower bound otherwise.
/// Returns `None` for an empty grid.
pub fn diameter<G: GridView + ?Sized>(grid: &G) -> Option<Diameter> {
    if grid.bounds().is_empty() {
        return None;
    }
    let w = grid.width();
    let point = |i: usize| Point::new(i as i32 % w, i as i32 / w);

    let a = point(bfs(grid, Point::ZERO).farthest);
    let second = bfs(grid, a);
    let b = second.farthest;

    let mut path = Vec::new();
    let mut ci = b;
    while ci != usize::MAX {
        path.push(point(ci));
        ci = second.parent[ci];
    }
    path.reverse();

    Some(Diameter {
        length: second.dist[b],
        from: a,
        to: point(b),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_core::{Direction, WallGrid};

    #[test]
    fn open_grid_distances_are_manhattan() {
        let g = WallGrid::open(4, 3);
        let d = bfs_distances(&g, Point::new(0, 0));
        for p in g.bounds().iter() {
            assert_eq!(d[(p.y * 4 + p.x) as usize], p.x + p.y);
        }
    }

    #[test]
    fn walled_cells_are_unreachable() {
        let mut g = WallGrid::open(3, 3);
        g.enclose(Point::new(2, 2));
        let d = bfs_distances(&g, Point::new(0, 0));
        assert_eq!(d[8], UNREACHABLE);
        assert_eq!(d[7], 3);
    }

    #[test]
    fn corridor_diameter() {
        let mut g = WallGrid::closed(5, 1);
        for x in 0..4 {
            g.carve(Point::new(x, 0), Direction::East);
        }
        let dia = diameter(&g).unwrap();
        assert_eq!(dia.length, 4);
        assert_eq!(dia.path.len(), 5);
        assert_eq!(dia.path.first(), Some(&dia.from));
        assert_eq!(dia.path.last(), Some(&dia.to));
        let ends = [dia.from, dia.to];
        assert!(ends.contains(&Point::new(0, 0)));
        assert!(ends.contains(&Point::new(4, 0)));
    }

    #[test]
    fn empty_grid_has_no_diameter() {
        assert_eq!(diameter(&WallGrid::open(0, 0)), None);
    }
}
