//! Step-at-a-time single-leg search.
//!
//! A [`SearchEngine`] does one unit of work per [`step`](SearchEngine::step):
//! pop and expand one frontier cell for the best-first strategies, or one
//! push/pop for depth-first. Callers can interleave steps with rendering and
//! poll the per-cell state between them.

use log::debug;
use mazerun_core::{Direction, GridView, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::neighbors::Neighbors;

const NO_PARENT: usize = usize::MAX;

/// Search strategy, selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Priority = cost so far + Manhattan estimate. Optimal on mazes.
    #[default]
    AStar,
    /// Priority = Manhattan estimate only.
    Greedy,
    /// Priority = cost so far only (breadth-first on uniform costs).
    UniformCost,
    /// Backtracking stack with shuffled neighbour order.
    DepthFirst,
}

impl Strategy {
    /// Every strategy, in menu order.
    pub const ALL: [Strategy; 4] = [
        Strategy::DepthFirst,
        Strategy::AStar,
        Strategy::Greedy,
        Strategy::UniformCost,
    ];

    /// Short display name, also used as the ranking key.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::AStar => "A*",
            Strategy::Greedy => "Greedy",
            Strategy::UniformCost => "UCS",
            Strategy::DepthFirst => "DFS",
        }
    }
}

/// What to do when a cell already on the frontier gets a better priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requeue {
    /// Push a fresh entry; the older one is skipped when popped.
    #[default]
    OnImprove,
    /// Keep the first queue entry. Cost and predecessor are still updated,
    /// but the cell is popped at its original priority.
    KeepFirst,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Seed for depth-first neighbour shuffling.
    pub seed: u64,
    pub requeue: Requeue,
}

impl SearchConfig {
    /// Default configuration for `strategy`.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

/// Per-cell visitation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unknown,
    Frontier,
    Settled,
}

/// Outcome reported by [`SearchEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Running,
    /// The goal was reached; the path is available.
    Solved,
    /// The frontier ran dry before reaching the goal: no path exists.
    Exhausted,
}

/// Incremental search from `start` to `goal` over a [`GridView`].
pub struct SearchEngine<'a, G: GridView> {
    grid: &'a G,
    config: SearchConfig,
    start: Point,
    goal: Point,
    width: usize,
    cost: Vec<f32>,
    priority: Vec<f32>,
    parent: Vec<usize>,
    state: Vec<CellState>,
    frontier: Frontier,
    stack: Vec<usize>,
    rng: StdRng,
    status: SearchStatus,
    path: Vec<Point>,
    head: Option<Point>,
    last_settled: Option<Point>,
    expanded: usize,
    nbuf: Neighbors,
}

impl<'a, G: GridView> SearchEngine<'a, G> {
    /// Create an engine and seed its frontier with `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` or `goal` lies outside the grid.
    pub fn new(grid: &'a G, start: Point, goal: Point, config: SearchConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(grid, start, goal, config, rng)
    }

    /// Like [`new`](Self::new) but with an explicit generator for
    /// depth-first shuffling; `config.seed` is ignored.
    pub fn with_rng(
        grid: &'a G,
        start: Point,
        goal: Point,
        config: SearchConfig,
        rng: StdRng,
    ) -> Self {
        assert!(grid.contains(start), "search start {start} is outside the grid");
        assert!(grid.contains(goal), "search goal {goal} is outside the grid");

        let width = grid.width() as usize;
        let len = grid.bounds().len();
        let mut engine = Self {
            grid,
            config,
            start,
            goal,
            width,
            cost: vec![f32::INFINITY; len],
            priority: vec![f32::INFINITY; len],
            parent: vec![NO_PARENT; len],
            state: vec![CellState::Unknown; len],
            frontier: Frontier::new(),
            stack: Vec::new(),
            rng,
            status: SearchStatus::Running,
            path: Vec::new(),
            head: None,
            last_settled: None,
            expanded: 0,
            nbuf: Neighbors::new(),
        };

        let si = engine.idx(start);
        engine.cost[si] = 0.0;
        engine.state[si] = CellState::Frontier;
        if config.strategy == Strategy::DepthFirst {
            engine.stack.push(si);
        } else {
            let f = engine.priority_of(0.0, start);
            engine.priority[si] = f;
            engine.frontier.push(si, f);
        }
        engine
    }

    /// Advance the search by one unit of work.
    ///
    /// Once the search has finished, further calls change nothing and keep
    /// returning the terminal status.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }
        self.last_settled = None;
        match self.config.strategy {
            Strategy::DepthFirst => self.step_depth_first(),
            _ => self.step_best_first(),
        }
        self.status
    }

    /// Run to completion and return the terminal status.
    pub fn run(&mut self) -> SearchStatus {
        while self.step() == SearchStatus::Running {}
        self.status
    }

    fn step_best_first(&mut self) {
        let Some(ci) = self.pop_live() else {
            self.finish(SearchStatus::Exhausted);
            return;
        };

        let cp = self.point(ci);
        self.head = Some(cp);
        self.settle(ci, cp);
        if cp == self.goal {
            self.reconstruct(ci);
            self.finish(SearchStatus::Solved);
            return;
        }

        let g = self.cost[ci] + 1.0;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        for &np in nbuf.open(self.grid, cp) {
            let ni = self.idx(np);
            match self.state[ni] {
                CellState::Settled => continue,
                CellState::Frontier => {
                    if g >= self.cost[ni] {
                        continue;
                    }
                    let f = self.priority_of(g, np);
                    let improved = f < self.priority[ni];
                    self.cost[ni] = g;
                    self.parent[ni] = ci;
                    self.priority[ni] = f;
                    if improved && self.config.requeue == Requeue::OnImprove {
                        self.frontier.push(ni, f);
                    }
                }
                CellState::Unknown => {
                    let f = self.priority_of(g, np);
                    self.cost[ni] = g;
                    self.parent[ni] = ci;
                    self.priority[ni] = f;
                    self.state[ni] = CellState::Frontier;
                    self.frontier.push(ni, f);
                }
            }
        }
        self.nbuf = nbuf;

        self.drop_stale();
        if self.frontier.is_empty() {
            self.finish(SearchStatus::Exhausted);
        }
    }

    fn step_depth_first(&mut self) {
        let Some(&ci) = self.stack.last() else {
            self.finish(SearchStatus::Exhausted);
            return;
        };

        let cp = self.point(ci);
        self.head = Some(cp);
        if self.state[ci] != CellState::Settled {
            self.settle(ci, cp);
            if cp == self.goal {
                self.reconstruct(ci);
                self.finish(SearchStatus::Solved);
                return;
            }
        }

        let mut dirs = Direction::ALL;
        dirs.shuffle(&mut self.rng);
        let next = dirs.into_iter().find_map(|dir| {
            if self.grid.wall_between(cp, dir) {
                return None;
            }
            let np = cp + dir.offset();
            if !self.grid.contains(np) {
                return None;
            }
            let ni = self.idx(np);
            (self.state[ni] == CellState::Unknown).then_some(ni)
        });

        match next {
            Some(ni) => {
                // Marked on push so a cell is never stacked twice.
                self.state[ni] = CellState::Frontier;
                self.parent[ni] = ci;
                self.cost[ni] = self.cost[ci] + 1.0;
                self.stack.push(ni);
            }
            None => {
                self.stack.pop();
            }
        }

        if self.stack.is_empty() {
            self.finish(SearchStatus::Exhausted);
        }
    }

    /// Pop the best entry that has not been settled yet.
    fn pop_live(&mut self) -> Option<usize> {
        while let Some(idx) = self.frontier.pop() {
            if self.state[idx] != CellState::Settled {
                return Some(idx);
            }
        }
        None
    }

    /// Discard stale heads so an empty frontier is noticed right away.
    fn drop_stale(&mut self) {
        while let Some(idx) = self.frontier.peek() {
            if self.state[idx] != CellState::Settled {
                break;
            }
            self.frontier.pop();
        }
    }

    fn settle(&mut self, idx: usize, p: Point) {
        self.state[idx] = CellState::Settled;
        self.expanded += 1;
        self.last_settled = Some(p);
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        debug!(
            "{} search {} -> {}: {:?} after {} expansions, path length {}",
            self.config.strategy.name(),
            self.start,
            self.goal,
            status,
            self.expanded,
            self.path.len()
        );
    }

    fn priority_of(&self, g: f32, p: Point) -> f32 {
        let h = manhattan(p, self.goal) as f32;
        match self.config.strategy {
            Strategy::AStar => g + h,
            Strategy::Greedy => h,
            Strategy::UniformCost => g,
            Strategy::DepthFirst => 0.0,
        }
    }

    fn reconstruct(&mut self, goal_idx: usize) {
        self.path.clear();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            self.path.push(self.point(ci));
            ci = self.parent[ci];
        }
        self.path.reverse();
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Flat index of an in-bounds point.
    #[inline]
    fn idx(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    #[inline]
    fn checked_idx(&self, p: Point) -> Option<usize> {
        self.grid.contains(p).then(|| self.idx(p))
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Current status without stepping.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Whether the search has terminated, solved or not.
    pub fn is_finished(&self) -> bool {
        self.status != SearchStatus::Running
    }

    /// Whether the goal was reached.
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }

    /// The cell most recently popped (best-first) or on top of the stack
    /// (depth-first). `None` before the first step.
    pub fn head(&self) -> Option<Point> {
        self.head
    }

    /// The cell settled by the most recent step, if any.
    pub fn last_settled(&self) -> Option<Point> {
        self.last_settled
    }

    /// Start-to-goal path, empty unless solved.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Number of cells settled so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of live and stale entries waiting in the frontier or stack.
    pub fn frontier_len(&self) -> usize {
        match self.config.strategy {
            Strategy::DepthFirst => self.stack.len(),
            _ => self.frontier.len(),
        }
    }

    /// Visitation state of `p`; `Unknown` outside the grid.
    pub fn state_at(&self, p: Point) -> CellState {
        self.checked_idx(p)
            .map_or(CellState::Unknown, |i| self.state[i])
    }

    /// Tentative cost of `p`; infinite when unreached or outside the grid.
    pub fn cost_at(&self, p: Point) -> f32 {
        self.checked_idx(p).map_or(f32::INFINITY, |i| self.cost[i])
    }

    /// Predecessor of `p` on its best known route from the start.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        let i = self.checked_idx(p)?;
        let parent = self.parent[i];
        (parent != NO_PARENT).then(|| self.point(parent))
    }

    /// Row-major visitation states, for visualization.
    pub fn states(&self) -> &[CellState] {
        &self.state
    }

    /// Row-major tentative costs, for heat-map rendering.
    pub fn costs(&self) -> &[f32] {
        &self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{UNREACHABLE, bfs_distances};
    use mazerun_core::WallGrid;

    fn engine(grid: &WallGrid, strategy: Strategy) -> SearchEngine<'_, WallGrid> {
        SearchEngine::new(
            grid,
            Point::new(0, 0),
            Point::new(grid.width() - 1, grid.height() - 1),
            SearchConfig::with_strategy(strategy),
        )
    }

    /// A serpentine maze: every row is open, rows are joined alternately at
    /// the east and west ends.
    fn serpentine(w: i32, h: i32) -> WallGrid {
        let mut g = WallGrid::closed(w, h);
        for y in 0..h {
            for x in 0..w - 1 {
                g.carve(Point::new(x, y), Direction::East);
            }
            if y + 1 < h {
                let x = if y % 2 == 0 { w - 1 } else { 0 };
                g.carve(Point::new(x, y), Direction::South);
            }
        }
        g
    }

    /// Open grid with a few internal walls, deterministic.
    fn obstacle_grid() -> WallGrid {
        let mut g = WallGrid::open(8, 8);
        for y in 0..7 {
            g.set_wall(Point::new(2, y), Direction::East, true);
        }
        for y in 1..8 {
            g.set_wall(Point::new(5, y), Direction::East, true);
        }
        for x in 3..5 {
            g.set_wall(Point::new(x, 3), Direction::South, true);
        }
        g
    }

    fn assert_valid_path(grid: &WallGrid, path: &[Point]) {
        for w in path.windows(2) {
            let step = w[1] - w[0];
            let dir = Direction::ALL
                .into_iter()
                .find(|d| d.offset() == step)
                .expect("path moves one cell at a time");
            assert!(!grid.wall_between(w[0], dir), "path crosses a wall");
        }
    }

    #[test]
    fn astar_open_grid_five_by_five() {
        let g = WallGrid::open(5, 5);
        let mut e = engine(&g, Strategy::AStar);
        assert_eq!(e.run(), SearchStatus::Solved);
        assert!(e.is_finished());
        assert!(e.is_solved());
        assert_eq!(e.path().len(), 9);
        assert_eq!(e.path()[0], Point::new(0, 0));
        assert_eq!(e.path()[8], Point::new(4, 4));
        assert_valid_path(&g, e.path());
    }

    #[test]
    fn enclosed_start_finishes_on_first_step() {
        for strategy in Strategy::ALL {
            let mut g = WallGrid::open(5, 5);
            g.enclose(Point::new(0, 0));
            let mut e = engine(&g, strategy);
            assert_eq!(e.step(), SearchStatus::Exhausted, "{strategy:?}");
            assert!(e.is_finished());
            assert!(!e.is_solved());
            assert!(e.path().is_empty());
        }
    }

    #[test]
    fn astar_matches_bfs_shortest_paths() {
        let grids = [serpentine(6, 5), obstacle_grid(), WallGrid::open(7, 4)];
        for g in &grids {
            for start in g.bounds().iter().step_by(3) {
                let dist = bfs_distances(g, start);
                for goal in g.bounds().iter() {
                    let expected = dist[(goal.y * g.width() + goal.x) as usize];
                    let mut e = SearchEngine::new(g, start, goal, SearchConfig::default());
                    let status = e.run();
                    if expected == UNREACHABLE {
                        assert_eq!(status, SearchStatus::Exhausted);
                    } else {
                        assert_eq!(status, SearchStatus::Solved);
                        assert_eq!(e.path().len() as i32, expected + 1, "{start} -> {goal}");
                        assert_valid_path(g, e.path());
                    }
                }
            }
        }
    }

    #[test]
    fn uniform_cost_is_optimal_too() {
        let g = obstacle_grid();
        let dist = bfs_distances(&g, Point::new(0, 0));
        let mut e = engine(&g, Strategy::UniformCost);
        assert_eq!(e.run(), SearchStatus::Solved);
        assert_eq!(e.path().len() as i32, dist[63] + 1);
    }

    #[test]
    fn every_strategy_solves_connected_mazes() {
        let g = serpentine(5, 4);
        for strategy in Strategy::ALL {
            let mut e = engine(&g, strategy);
            assert_eq!(e.run(), SearchStatus::Solved, "{strategy:?}");
            // The serpentine has exactly one route: three full rows, then
            // one step down into the corner.
            assert_eq!(e.path().len(), 16, "{strategy:?}");
            assert_valid_path(&g, e.path());
        }
    }

    #[test]
    fn steps_after_finish_change_nothing() {
        let g = obstacle_grid();
        for strategy in Strategy::ALL {
            let mut e = engine(&g, strategy);
            let status = e.run();
            let expanded = e.expanded();
            let path = e.path().to_vec();
            let states = e.states().to_vec();
            let last = e.last_settled();
            for _ in 0..5 {
                assert_eq!(e.step(), status);
            }
            assert_eq!(e.expanded(), expanded);
            assert_eq!(e.path(), path.as_slice());
            assert_eq!(e.states(), states.as_slice());
            assert_eq!(e.last_settled(), last);
        }
    }

    #[test]
    fn unreachable_goal_is_exhausted_not_solved() {
        let mut g = WallGrid::open(4, 4);
        g.enclose(Point::new(3, 3));
        for strategy in Strategy::ALL {
            let mut e = engine(&g, strategy);
            assert_eq!(e.run(), SearchStatus::Exhausted);
            assert!(e.is_finished() && !e.is_solved());
            assert_eq!(e.state_at(Point::new(3, 3)), CellState::Unknown);
            assert_eq!(e.cost_at(Point::new(3, 3)), f32::INFINITY);
        }
    }

    #[test]
    fn start_equals_goal() {
        let g = WallGrid::open(3, 3);
        let p = Point::new(1, 1);
        let mut e = SearchEngine::new(&g, p, p, SearchConfig::default());
        assert_eq!(e.step(), SearchStatus::Solved);
        assert_eq!(e.path(), &[p]);
        assert_eq!(e.expanded(), 1);
    }

    #[test]
    fn first_step_settles_start_and_opens_neighbors() {
        let g = WallGrid::open(3, 3);
        let mut e = engine(&g, Strategy::AStar);
        assert_eq!(e.head(), None);
        assert_eq!(e.state_at(Point::new(0, 0)), CellState::Frontier);
        assert_eq!(e.step(), SearchStatus::Running);
        assert_eq!(e.head(), Some(Point::new(0, 0)));
        assert_eq!(e.last_settled(), Some(Point::new(0, 0)));
        assert_eq!(e.state_at(Point::new(0, 0)), CellState::Settled);
        assert_eq!(e.state_at(Point::new(1, 0)), CellState::Frontier);
        assert_eq!(e.state_at(Point::new(0, 1)), CellState::Frontier);
        assert_eq!(e.cost_at(Point::new(1, 0)), 1.0);
        assert_eq!(e.came_from(Point::new(1, 0)), Some(Point::new(0, 0)));
        assert_eq!(e.came_from(Point::new(0, 0)), None);
        assert_eq!(e.state_at(Point::new(-1, 0)), CellState::Unknown);
    }

    #[test]
    fn equal_priorities_expand_in_insertion_order() {
        // From (1, 1) on an open grid every neighbour of the start has the
        // same uniform-cost priority, so they pop in wall order N, W, E, S.
        let g = WallGrid::open(3, 3);
        let mut e = SearchEngine::new(
            &g,
            Point::new(1, 1),
            Point::new(2, 2),
            SearchConfig::with_strategy(Strategy::UniformCost),
        );
        e.step();
        let mut order = Vec::new();
        for _ in 0..4 {
            e.step();
            order.push(e.last_settled().unwrap());
        }
        assert_eq!(
            order,
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn searches_are_deterministic() {
        let g = obstacle_grid();
        for strategy in Strategy::ALL {
            let mut a = engine(&g, strategy);
            let mut b = engine(&g, strategy);
            a.run();
            b.run();
            assert_eq!(a.path(), b.path());
            assert_eq!(a.expanded(), b.expanded());
        }
    }

    #[test]
    fn depth_first_seed_changes_exploration() {
        let g = WallGrid::open(6, 6);
        let runs: Vec<Vec<Point>> = (0..8)
            .map(|seed| {
                let mut e = SearchEngine::new(
                    &g,
                    Point::new(0, 0),
                    Point::new(5, 5),
                    SearchConfig {
                        strategy: Strategy::DepthFirst,
                        seed,
                        ..SearchConfig::default()
                    },
                );
                assert_eq!(e.run(), SearchStatus::Solved);
                assert_valid_path(&g, e.path());
                e.path().to_vec()
            })
            .collect();
        assert!(runs.iter().any(|p| p != &runs[0]));
    }

    #[test]
    fn depth_first_with_explicit_rng() {
        let g = WallGrid::open(4, 4);
        let config = SearchConfig::with_strategy(Strategy::DepthFirst);
        let mut a = SearchEngine::with_rng(
            &g,
            Point::new(0, 0),
            Point::new(3, 3),
            config,
            StdRng::seed_from_u64(99),
        );
        let mut b = SearchEngine::new(
            &g,
            Point::new(0, 0),
            Point::new(3, 3),
            SearchConfig { seed: 99, ..config },
        );
        a.run();
        b.run();
        assert_eq!(a.path(), b.path());
    }

    #[test]
    fn depth_first_never_stacks_a_cell_twice() {
        let g = WallGrid::open(5, 5);
        let mut e = engine(&g, Strategy::DepthFirst);
        while e.step() == SearchStatus::Running {
            assert!(e.frontier_len() <= 25);
        }
        assert!(e.expanded() <= 25);
    }

    #[test]
    fn greedy_expands_no_more_than_uniform_cost_in_open_field() {
        let g = WallGrid::open(10, 10);
        let mut greedy = engine(&g, Strategy::Greedy);
        let mut ucs = engine(&g, Strategy::UniformCost);
        greedy.run();
        ucs.run();
        assert!(greedy.expanded() < ucs.expanded());
    }

    /// Runs to completion and returns the largest frontier seen.
    fn run_peak(e: &mut SearchEngine<'_, WallGrid>) -> usize {
        let mut peak = e.frontier_len();
        while e.step() == SearchStatus::Running {
            peak = peak.max(e.frontier_len());
        }
        peak
    }

    #[test]
    fn keep_first_differs_from_requeue() {
        // Walls force (2, 1) and (3, 1) to be reached the long way first,
        // then improved from the row above while still queued.
        let mut g = WallGrid::open(5, 4);
        g.set_wall(Point::new(0, 0), Direction::East, true);
        g.set_wall(Point::new(1, 1), Direction::East, true);
        g.set_wall(Point::new(1, 2), Direction::East, true);
        g.set_wall(Point::new(3, 3), Direction::East, true);

        let run = |requeue| {
            let mut e = SearchEngine::new(
                &g,
                Point::new(0, 0),
                Point::new(4, 3),
                SearchConfig {
                    requeue,
                    ..SearchConfig::default()
                },
            );
            let peak = run_peak(&mut e);
            (e, peak)
        };
        let (keep, keep_peak) = run(Requeue::KeepFirst);
        let (requeue, requeue_peak) = run(Requeue::OnImprove);

        assert!(keep.is_solved() && requeue.is_solved());
        assert_eq!(keep.path().len(), 10);
        assert_eq!(requeue.path().len(), 10);
        assert_eq!((keep.expanded(), requeue.expanded()), (16, 17));
        assert_eq!((keep_peak, requeue_peak), (5, 7));
        // The single kept entry still carries the improved route.
        assert_eq!(keep.cost_at(Point::new(2, 1)), 5.0);
        assert_eq!(keep.came_from(Point::new(2, 1)), Some(Point::new(2, 0)));
        assert_eq!(keep.cost_at(Point::new(3, 1)), 6.0);
        assert_eq!(keep.came_from(Point::new(3, 1)), Some(Point::new(3, 0)));
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn out_of_bounds_goal_panics() {
        let g = WallGrid::open(3, 3);
        let _ = SearchEngine::new(&g, Point::new(0, 0), Point::new(3, 0), SearchConfig::default());
    }
}
