//! Headless benchmark harness shared by the demo binaries.
//!
//! Demonstrates: seeded hunt-and-kill maze carving with collectible
//! placement, racing every search strategy on the same maze, a collector run
//! through all collectibles, and feeding the results into a leaderboard.

use std::time::Instant;

use mazerun_core::{Direction, GridView, Point, WallGrid};
use mazerun_paths::{Collectibles, SearchConfig, SearchEngine, Sequencer, Strategy};
use mazerun_rank::{RankingService, RunSample};
use rand::{Rng, RngExt};

/// Carve progress fractions at which collectibles are dropped.
const COLLECTIBLE_MARKS: [f32; 3] = [0.33, 0.66, 0.90];

// ---------------------------------------------------------------------------
// Maze generation
// ---------------------------------------------------------------------------

/// A carved maze and the collectibles dropped while carving it.
pub struct Maze {
    pub grid: WallGrid,
    pub collectibles: Vec<Point>,
}

fn random_dir(
    grid: &WallGrid,
    p: Point,
    visited: &[bool],
    want_visited: bool,
    rng: &mut impl Rng,
) -> Option<Direction> {
    let w = grid.width();
    let dirs: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| {
            let q = p + d.offset();
            grid.contains(q) && visited[(q.y * w + q.x) as usize] == want_visited
        })
        .collect();
    if dirs.is_empty() {
        return None;
    }
    Some(dirs[rng.random_range(0..dirs.len())])
}

/// Carve a perfect maze with hunt-and-kill.
///
/// Random-walk into unvisited cells until trapped, then scan for an
/// unvisited cell next to the carved region, connect it and walk again.
/// Collectibles land on the cells carved at roughly a third, two thirds and
/// nine tenths of the way through.
pub fn hunt_and_kill(width: i32, height: i32, rng: &mut impl Rng) -> Maze {
    let mut grid = WallGrid::closed(width, height);
    let total = grid.bounds().len();
    let mut collectibles = Vec::new();
    if total == 0 {
        return Maze { grid, collectibles };
    }

    let mut visited = vec![false; total];
    let mut cur = Point::new(rng.random_range(0..width), rng.random_range(0..height));
    visited[(cur.y * width + cur.x) as usize] = true;
    let mut carved = 1usize;
    let mut marks = COLLECTIBLE_MARKS.iter().peekable();

    loop {
        if let Some(dir) = random_dir(&grid, cur, &visited, false, rng) {
            grid.carve(cur, dir);
            cur = cur + dir.offset();
        } else {
            // Hunt.
            let found = grid.bounds().iter().find_map(|p| {
                if visited[(p.y * width + p.x) as usize] {
                    return None;
                }
                random_dir(&grid, p, &visited, true, rng).map(|d| (p, d))
            });
            let Some((p, dir)) = found else {
                break;
            };
            grid.carve(p, dir);
            cur = p;
        }
        visited[(cur.y * width + cur.x) as usize] = true;
        carved += 1;

        let progress = carved as f32 / total as f32;
        if marks.next_if(|&&m| progress >= m).is_some() {
            collectibles.push(cur);
        }
    }

    log::debug!(
        "carved {width}x{height} maze with {} collectibles",
        collectibles.len()
    );
    Maze { grid, collectibles }
}

/// Knock down random interior walls so the maze has loops.
///
/// Strategies only behave differently when there is more than one route.
pub fn braid(grid: &mut WallGrid, walls: usize, rng: &mut impl Rng) {
    let (w, h) = (grid.width(), grid.height());
    if w < 2 && h < 2 {
        return;
    }
    let mut removed = 0;
    let mut attempts = 0;
    while removed < walls && attempts < walls * 20 {
        attempts += 1;
        let p = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        let dir = if rng.random_range(0..2) == 0 {
            Direction::East
        } else {
            Direction::South
        };
        if grid.contains(p + dir.offset()) && grid.wall_between(p, dir) {
            grid.carve(p, dir);
            removed += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Outcome of one timed search.
#[derive(Debug, Clone)]
pub struct RaceResult {
    pub strategy: Strategy,
    pub solved: bool,
    pub steps: usize,
    pub expanded: usize,
    pub path_len: usize,
    pub time_ms: f64,
}

/// Run every strategy from `start` to `goal` and record solved runs.
pub fn race<G: GridView>(
    grid: &G,
    start: Point,
    goal: Point,
    seed: u64,
    ranking: &mut RankingService,
) -> Vec<RaceResult> {
    Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let config = SearchConfig {
                seed,
                ..SearchConfig::with_strategy(strategy)
            };
            let timer = Instant::now();
            let mut engine = SearchEngine::new(grid, start, goal, config);
            let mut steps = 0;
            while !engine.is_finished() {
                engine.step();
                steps += 1;
            }
            let result = RaceResult {
                strategy,
                solved: engine.is_solved(),
                steps,
                expanded: engine.expanded(),
                path_len: engine.path().len(),
                time_ms: timer.elapsed().as_secs_f64() * 1000.0,
            };
            if result.solved {
                ranking.record_run(
                    strategy.name(),
                    result.time_ms,
                    result.expanded as u64,
                    result.path_len as u64,
                );
            }
            result
        })
        .collect()
}

/// Summary of a collector run.
#[derive(Debug, Clone)]
pub struct CollectorResult {
    pub legs: usize,
    pub unreached: usize,
    pub bonuses: usize,
    pub collected: usize,
    pub expanded: usize,
    pub path_len: usize,
    pub time_ms: f64,
}

/// Visit every collectible, then `goal`, and record the run as
/// `"Collector <strategy>"`.
pub fn collect<G: GridView>(
    grid: &G,
    start: Point,
    items: &[Point],
    goal: Point,
    config: SearchConfig,
    ranking: &mut RankingService,
) -> CollectorResult {
    let timer = Instant::now();
    let collectibles: Collectibles = items.iter().copied().collect();
    let mut seq = Sequencer::new(grid, start, collectibles, goal, config);
    seq.run();
    let time_ms = timer.elapsed().as_secs_f64() * 1000.0;

    let result = CollectorResult {
        legs: seq.segments().len(),
        unreached: seq.segments().iter().filter(|s| !s.reached).count(),
        bonuses: seq.segments().iter().map(|s| s.bonuses.len()).sum(),
        collected: seq.collected_count(),
        expanded: seq.expanded(),
        path_len: seq.full_path().len(),
        time_ms,
    };
    ranking.record_sample(
        &format!("Collector {}", config.strategy.name()),
        RunSample {
            time_ms,
            nodes: result.expanded as u64,
            path_len: result.path_len as u64,
            collected: result.collected as u32,
        },
    );
    result
}
