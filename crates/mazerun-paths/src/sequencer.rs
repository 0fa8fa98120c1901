//! Multi-objective routing: chain single-leg searches to visit every
//! collectible and then the final goal.
//!
//! The visiting order is fixed up front by [`order_objectives`]. Each leg
//! gets a fresh [`SearchEngine`] from the current position to the next
//! objective. While a leg runs, any other uncollected collectible that the
//! engine settles is picked up on the spot and dropped from the remaining
//! objectives, so it never needs a leg of its own.
//!
//! Settling is enough: the cell only has to be expanded by the leg's search,
//! not lie on the route the leg finally returns. A bonus may therefore be
//! missing from [`Sequencer::full_path`].

use log::{debug, trace};
use mazerun_core::{GridView, Point};

use crate::collectibles::Collectibles;
use crate::distance::manhattan;
use crate::engine::{CellState, SearchConfig, SearchEngine, SearchStatus};
use crate::heatmap::ExplorationHeatmap;

/// Order `candidates` farthest-combined-distance first.
///
/// Repeatedly picks the remaining candidate maximising
/// `manhattan(current, c) + manhattan(c, final_goal)`, then moves `current`
/// to it. Ties keep input order.
pub fn order_objectives(start: Point, candidates: &[Point], final_goal: Point) -> Vec<Point> {
    let mut remaining = candidates.to_vec();
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_score = i32::MIN;
        for (i, &c) in remaining.iter().enumerate() {
            let score = manhattan(current, c) + manhattan(c, final_goal);
            if score > best_score {
                best_score = score;
                best_idx = i;
            }
        }
        current = remaining.remove(best_idx);
        ordered.push(current);
    }

    ordered
}

/// Where the sequencer is in its leg cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    LegRunning,
    /// The current leg finished; the next step starts the next one.
    LegComplete,
    Done,
}

/// The route walked for one objective.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment {
    /// Position of the target in the objective list when the leg ran.
    pub objective_index: usize,
    pub target: Point,
    /// Cells from the leg start to the target, both included. Empty when
    /// the target was unreachable.
    pub path: Vec<Point>,
    /// Collectibles intercepted while this leg was running.
    pub bonuses: Vec<Point>,
    pub reached: bool,
}

/// How a collectible was picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollectKind {
    /// It was the target of its own leg.
    Target,
    /// It was intercepted while routing to another objective.
    Bonus,
}

/// One pick-up event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collection {
    pub at: Point,
    /// Objective index of the leg that was running.
    pub leg: usize,
    pub kind: CollectKind,
}

/// Step-at-a-time collector run over a [`GridView`].
pub struct Sequencer<'a, G: GridView> {
    grid: &'a G,
    config: SearchConfig,
    final_goal: Point,
    objectives: Vec<Point>,
    index: usize,
    collectibles: Collectibles,
    engine: SearchEngine<'a, G>,
    leg_bonuses: Vec<Point>,
    position: Point,
    segments: Vec<PathSegment>,
    full_path: Vec<Point>,
    collections: Vec<Collection>,
    heatmap: ExplorationHeatmap,
    finished_expansions: usize,
    phase: Phase,
}

impl<'a, G: GridView> Sequencer<'a, G> {
    /// Plan the objective order and start the first leg.
    ///
    /// Every uncollected item in `collectibles` becomes an objective; the
    /// final goal is always the last one.
    ///
    /// # Panics
    ///
    /// Panics if `start`, `final_goal` or any uncollected collectible lies
    /// outside the grid.
    pub fn new(
        grid: &'a G,
        start: Point,
        collectibles: Collectibles,
        final_goal: Point,
        config: SearchConfig,
    ) -> Self {
        let candidates: Vec<Point> = collectibles
            .uncollected()
            .filter(|&p| p != final_goal)
            .collect();
        let mut objectives = order_objectives(start, &candidates, final_goal);
        objectives.push(final_goal);
        for &o in &objectives {
            assert!(grid.contains(o), "objective {o} is outside the grid");
        }

        debug!(
            "collector run from {start}: {} objectives, final goal {final_goal}",
            objectives.len()
        );

        let engine = SearchEngine::new(grid, start, objectives[0], Self::leg_config(config, 0));
        Self {
            grid,
            config,
            final_goal,
            objectives,
            index: 0,
            collectibles,
            engine,
            leg_bonuses: Vec::new(),
            position: start,
            segments: Vec::new(),
            full_path: Vec::new(),
            collections: Vec::new(),
            heatmap: ExplorationHeatmap::new(grid.width(), grid.height()),
            finished_expansions: 0,
            phase: Phase::LegRunning,
        }
    }

    fn leg_config(config: SearchConfig, index: usize) -> SearchConfig {
        SearchConfig {
            seed: config.seed.wrapping_add(index as u64),
            ..config
        }
    }

    /// Advance by one unit of work and return the resulting phase.
    ///
    /// A running leg advances its engine by one step; a completed leg
    /// starts the next one (or ends the run). Calls after the run is done
    /// change nothing.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::LegRunning => self.step_leg(),
            Phase::LegComplete => self.advance(),
            Phase::Done => {}
        }
        self.phase
    }

    /// Run to completion.
    pub fn run(&mut self) {
        while self.step() != Phase::Done {}
    }

    fn step_leg(&mut self) {
        let status = self.engine.step();

        if let Some(p) = self.engine.last_settled() {
            self.heatmap.record_visit(p);
            self.position = p;
            if p != self.objectives[self.index] && self.collectibles.is_uncollected(p) {
                self.intercept(p);
            }
        }

        match status {
            SearchStatus::Running => {}
            SearchStatus::Solved => self.complete_leg(true),
            SearchStatus::Exhausted => self.complete_leg(false),
        }
    }

    fn intercept(&mut self, p: Point) {
        self.collectibles.collect(p);
        self.leg_bonuses.push(p);
        self.collections.push(Collection {
            at: p,
            leg: self.index,
            kind: CollectKind::Bonus,
        });

        // The final goal is never dropped.
        let last = self.objectives.len() - 1;
        if let Some(offset) = self
            .objectives
            .get(self.index + 1..last)
            .and_then(|rest| rest.iter().position(|&o| o == p))
        {
            self.objectives.remove(self.index + 1 + offset);
        }
        trace!("intercepted collectible at {p} during leg {}", self.index);
    }

    fn complete_leg(&mut self, reached: bool) {
        let target = self.objectives[self.index];
        let path = if reached {
            let path = self.engine.path().to_vec();
            // The previous leg already ended on this leg's first cell.
            let skip = usize::from(!self.full_path.is_empty());
            self.full_path.extend_from_slice(&path[skip..]);
            self.position = target;
            if self.collectibles.collect(target) {
                self.collections.push(Collection {
                    at: target,
                    leg: self.index,
                    kind: CollectKind::Target,
                });
            }
            path
        } else {
            self.position = self.engine.start();
            Vec::new()
        };

        debug!(
            "leg {} to {target} {} after {} expansions",
            self.index,
            if reached { "reached" } else { "unreachable" },
            self.engine.expanded()
        );

        self.finished_expansions += self.engine.expanded();
        self.segments.push(PathSegment {
            objective_index: self.index,
            target,
            path,
            bonuses: std::mem::take(&mut self.leg_bonuses),
            reached,
        });
        self.phase = Phase::LegComplete;
    }

    fn advance(&mut self) {
        self.index += 1;
        if self.index >= self.objectives.len() {
            self.phase = Phase::Done;
            debug!(
                "collector run done: {} collected, path length {}",
                self.collectibles.collected_count(),
                self.full_path.len()
            );
            return;
        }
        let target = self.objectives[self.index];
        self.engine = SearchEngine::new(
            self.grid,
            self.position,
            target,
            Self::leg_config(self.config, self.index),
        );
        self.phase = Phase::LegRunning;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Last settled cell while a leg runs, the leg's end cell otherwise.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn final_goal(&self) -> Point {
        self.final_goal
    }

    /// Target of the leg in progress, `None` once done.
    pub fn current_target(&self) -> Option<Point> {
        match self.phase {
            Phase::Done => None,
            _ => Some(self.objectives[self.index]),
        }
    }

    pub fn objective_index(&self) -> usize {
        self.index
    }

    /// Remaining plan: visited targets, the current one, then the rest.
    pub fn objectives(&self) -> &[Point] {
        &self.objectives
    }

    /// Completed legs, in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// All reached legs joined end to end. Bonuses settled off the returned
    /// routes do not appear here.
    pub fn full_path(&self) -> &[Point] {
        &self.full_path
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collected_count(&self) -> usize {
        self.collectibles.collected_count()
    }

    pub fn collectibles(&self) -> &Collectibles {
        &self.collectibles
    }

    /// The engine of the current (or last) leg.
    pub fn engine(&self) -> &SearchEngine<'a, G> {
        &self.engine
    }

    /// Visitation state of `p` in the current leg.
    pub fn state_at(&self, p: Point) -> CellState {
        self.engine.state_at(p)
    }

    /// Tentative cost of `p` in the current leg.
    pub fn cost_at(&self, p: Point) -> f32 {
        self.engine.cost_at(p)
    }

    /// Cells settled across all legs so far.
    pub fn expanded(&self) -> usize {
        match self.phase {
            Phase::LegRunning => self.finished_expansions + self.engine.expanded(),
            _ => self.finished_expansions,
        }
    }

    pub fn heatmap(&self) -> &ExplorationHeatmap {
        &self.heatmap
    }
}
