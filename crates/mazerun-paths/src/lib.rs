//! Incremental maze searches for walled grids.
//!
//! This crate drives searches one unit of work at a time so callers can
//! animate or race them:
//!
//! - **A\***, **Greedy best-first**, **Uniform-cost** and **Depth-first**
//!   single-leg search ([`SearchEngine`])
//! - **Collector runs** that visit every collectible before the goal
//!   ([`Sequencer`], [`order_objectives`])
//! - **Exploration heatmaps** of settled cells ([`ExplorationHeatmap`])
//! - **BFS** distance maps and maze diameter ([`bfs_distances`], [`diameter`])
//!
//! Everything reads the maze through [`mazerun_core::GridView`].

mod analysis;
mod collectibles;
mod distance;
mod engine;
mod frontier;
mod heatmap;
mod neighbors;
mod sequencer;

pub use analysis::{Diameter, UNREACHABLE, bfs_distances, diameter};
pub use collectibles::Collectibles;
pub use distance::manhattan;
pub use engine::{CellState, Requeue, SearchConfig, SearchEngine, SearchStatus, Strategy};
pub use heatmap::{ExplorationHeatmap, HeatmapStats};
pub use neighbors::Neighbors;
pub use sequencer::{CollectKind, Collection, Phase, PathSegment, Sequencer, order_objectives};
