//! Sparse per-cell visit counter.

use std::collections::HashMap;

use mazerun_core::Point;

/// Summary numbers for an [`ExplorationHeatmap`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatmapStats {
    /// Sum of all visits.
    pub total_visits: u64,
    /// Distinct cells visited at least once.
    pub unique_cells: usize,
    /// Highest visit count of any single cell.
    pub max_visits: u32,
    pub avg_visits: f32,
    /// Share of the grid visited, 0 to 100.
    pub density_percent: f32,
}

/// Counts how many times each cell has been settled across a run.
#[derive(Debug, Clone)]
pub struct ExplorationHeatmap {
    width: i32,
    height: i32,
    visits: HashMap<Point, u32>,
    max_visits: u32,
}

impl ExplorationHeatmap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            visits: HashMap::new(),
            max_visits: 0,
        }
    }

    pub fn record_visit(&mut self, p: Point) {
        let n = self.visits.entry(p).or_insert(0);
        *n += 1;
        self.max_visits = self.max_visits.max(*n);
    }

    /// Visit count of `p`, zero if never visited.
    pub fn visits(&self, p: Point) -> u32 {
        self.visits.get(&p).copied().unwrap_or(0)
    }

    pub fn max_visits(&self) -> u32 {
        self.max_visits
    }

    pub fn unique_cells(&self) -> usize {
        self.visits.len()
    }

    pub fn total_visits(&self) -> u64 {
        self.visits.values().map(|&v| u64::from(v)).sum()
    }

    pub fn clear(&mut self) {
        self.visits.clear();
        self.max_visits = 0;
    }

    /// Row-major visit counts scaled to `[0, 1]` by the maximum.
    pub fn normalized(&self) -> Vec<f32> {
        let len = (self.width.max(0) * self.height.max(0)) as usize;
        let mut grid = vec![0.0; len];
        if self.max_visits == 0 {
            return grid;
        }
        for (p, &v) in &self.visits {
            if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
                continue;
            }
            grid[(p.y * self.width + p.x) as usize] = v as f32 / self.max_visits as f32;
        }
        grid
    }

    pub fn stats(&self) -> HeatmapStats {
        if self.visits.is_empty() {
            return HeatmapStats::default();
        }
        let total_visits = self.total_visits();
        let unique_cells = self.visits.len();
        let cells = (self.width * self.height).max(1) as f32;
        HeatmapStats {
            total_visits,
            unique_cells,
            max_visits: self.max_visits,
            avg_visits: total_visits as f32 / unique_cells as f32,
            density_percent: unique_cells as f32 / cells * 100.0,
        }
    }
}
