//! Per-algorithm run statistics.

/// Weights for [`AlgorithmRecord::efficiency_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EfficiencyWeights {
    pub time: f64,
    pub nodes: f64,
    pub path: f64,
}

impl Default for EfficiencyWeights {
    fn default() -> Self {
        Self {
            time: 0.5,
            nodes: 0.4,
            path: 0.1,
        }
    }
}

/// Measurements from one completed search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSample {
    pub time_ms: f64,
    /// Cells expanded.
    pub nodes: u64,
    /// Path length in cells, start and goal included.
    pub path_len: u64,
    /// Collectibles picked up; zero for single-goal searches.
    pub collected: u32,
}

/// Running totals for one algorithm name. Averages are derived on read.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmRecord {
    pub name: String,
    pub runs: u32,
    pub sum_time_ms: f64,
    pub sum_nodes: u64,
    pub sum_path_len: u64,
    pub sum_collected: u64,
    pub last_time_ms: f64,
    pub last_nodes: u64,
    pub last_path_len: u64,
}

impl AlgorithmRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fold one run into the totals.
    pub fn record(&mut self, sample: RunSample) {
        self.runs += 1;
        self.sum_time_ms += sample.time_ms;
        self.sum_nodes += sample.nodes;
        self.sum_path_len += sample.path_len;
        self.sum_collected += u64::from(sample.collected);
        self.last_time_ms = sample.time_ms;
        self.last_nodes = sample.nodes;
        self.last_path_len = sample.path_len;
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            sum / f64::from(self.runs)
        }
    }

    pub fn avg_time_ms(&self) -> f64 {
        self.mean(self.sum_time_ms)
    }

    pub fn avg_nodes(&self) -> f64 {
        self.mean(self.sum_nodes as f64)
    }

    pub fn avg_path_len(&self) -> f64 {
        self.mean(self.sum_path_len as f64)
    }

    pub fn avg_collected(&self) -> f64 {
        self.mean(self.sum_collected as f64)
    }

    /// Weighted sum of the averages. Lower is better.
    pub fn efficiency_score(&self, weights: EfficiencyWeights) -> f64 {
        weights.time * self.avg_time_ms()
            + weights.nodes * self.avg_nodes()
            + weights.path * self.avg_path_len()
    }

    /// 1000-point score. Higher is better.
    ///
    /// Expansions cost up to 500 points, path length up to 300 and time up
    /// to 100; each collectible adds 50. Never negative.
    pub fn composite_score(&self) -> f64 {
        let mut score = 1000.0;
        score -= (self.avg_nodes() * 0.5).min(500.0);
        score -= (self.avg_path_len() * 2.0).min(300.0);
        score -= (self.avg_time_ms() / 1000.0 * 500.0).min(100.0);
        score += self.avg_collected() * 50.0;
        f64::max(score, 0.0)
    }
}
