//! Leaderboard of algorithm records, indexed by the active criterion.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::record::{AlgorithmRecord, EfficiencyWeights, RunSample};
use crate::tree::OrderStatTree;

/// Header row of the tabular export.
pub const CSV_HEADER: &str = "name,runs,avgTimeMs,avgNodes,avgPathLen,efficiencyScore";

/// What the leaderboard is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// Average time, then efficiency, then average expansions.
    AvgTime,
    /// Average expansions, then efficiency, then average time.
    AvgNodes,
    /// Efficiency score, then average time, then average expansions.
    #[default]
    Efficiency,
    /// Composite score, highest first; then efficiency, then expansions.
    Score,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::AvgTime,
        Criterion::AvgNodes,
        Criterion::Efficiency,
        Criterion::Score,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Criterion::AvgTime => "average time",
            Criterion::AvgNodes => "average expansions",
            Criterion::Efficiency => "efficiency",
            Criterion::Score => "score",
        }
    }

    /// Derive the sort key of `record` under this criterion.
    pub fn key(self, record: &AlgorithmRecord, weights: EfficiencyWeights) -> RankingKey {
        let efficiency = record.efficiency_score(weights);
        let (primary, tie1, tie2) = match self {
            Criterion::AvgTime => (record.avg_time_ms(), efficiency, record.avg_nodes()),
            Criterion::AvgNodes => (record.avg_nodes(), efficiency, record.avg_time_ms()),
            Criterion::Efficiency => (efficiency, record.avg_time_ms(), record.avg_nodes()),
            Criterion::Score => (record.composite_score(), efficiency, record.avg_nodes()),
        };
        RankingKey {
            primary,
            tie1,
            tie2,
            name: record.name.clone(),
        }
    }

    fn index(self) -> OrderStatTree<RankingKey, AlgorithmRecord> {
        match self {
            Criterion::Score => OrderStatTree::with_comparator(RankingKey::cmp_primary_descending),
            _ => OrderStatTree::new(),
        }
    }
}

/// Composite sort key, compared field by field.
#[derive(Debug, Clone)]
pub struct RankingKey {
    pub primary: f64,
    pub tie1: f64,
    pub tie2: f64,
    pub name: String,
}

impl RankingKey {
    fn cmp_ties(&self, other: &Self) -> Ordering {
        self.tie1
            .total_cmp(&other.tie1)
            .then_with(|| self.tie2.total_cmp(&other.tie2))
            .then_with(|| self.name.cmp(&other.name))
    }

    /// Highest primary first; ties still ascend.
    fn cmp_primary_descending(a: &Self, b: &Self) -> Ordering {
        b.primary
            .total_cmp(&a.primary)
            .then_with(|| a.cmp_ties(b))
    }
}

impl PartialEq for RankingKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankingKey {}

impl PartialOrd for RankingKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankingKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.cmp_ties(other))
    }
}

/// Leaderboard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingConfig {
    pub criterion: Criterion,
    pub weights: EfficiencyWeights,
}

/// One record per algorithm name, kept ranked under the active criterion.
pub struct RankingService {
    config: RankingConfig,
    records: HashMap<String, AlgorithmRecord>,
    keys: HashMap<String, RankingKey>,
    index: OrderStatTree<RankingKey, AlgorithmRecord>,
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl RankingService {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            config,
            records: HashMap::new(),
            keys: HashMap::new(),
            index: config.criterion.index(),
        }
    }

    pub fn config(&self) -> RankingConfig {
        self.config
    }

    pub fn criterion(&self) -> Criterion {
        self.config.criterion
    }

    /// Record a single-goal run.
    pub fn record_run(&mut self, name: &str, time_ms: f64, nodes: u64, path_len: u64) {
        self.record_sample(
            name,
            RunSample {
                time_ms,
                nodes,
                path_len,
                collected: 0,
            },
        );
    }

    /// Fold `sample` into the record for `name` and re-index it.
    pub fn record_sample(&mut self, name: &str, sample: RunSample) {
        let record = self
            .records
            .entry(name.to_owned())
            .or_insert_with(|| AlgorithmRecord::new(name));
        record.record(sample);
        let record = record.clone();

        let key = self.config.criterion.key(&record, self.config.weights);
        // New averages usually mean a new key; drop the old node first so
        // the name appears once.
        if let Some(old) = self.keys.insert(name.to_owned(), key.clone()) {
            if old != key {
                self.index.remove(&old);
            }
        }
        self.index.upsert(key, record);
    }

    /// Switch criterion and rebuild the index from scratch.
    pub fn set_criterion(&mut self, criterion: Criterion) {
        self.config.criterion = criterion;
        self.reindex();
    }

    /// Change the efficiency weights; keys depend on them, so re-index.
    pub fn set_weights(&mut self, weights: EfficiencyWeights) {
        self.config.weights = weights;
        self.reindex();
    }

    fn reindex(&mut self) {
        let RankingConfig { criterion, weights } = self.config;
        self.index = criterion.index();
        self.index
            .rebuild(self.records.values().cloned(), |r| criterion.key(r, weights));
        self.keys = self
            .index
            .iter()
            .map(|(k, r)| (r.name.clone(), k.clone()))
            .collect();
        debug!(
            "ranking rebuilt by {} over {} algorithms",
            criterion.name(),
            self.index.len()
        );
    }

    /// The best `k` records.
    pub fn top_k(&self, k: usize) -> Vec<AlgorithmRecord> {
        self.index.top_k(k).into_iter().cloned().collect()
    }

    /// Every record, best first.
    pub fn all(&self) -> Vec<AlgorithmRecord> {
        self.top_k(self.index.len())
    }

    /// Records paired with their 1-based rank.
    pub fn ranked(&self) -> Vec<(usize, AlgorithmRecord)> {
        self.all()
            .into_iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&AlgorithmRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tabular export, best first, header row included.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{CSV_HEADER}");
        for (_, r) in self.index.iter() {
            let _ = writeln!(
                out,
                "{},{},{:.3},{:.2},{:.2},{:.3}",
                csv_field(&r.name),
                r.runs,
                r.avg_time_ms(),
                r.avg_nodes(),
                r.avg_path_len(),
                r.efficiency_score(self.config.weights),
            );
        }
        out
    }

    /// Write the tabular export to `writer`.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.to_csv().as_bytes())?;
        writer.flush()
    }

    /// Write the tabular export to a file, replacing it.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        self.write_csv(BufWriter::new(File::create(path)?))?;
        debug!("exported {} rankings to {}", self.len(), path.display());
        Ok(())
    }
}

/// Quote a field that would otherwise break the row.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = RankingConfig {
            criterion: Criterion::Score,
            weights: EfficiencyWeights::default(),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RankingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
