//! Run rankings for maze search algorithms.
//!
//! - [`OrderStatTree`]: a height-balanced search tree with a comparator
//!   fixed at construction and bounded in-order top-K retrieval
//! - [`RankingService`]: running per-algorithm statistics, kept sorted under
//!   a switchable [`Criterion`] and exportable as CSV

mod record;
mod service;
mod tree;

pub use record::{AlgorithmRecord, EfficiencyWeights, RunSample};
pub use service::{CSV_HEADER, Criterion, RankingConfig, RankingKey, RankingService};
pub use tree::{Iter, OrderStatTree};
