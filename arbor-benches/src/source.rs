//! Seeded synthetic inputs for benchmarks.
//!
//! Distances are drawn uniformly from a TN93-like range so the spanning
//! tree has realistic weight spread. Case rows favour low-numbered
//! clusters so root selection sees an uneven count distribution.

use arbor_core::{CaseRecord, ClusterId, DistanceGraph, DistanceRow, GraphError};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Parameters controlling [`SyntheticInput::generate`].
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of clusters; every pair receives a distance.
    pub cluster_count: usize,
    /// Number of metadata rows to emit.
    pub case_count: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

/// Errors raised while generating synthetic inputs.
#[derive(Debug, Error)]
pub enum SyntheticError {
    /// The configuration asked for fewer than two clusters.
    #[error("synthetic graphs need at least two clusters, got {got}")]
    TooFewClusters {
        /// Requested cluster count.
        got: usize,
    },
    /// The generated rows were rejected by the graph builder.
    #[error("generated distance rows were rejected: {0}")]
    Graph(#[from] GraphError),
}

/// A complete distance graph plus metadata rows.
#[derive(Clone, Debug)]
pub struct SyntheticInput {
    graph: DistanceGraph,
    records: Vec<CaseRecord>,
}

impl SyntheticInput {
    /// Generates a complete graph over `cluster_count` clusters.
    ///
    /// # Errors
    /// Returns [`SyntheticError::TooFewClusters`] when fewer than two
    /// clusters are requested.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.cluster_count < 2 {
            return Err(SyntheticError::TooFewClusters {
                got: config.cluster_count,
            });
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let ids: Vec<ClusterId> = (0..config.cluster_count)
            .map(|index| ClusterId::new(format!("cluster{index}")))
            .collect();

        let mut rows = Vec::with_capacity(ids.len() * (ids.len() - 1) / 2);
        for (offset, left) in ids.iter().enumerate() {
            for right in ids.iter().skip(offset + 1) {
                let distance = f64::from(rng.gen_range(1_u32..=2_000)) / 100_000.0;
                rows.push(DistanceRow::new(left.clone(), right.clone(), distance));
            }
        }
        let graph = DistanceGraph::from_rows(rows)?;

        let records = (0..config.case_count)
            .map(|line| {
                // The smaller of two draws skews cases towards low-numbered clusters.
                let slot = rng
                    .gen_range(0..config.cluster_count)
                    .min(rng.gen_range(0..config.cluster_count));
                CaseRecord::new(line + 2, format!("cluster{slot}"))
            })
            .collect();

        Ok(Self { graph, records })
    }

    /// Distance graph over every generated cluster.
    #[must_use]
    pub const fn graph(&self) -> &DistanceGraph {
        &self.graph
    }

    /// Metadata rows in generation order.
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }
}
