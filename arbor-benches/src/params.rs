//! Benchmark parameter types.

use std::fmt;

/// Parameters for a spanning-tree or pipeline benchmark run.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Number of clusters in the synthetic graph.
    pub cluster_count: usize,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.cluster_count)
    }
}
