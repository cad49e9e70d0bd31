//! Per-cluster case counts.
//!
//! Counts metadata records against the graph's node set. The counts choose
//! the root of each tree and size the rendered nodes; nothing else reads
//! them.

use tracing::{instrument, warn};

use crate::{
    error::{ArborError, Result},
    graph::DistanceGraph,
    id::{ClusterId, NodeIndex},
};

/// One metadata row reduced to the cluster it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRecord {
    /// 1-based line number in the metadata table.
    pub line: usize,
    /// Cluster extracted from the row label.
    pub cluster: ClusterId,
}

impl CaseRecord {
    /// Creates a record for `cluster` read from `line`.
    #[must_use]
    pub fn new(line: usize, cluster: impl Into<ClusterId>) -> Self {
        Self {
            line,
            cluster: cluster.into(),
        }
    }
}

/// How to treat metadata rows whose cluster is absent from the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownReferencePolicy {
    /// Skip the row and report it in [`CaseCounts::skipped`].
    #[default]
    Skip,
    /// Fail with [`ArborError::UnknownClusterReference`].
    Reject,
}

/// Case counts indexed by [`NodeIndex`].
///
/// # Examples
/// ```
/// use arbor_core::{CaseCounts, CaseRecord, DistanceGraph, DistanceRow, UnknownReferencePolicy};
///
/// let graph = DistanceGraph::from_rows([DistanceRow::new("A", "B", 1.0)])?;
/// let counts = CaseCounts::tally(
///     &graph,
///     [CaseRecord::new(2, "A"), CaseRecord::new(3, "A"), CaseRecord::new(4, "Z")],
///     UnknownReferencePolicy::Skip,
/// )?;
/// assert_eq!(counts.count(0), 2);
/// assert_eq!(counts.count(1), 0);
/// assert_eq!(counts.skipped(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseCounts {
    counts: Vec<usize>,
    total: usize,
    skipped: usize,
}

impl CaseCounts {
    /// Counts `records` against the nodes of `graph`.
    ///
    /// # Errors
    /// Returns [`ArborError::UnknownClusterReference`] for the first record
    /// naming a cluster outside the graph when `policy` is
    /// [`UnknownReferencePolicy::Reject`].
    #[instrument(name = "arbor.cases", err, skip(graph, records))]
    pub fn tally(
        graph: &DistanceGraph,
        records: impl IntoIterator<Item = CaseRecord>,
        policy: UnknownReferencePolicy,
    ) -> Result<Self> {
        let mut tally = Self {
            counts: vec![0; graph.node_count()],
            total: 0,
            skipped: 0,
        };
        for record in records {
            match graph.index_of(record.cluster.as_str()) {
                Some(node) => tally.increment(node),
                None => match policy {
                    UnknownReferencePolicy::Skip => tally.skipped += 1,
                    UnknownReferencePolicy::Reject => {
                        return Err(ArborError::UnknownClusterReference {
                            cluster: record.cluster,
                            line: record.line,
                        });
                    }
                },
            }
        }

        if tally.skipped > 0 {
            warn!(
                skipped = tally.skipped,
                "metadata rows reference clusters absent from the distance table"
            );
            #[cfg(feature = "metrics")]
            metrics::counter!("arbor_unknown_cluster_references_total")
                .increment(tally.skipped as u64);
        }
        Ok(tally)
    }

    fn increment(&mut self, node: NodeIndex) {
        if let Some(slot) = self.counts.get_mut(node) {
            *slot += 1;
            self.total += 1;
        }
    }

    /// Cases attributed to `node`; zero for clusters without metadata rows.
    #[must_use]
    pub fn count(&self, node: NodeIndex) -> usize {
        self.counts.get(node).copied().unwrap_or(0)
    }

    /// Total number of counted records.
    #[must_use]
    #[rustfmt::skip]
    pub fn total(&self) -> usize { self.total }

    /// Number of records skipped because their cluster is not in the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn skipped(&self) -> usize { self.skipped }

    /// Nodes with at least one case, in node order, with their counts.
    pub fn counted(&self) -> impl Iterator<Item = (NodeIndex, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(node, count)| (node, *count))
    }

    /// Chooses the root among `candidates`: the most cases, ties going to
    /// the greatest cluster identifier.
    ///
    /// Returns `None` when `candidates` is empty.
    #[must_use]
    pub fn root_among(&self, graph: &DistanceGraph, candidates: &[NodeIndex]) -> Option<NodeIndex> {
        candidates
            .iter()
            .copied()
            .max_by(|&left, &right| {
                self.count(left)
                    .cmp(&self.count(right))
                    .then_with(|| graph.node(left).cmp(&graph.node(right)))
            })
    }
}
