//! Aggregate figures describing a finished run.

use crate::id::ClusterId;

/// Size and case total of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentSummary {
    /// Position of the component in the output numbering, starting at 0.
    pub index: usize,
    /// Number of member clusters.
    pub nodes: usize,
    /// Number of surviving edges.
    pub edges: usize,
    /// Cases attributed to the member clusters.
    pub cases: usize,
}

/// Run-level statistics returned by [`crate::TransmissionForest::summary`].
///
/// `component_cases() + detached_cases == counted_cases` holds for every
/// run: cases on clusters left without edges after pruning are reported as
/// detached rather than dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Clusters in the distance graph.
    pub nodes: usize,
    /// Distance pairs that replaced an earlier weight for the same pair.
    pub overwritten_pairs: usize,
    /// Edges in the minimum spanning forest.
    pub mst_edges: usize,
    /// Total weight of the minimum spanning forest.
    pub mst_weight: f64,
    /// Trees in the spanning forest; 1 for a connected graph.
    pub trees: usize,
    /// Root cluster of each tree.
    pub roots: Vec<ClusterId>,
    /// Directed edges kept after pruning.
    pub surviving_edges: usize,
    /// Traversal edges dropped by the degree threshold.
    pub pruned_edges: usize,
    /// Metadata rows attributed to a known cluster.
    pub counted_cases: usize,
    /// Metadata rows naming clusters absent from the graph.
    pub skipped_rows: usize,
    /// Cases on clusters that belong to no component.
    pub detached_cases: usize,
    /// Per-component figures in output order.
    pub components: Vec<ComponentSummary>,
}

impl RunSummary {
    /// Sum of the case totals of every component.
    #[must_use]
    pub fn component_cases(&self) -> usize {
        self.components.iter().map(|component| component.cases).sum()
    }
}
