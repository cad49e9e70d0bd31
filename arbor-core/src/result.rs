//! Output of an [`crate::Arbor::run`] invocation.

use std::io::{self, Write};

use crate::{
    cases::CaseCounts,
    components::Component,
    graph::DistanceGraph,
    id::{ClusterId, NodeIndex},
    mst::MinimumSpanningForest,
    prune::PrunedForest,
    render::{RenderScale, write_dot},
    summary::{ComponentSummary, RunSummary},
    traversal::Visit,
    tree::SpanningTree,
};

/// Everything derived from one distance graph and its case counts.
///
/// Node indices refer to the [`DistanceGraph`] the run was given; pass the
/// same graph back when rendering or summarising.
#[derive(Debug, Clone)]
pub struct TransmissionForest {
    spanning: MinimumSpanningForest,
    tree: SpanningTree,
    counts: CaseCounts,
    roots: Vec<NodeIndex>,
    visits: Vec<Visit>,
    forest: PrunedForest,
    components: Vec<Component>,
    scale: RenderScale,
}

impl TransmissionForest {
    #[expect(clippy::too_many_arguments, reason = "assembled once by the pipeline")]
    pub(crate) fn new(
        spanning: MinimumSpanningForest,
        tree: SpanningTree,
        counts: CaseCounts,
        roots: Vec<NodeIndex>,
        visits: Vec<Visit>,
        forest: PrunedForest,
        components: Vec<Component>,
        scale: RenderScale,
    ) -> Self {
        Self {
            spanning,
            tree,
            counts,
            roots,
            visits,
            forest,
            components,
            scale,
        }
    }

    /// Minimum spanning forest of the distance graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn spanning_forest(&self) -> &MinimumSpanningForest { &self.spanning }

    /// Adjacency view of the spanning forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn spanning_tree(&self) -> &SpanningTree { &self.tree }

    /// Case counts per node.
    #[must_use]
    #[rustfmt::skip]
    pub fn counts(&self) -> &CaseCounts { &self.counts }

    /// Root of every tree, in the order of the trees' first node.
    #[must_use]
    #[rustfmt::skip]
    pub fn roots(&self) -> &[NodeIndex] { &self.roots }

    /// Traversal visits of every tree, concatenated in root order.
    #[must_use]
    #[rustfmt::skip]
    pub fn visits(&self) -> &[Visit] { &self.visits }

    /// Directed forest that survived pruning.
    #[must_use]
    #[rustfmt::skip]
    pub fn pruned_forest(&self) -> &PrunedForest { &self.forest }

    /// Weakly connected components of the pruned forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn components(&self) -> &[Component] { &self.components }

    /// Scales used by [`Self::write_dot`].
    #[must_use]
    #[rustfmt::skip]
    pub fn render_scale(&self) -> RenderScale { self.scale }

    /// Writes the Graphviz rendering of the pruned forest.
    ///
    /// # Errors
    /// Returns [`io::Error`] when writing fails or when `graph` is not the
    /// graph this result was computed from.
    pub fn write_dot(&self, writer: impl Write, graph: &DistanceGraph) -> io::Result<()> {
        write_dot(writer, graph, &self.counts, &self.forest, &self.scale)
    }

    /// Summarises the run for reporting.
    #[must_use]
    pub fn summary(&self, graph: &DistanceGraph) -> RunSummary {
        let mut in_forest = vec![false; graph.node_count()];
        for node in self.forest.nodes() {
            if let Some(flag) = in_forest.get_mut(node) {
                *flag = true;
            }
        }
        let detached_cases = self
            .counts
            .counted()
            .filter(|(node, _)| !in_forest.get(*node).copied().unwrap_or(false))
            .map(|(_, cases)| cases)
            .sum();

        RunSummary {
            nodes: graph.node_count(),
            overwritten_pairs: graph.overwritten_edges(),
            mst_edges: self.spanning.edges().len(),
            mst_weight: self.spanning.total_weight(),
            trees: self.roots.len(),
            roots: self
                .roots
                .iter()
                .filter_map(|&root| graph.node(root).cloned())
                .collect::<Vec<ClusterId>>(),
            surviving_edges: self.forest.edges().len(),
            pruned_edges: self.forest.pruned(),
            counted_cases: self.counts.total(),
            skipped_rows: self.counts.skipped(),
            detached_cases,
            components: self
                .components
                .iter()
                .enumerate()
                .map(|(index, component)| ComponentSummary {
                    index,
                    nodes: component.nodes().len(),
                    edges: component.edges().len(),
                    cases: component.case_total(&self.counts),
                })
                .collect(),
        }
    }
}
