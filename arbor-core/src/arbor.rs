//! Transmission-tree orchestration.
//!
//! Provides the [`Arbor`] entry point, which chains the spanning forest,
//! root selection, traversal, pruning and component partitioning.

use tracing::{Span, debug, field, info, instrument};

#[cfg(feature = "cpu")]
use rayon::prelude::*;

use crate::{
    Result,
    builder::DisconnectedPolicy,
    cases::{CaseCounts, CaseRecord, UnknownReferencePolicy},
    components::weakly_connected_components,
    error::ArborError,
    graph::DistanceGraph,
    id::NodeIndex,
    mst::kruskal,
    prune::{DegreeThreshold, PrunedForest, prune},
    render::RenderScale,
    result::TransmissionForest,
    traversal::{Visit, rooted_traversal},
    tree::SpanningTree,
};

/// Entry point for building pruned transmission trees.
///
/// # Examples
/// ```
/// use arbor_core::{ArborBuilder, CaseRecord, DistanceGraph, DistanceRow};
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("A", "B", 0.010),
///     DistanceRow::new("B", "C", 0.012),
///     DistanceRow::new("A", "C", 0.030),
/// ])?;
/// let records = [CaseRecord::new(2, "B"), CaseRecord::new(3, "B"), CaseRecord::new(4, "A")];
///
/// let arbor = ArborBuilder::new().build()?;
/// let result = arbor.run(&graph, records)?;
/// assert_eq!(result.roots(), [1]);
/// assert_eq!(result.pruned_forest().edges().len(), 2);
/// assert_eq!(result.components().len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Arbor {
    degree_threshold: DegreeThreshold,
    render_scale: RenderScale,
    disconnected_policy: DisconnectedPolicy,
    unknown_reference_policy: UnknownReferencePolicy,
}

/// Traversal and pruning outcome for one tree of the spanning forest.
struct Grown {
    root: NodeIndex,
    visits: Vec<Visit>,
    forest: PrunedForest,
}

impl Arbor {
    pub(crate) fn new(
        degree_threshold: DegreeThreshold,
        render_scale: RenderScale,
        disconnected_policy: DisconnectedPolicy,
        unknown_reference_policy: UnknownReferencePolicy,
    ) -> Self {
        Self {
            degree_threshold,
            render_scale,
            disconnected_policy,
            unknown_reference_policy,
        }
    }

    /// Returns the degree threshold applied while pruning.
    #[must_use]
    pub fn degree_threshold(&self) -> DegreeThreshold {
        self.degree_threshold
    }

    /// Returns the scales used when rendering the result.
    #[must_use]
    pub fn render_scale(&self) -> RenderScale {
        self.render_scale
    }

    /// Returns the disconnected-graph policy.
    #[must_use]
    pub fn disconnected_policy(&self) -> DisconnectedPolicy {
        self.disconnected_policy
    }

    /// Returns the unknown-reference policy used when counting cases.
    #[must_use]
    pub fn unknown_reference_policy(&self) -> UnknownReferencePolicy {
        self.unknown_reference_policy
    }

    /// Runs the pipeline over `graph` with case `records`.
    ///
    /// # Errors
    /// Returns [`ArborError::EmptyInput`] when `graph` has no nodes,
    /// [`ArborError::DisconnectedGraph`] when the graph is disconnected and
    /// the policy is [`DisconnectedPolicy::Reject`], and
    /// [`ArborError::UnknownClusterReference`] when a record names an unknown
    /// cluster under [`UnknownReferencePolicy::Reject`].
    #[instrument(
        name = "arbor.run",
        err,
        skip(self, graph, records),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            threshold = ?self.degree_threshold,
            trees = field::Empty,
            pruned = field::Empty,
            components = field::Empty,
        ),
    )]
    pub fn run(
        &self,
        graph: &DistanceGraph,
        records: impl IntoIterator<Item = CaseRecord>,
    ) -> Result<TransmissionForest> {
        if graph.is_empty() {
            return Err(ArborError::EmptyInput);
        }

        let spanning = kruskal(graph)?;
        if spanning.component_count() > 1 && self.disconnected_policy == DisconnectedPolicy::Reject
        {
            return Err(ArborError::DisconnectedGraph {
                components: spanning.component_count(),
            });
        }

        let counts = CaseCounts::tally(graph, records, self.unknown_reference_policy)?;
        let tree = SpanningTree::from_forest(&spanning);
        let trees = tree.trees();
        Span::current().record("trees", trees.len());

        #[cfg(feature = "cpu")]
        let grown: Vec<Option<Grown>> = trees
            .par_iter()
            .map(|members| self.grow(graph, &tree, &counts, members))
            .collect();
        #[cfg(not(feature = "cpu"))]
        let grown: Vec<Option<Grown>> = trees
            .iter()
            .map(|members| self.grow(graph, &tree, &counts, members))
            .collect();

        let mut roots = Vec::with_capacity(grown.len());
        let mut visits = Vec::with_capacity(graph.node_count());
        let mut forest = PrunedForest::default();
        for outcome in grown.into_iter().flatten() {
            roots.push(outcome.root);
            visits.extend(outcome.visits);
            forest.append(outcome.forest);
        }

        let components = weakly_connected_components(&forest, graph.node_count());
        let span = Span::current();
        span.record("pruned", forest.pruned());
        span.record("components", components.len());
        #[cfg(feature = "metrics")]
        metrics::counter!("arbor_edges_pruned_total").increment(forest.pruned() as u64);
        info!(
            roots = roots.len(),
            surviving = forest.edges().len(),
            pruned = forest.pruned(),
            components = components.len(),
            "transmission forest built"
        );

        Ok(TransmissionForest::new(
            spanning,
            tree,
            counts,
            roots,
            visits,
            forest,
            components,
            self.render_scale,
        ))
    }

    #[instrument(
        name = "arbor.traverse",
        level = "debug",
        skip(self, graph, tree, counts, members),
        fields(size = members.len(), root = field::Empty, pruned = field::Empty),
    )]
    fn grow(
        &self,
        graph: &DistanceGraph,
        tree: &SpanningTree,
        counts: &CaseCounts,
        members: &[NodeIndex],
    ) -> Option<Grown> {
        let root = counts.root_among(graph, members)?;
        let span = Span::current();
        if let Some(id) = graph.node(root) {
            span.record("root", field::display(id));
        }
        let visits = rooted_traversal(tree, root);
        let forest = prune(tree, &visits, self.degree_threshold);
        span.record("pruned", forest.pruned());
        debug!(visited = visits.len(), kept = forest.edges().len(), "tree traversed");
        Some(Grown {
            root,
            visits,
            forest,
        })
    }
}
