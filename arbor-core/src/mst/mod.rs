//! Minimum spanning tree (MST) construction.
//!
//! Kruskal's algorithm over the distance graph. Candidate edges are sorted by
//! `(weight, source, target)` so the accepted edge set is reproducible for a
//! given input order; with the `cpu` feature the sort runs on Rayon's pool.
//! Disconnected inputs yield a minimum spanning forest whose
//! [`MinimumSpanningForest::component_count`] reports the number of trees.

use std::cmp::Ordering;

#[cfg(feature = "cpu")]
use rayon::prelude::*;
use tracing::{Span, field, instrument};

use crate::{
    graph::{DistanceGraph, GraphEdge},
    id::NodeIndex,
    union_find::DisjointSet,
};

/// Errors returned while computing a minimum spanning tree/forest.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum MstError {
    /// The caller requested an MST for an empty graph.
    #[error("cannot compute an MST for an empty graph")]
    EmptyGraph,
}

impl MstError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> MstErrorCode {
        match self {
            Self::EmptyGraph => MstErrorCode::EmptyGraph,
        }
    }
}

/// Machine-readable error codes for [`MstError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MstErrorCode {
    /// The caller requested an MST for an empty graph.
    EmptyGraph,
}

impl MstErrorCode {
    /// Returns the symbolic identifier for logging and metrics surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyGraph => "EMPTY_GRAPH",
        }
    }
}

/// A single MST edge in canonical undirected form (`source <= target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MstEdge {
    source: NodeIndex,
    target: NodeIndex,
    weight: f64,
}

impl MstEdge {
    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> NodeIndex { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> NodeIndex { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

impl From<&GraphEdge> for MstEdge {
    fn from(edge: &GraphEdge) -> Self {
        Self {
            source: edge.source,
            target: edge.target,
            weight: edge.weight,
        }
    }
}

impl Eq for MstEdge {}

impl Ord for MstEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for MstEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected, the forest is a minimum spanning tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimumSpanningForest {
    edges: Vec<MstEdge>,
    node_count: usize,
    component_count: usize,
}

impl MinimumSpanningForest {
    /// Returns the MST/forest edges in acceptance order (ascending weight).
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[MstEdge] { &self.edges }

    /// Returns the number of nodes the forest spans.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of connected components in the resulting forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(MstEdge::weight).sum()
    }
}

/// Computes a minimum spanning forest of `graph` using Kruskal's algorithm.
///
/// # Errors
///
/// Returns [`MstError::EmptyGraph`] when the graph has no nodes.
///
/// # Examples
/// ```
/// use arbor_core::{DistanceGraph, DistanceRow, kruskal};
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("A", "B", 1.0),
///     DistanceRow::new("B", "C", 2.0),
///     DistanceRow::new("A", "C", 5.0),
/// ])?;
/// let forest = kruskal(&graph)?;
/// assert!(forest.is_tree());
/// assert_eq!(forest.edges().len(), 2);
/// assert_eq!(forest.total_weight(), 3.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "arbor.mst",
    err,
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count(), components = field::Empty),
)]
pub fn kruskal(graph: &DistanceGraph) -> Result<MinimumSpanningForest, MstError> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }

    // The graph hands over validated edges in canonical order, one per pair.
    let mut edge_list: Vec<MstEdge> = graph.edges().iter().map(MstEdge::from).collect();
    #[cfg(feature = "cpu")]
    edge_list.par_sort_unstable();
    #[cfg(not(feature = "cpu"))]
    edge_list.sort_unstable();

    let mut union_find = DisjointSet::new(node_count);
    let mut forest_edges = Vec::with_capacity(node_count.saturating_sub(1));
    for edge in edge_list {
        if union_find.union(edge.source, edge.target) {
            forest_edges.push(edge);
            if union_find.components() == 1 {
                break;
            }
        }
    }

    let forest = MinimumSpanningForest {
        edges: forest_edges,
        node_count,
        component_count: union_find.components(),
    };
    Span::current().record("components", forest.component_count());
    Ok(forest)
}

#[cfg(test)]
mod property;
