//! Undirected weighted graph built from a pairwise distance table.
//!
//! Nodes receive a dense [`NodeIndex`] in first-appearance order, so every
//! later stage can address them with plain vectors. Pairs are stored in
//! canonical `(min, max)` form; a repeated pair keeps the last distance seen.

use std::collections::HashMap;

use tracing::{Span, debug, field, instrument};

use crate::{
    error::GraphError,
    id::{ClusterId, NodeIndex},
};

/// One parsed row of the distance table.
///
/// # Examples
/// ```
/// use arbor_core::DistanceRow;
///
/// let row = DistanceRow::new("a", "b", 0.25);
/// assert_eq!(row.left.as_str(), "a");
/// assert_eq!(row.distance, 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceRow {
    /// First cluster of the pair.
    pub left: ClusterId,
    /// Second cluster of the pair.
    pub right: ClusterId,
    /// Genetic distance between the two clusters.
    pub distance: f64,
}

impl DistanceRow {
    /// Creates a row from its three fields.
    #[must_use]
    pub fn new(left: impl Into<ClusterId>, right: impl Into<ClusterId>, distance: f64) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            distance,
        }
    }
}

/// An undirected edge in canonical form (`source <= target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    /// Smaller endpoint index.
    pub source: NodeIndex,
    /// Larger endpoint index.
    pub target: NodeIndex,
    /// Edge weight.
    pub weight: f64,
}

/// Complete (or near-complete) graph of pairwise cluster distances.
///
/// Built once from the distance table and read-only afterwards.
///
/// # Examples
/// ```
/// use arbor_core::{DistanceGraph, DistanceRow};
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("A", "B", 1.0),
///     DistanceRow::new("B", "C", 2.0),
///     DistanceRow::new("A", "C", 5.0),
/// ])
/// .expect("distances are valid");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.distance("C", "B"), Some(2.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DistanceGraph {
    nodes: Vec<ClusterId>,
    index: HashMap<ClusterId, NodeIndex>,
    edges: Vec<GraphEdge>,
    positions: HashMap<(NodeIndex, NodeIndex), usize>,
    overwritten: usize,
}

impl DistanceGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from distance rows in input order.
    ///
    /// # Errors
    /// Returns [`GraphError`] when a distance is negative or non-finite.
    #[instrument(
        name = "arbor.graph",
        err,
        skip(rows),
        fields(nodes = field::Empty, edges = field::Empty),
    )]
    pub fn from_rows(rows: impl IntoIterator<Item = DistanceRow>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for row in rows {
            graph.add_edge(row.left, row.right, row.distance)?;
        }
        let span = Span::current();
        span.record("nodes", graph.node_count());
        span.record("edges", graph.edge_count());
        Ok(graph)
    }

    /// Inserts `id` if it is not already present and returns its index.
    pub fn add_node(&mut self, id: ClusterId) -> NodeIndex {
        if let Some(&existing) = self.index.get(&id) {
            return existing;
        }
        let next = self.nodes.len();
        self.nodes.push(id.clone());
        self.index.insert(id, next);
        next
    }

    /// Records the distance between `left` and `right`, inserting both nodes.
    ///
    /// A pair seen before has its weight replaced. A pair whose endpoints are
    /// identical only inserts the node.
    ///
    /// # Errors
    /// Returns [`GraphError::NonFiniteDistance`] or
    /// [`GraphError::NegativeDistance`] for invalid weights. Nothing is
    /// inserted in that case.
    pub fn add_edge(
        &mut self,
        left: ClusterId,
        right: ClusterId,
        distance: f64,
    ) -> Result<(), GraphError> {
        if !distance.is_finite() {
            return Err(GraphError::NonFiniteDistance {
                left,
                right,
                distance,
            });
        }
        if distance < 0.0 {
            return Err(GraphError::NegativeDistance {
                left,
                right,
                distance,
            });
        }

        let a = self.add_node(left);
        let b = self.add_node(right);
        if a == b {
            return Ok(());
        }
        let (source, target) = (a.min(b), a.max(b));
        match self.positions.get(&(source, target)) {
            Some(&position) => {
                if let Some(edge) = self.edges.get_mut(position) {
                    debug!(
                        source,
                        target,
                        previous = edge.weight,
                        distance,
                        "distance pair repeated; keeping the latest value"
                    );
                    edge.weight = distance;
                }
                self.overwritten = self.overwritten.saturating_add(1);
            }
            None => {
                self.positions.insert((source, target), self.edges.len());
                self.edges.push(GraphEdge {
                    source,
                    target,
                    weight: distance,
                });
            }
        }
        Ok(())
    }

    /// Number of clusters in the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Number of distinct undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Number of rows that replaced the weight of an existing pair.
    #[must_use]
    #[rustfmt::skip]
    pub fn overwritten_edges(&self) -> usize { self.overwritten }

    /// Returns `true` when no cluster has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cluster identifiers indexed by [`NodeIndex`].
    #[must_use]
    pub fn nodes(&self) -> &[ClusterId] {
        &self.nodes
    }

    /// Returns the identifier stored at `index`.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&ClusterId> {
        self.nodes.get(index)
    }

    /// Looks up the index of the cluster named `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Returns `true` when the cluster named `id` is a node of the graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Symmetric distance lookup by identifier.
    #[must_use]
    pub fn distance(&self, left: &str, right: &str) -> Option<f64> {
        let a = self.index_of(left)?;
        let b = self.index_of(right)?;
        let position = self.positions.get(&(a.min(b), a.max(b)))?;
        self.edges.get(*position).map(|edge| edge.weight)
    }

    /// Edges in the order their pair was first recorded.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
}
