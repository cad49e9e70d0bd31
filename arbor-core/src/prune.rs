//! Degree-based pruning of a rooted traversal.
//!
//! Every `(child, parent)` visit becomes a directed edge `parent -> child`
//! unless the child's undirected degree in the spanning tree exceeds the
//! threshold. Dropping the incoming edge of a hub detaches it together with
//! its subtree, so the result is a forest.

use crate::{id::NodeIndex, traversal::Visit, tree::SpanningTree};

/// Maximum undirected degree a child may have and keep its incoming edge.
///
/// # Examples
/// ```
/// use arbor_core::DegreeThreshold;
///
/// assert!(DegreeThreshold::default().admits(15));
/// assert!(!DegreeThreshold::default().admits(16));
/// assert!(DegreeThreshold::Unbounded.admits(usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegreeThreshold {
    /// Prune children whose degree is strictly greater than the value.
    Max(usize),
    /// Never prune.
    Unbounded,
}

impl DegreeThreshold {
    /// Threshold used by the reference transmission-tree configuration.
    pub const DEFAULT_MAX_DEGREE: usize = 15;

    /// Returns `true` when a child of `degree` keeps its incoming edge.
    #[must_use]
    pub const fn admits(self, degree: usize) -> bool {
        match self {
            Self::Max(max) => degree <= max,
            Self::Unbounded => true,
        }
    }
}

impl Default for DegreeThreshold {
    fn default() -> Self {
        Self::Max(Self::DEFAULT_MAX_DEGREE)
    }
}

/// A surviving `parent -> child` edge with its undirected spanning-tree weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectedEdge {
    /// Node the traversal came from.
    pub parent: NodeIndex,
    /// Node reached through the edge.
    pub child: NodeIndex,
    /// Unscaled distance between the two clusters.
    pub distance: f64,
}

/// Directed forest left after pruning.
///
/// Its node set is exactly the set of endpoints of its edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrunedForest {
    edges: Vec<DirectedEdge>,
    pruned: usize,
}

impl PrunedForest {
    /// Surviving edges in traversal order.
    #[must_use]
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    /// Number of traversal edges dropped by the threshold.
    #[must_use]
    #[rustfmt::skip]
    pub fn pruned(&self) -> usize { self.pruned }

    /// Nodes of the forest in order of first appearance.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut seen = std::collections::HashSet::new();
        let mut nodes = Vec::new();
        for edge in &self.edges {
            for node in [edge.parent, edge.child] {
                if seen.insert(node) {
                    nodes.push(node);
                }
            }
        }
        nodes
    }

    /// Appends the edges of `other` after the edges of `self`.
    pub fn append(&mut self, mut other: Self) {
        self.edges.append(&mut other.edges);
        self.pruned += other.pruned;
    }
}

impl FromIterator<DirectedEdge> for PrunedForest {
    fn from_iter<I: IntoIterator<Item = DirectedEdge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
            pruned: 0,
        }
    }
}

/// Applies the degree threshold to a traversal of `tree`.
///
/// # Examples
/// ```
/// use arbor_core::{
///     DegreeThreshold, DistanceGraph, DistanceRow, SpanningTree, kruskal, prune,
///     rooted_traversal,
/// };
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("root", "hub", 0.1),
///     DistanceRow::new("hub", "a", 0.2),
///     DistanceRow::new("hub", "b", 0.3),
/// ])?;
/// let tree = SpanningTree::from_forest(&kruskal(&graph)?);
/// let visits = rooted_traversal(&tree, 0);
///
/// let kept = prune(&tree, &visits, DegreeThreshold::Max(3));
/// assert_eq!(kept.edges().len(), 3);
///
/// let cut = prune(&tree, &visits, DegreeThreshold::Max(2));
/// assert_eq!(cut.edges().len(), 2);
/// assert_eq!(cut.pruned(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn prune(tree: &SpanningTree, visits: &[Visit], threshold: DegreeThreshold) -> PrunedForest {
    let mut forest = PrunedForest::default();
    for visit in visits {
        let Some(parent) = visit.parent else {
            continue;
        };
        if !threshold.admits(tree.degree(visit.node)) {
            forest.pruned += 1;
            continue;
        }
        let Some(distance) = tree.weight(parent, visit.node) else {
            continue;
        };
        forest.edges.push(DirectedEdge {
            parent,
            child: visit.node,
            distance,
        });
    }
    forest
}
