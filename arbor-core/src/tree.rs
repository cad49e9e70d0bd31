//! Adjacency view of a minimum spanning forest.
//!
//! Built once from the forest edges and queried read-only by traversal,
//! pruning and partitioning. Neighbour lists keep the order in which the
//! forest accepted its edges, which fixes the child order of every rooted
//! traversal.

use crate::{id::NodeIndex, mst::MinimumSpanningForest};

/// A neighbour entry: the adjacent node and the weight of the connecting edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbour {
    /// Adjacent node.
    pub node: NodeIndex,
    /// Weight of the undirected edge.
    pub weight: f64,
}

/// Undirected spanning tree (or forest) stored as adjacency lists.
///
/// # Examples
/// ```
/// use arbor_core::{DistanceGraph, DistanceRow, SpanningTree, kruskal};
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("A", "B", 1.0),
///     DistanceRow::new("B", "C", 2.0),
///     DistanceRow::new("A", "C", 5.0),
/// ])?;
/// let tree = SpanningTree::from_forest(&kruskal(&graph)?);
/// assert_eq!(tree.degree(1), 2);
/// assert_eq!(tree.weight(2, 1), Some(2.0));
/// assert_eq!(tree.weight(0, 2), None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanningTree {
    adjacency: Vec<Vec<Neighbour>>,
}

impl SpanningTree {
    /// Builds the adjacency lists of `forest`.
    #[must_use]
    pub fn from_forest(forest: &MinimumSpanningForest) -> Self {
        let mut adjacency = vec![Vec::new(); forest.node_count()];
        for edge in forest.edges() {
            let weight = edge.weight();
            if let Some(list) = adjacency.get_mut(edge.source()) {
                list.push(Neighbour {
                    node: edge.target(),
                    weight,
                });
            }
            if let Some(list) = adjacency.get_mut(edge.target()) {
                list.push(Neighbour {
                    node: edge.source(),
                    weight,
                });
            }
        }
        Self { adjacency }
    }

    /// Number of nodes, including isolated ones.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Neighbours of `node` in edge acceptance order. Unknown nodes have none.
    #[must_use]
    pub fn neighbours(&self, node: NodeIndex) -> &[Neighbour] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Undirected degree of `node`.
    #[must_use]
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.neighbours(node).len()
    }

    /// Weight of the edge between `left` and `right`, in either direction.
    #[must_use]
    pub fn weight(&self, left: NodeIndex, right: NodeIndex) -> Option<f64> {
        self.neighbours(left)
            .iter()
            .find(|neighbour| neighbour.node == right)
            .map(|neighbour| neighbour.weight)
    }

    /// Node sets of the individual trees, each in discovery order.
    ///
    /// Trees are listed by their smallest node index, so the first tree holds
    /// the first cluster of the distance table.
    #[must_use]
    pub fn trees(&self) -> Vec<Vec<NodeIndex>> {
        let mut seen = vec![false; self.node_count()];
        let mut trees = Vec::new();
        let mut stack = Vec::new();
        for start in 0..self.node_count() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            stack.push(start);
            let mut members = Vec::new();
            while let Some(node) = stack.pop() {
                members.push(node);
                for neighbour in self.neighbours(node) {
                    if !seen[neighbour.node] {
                        seen[neighbour.node] = true;
                        stack.push(neighbour.node);
                    }
                }
            }
            trees.push(members);
        }
        trees
    }
}
