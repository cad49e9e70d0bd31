//! Rooted depth-first traversal of a spanning tree.
//!
//! An explicit stack replaces recursion, so skewed trees of any depth are
//! safe to walk. Children are pushed in reverse neighbour order, which makes
//! the visit sequence identical to a recursive pre-order walk.

use crate::{id::NodeIndex, tree::SpanningTree};

/// A visited node and the node it was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    /// Visited node.
    pub node: NodeIndex,
    /// Node the traversal came from; `None` for the root.
    pub parent: Option<NodeIndex>,
}

/// Walks the tree containing `root` depth-first and returns every visit in
/// pre-order.
///
/// Each node reachable from `root` appears exactly once. A `root` outside the
/// tree produces no visits.
///
/// # Examples
/// ```
/// use arbor_core::{DistanceGraph, DistanceRow, SpanningTree, Visit, kruskal, rooted_traversal};
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("A", "B", 1.0),
///     DistanceRow::new("B", "C", 2.0),
///     DistanceRow::new("A", "C", 5.0),
/// ])?;
/// let tree = SpanningTree::from_forest(&kruskal(&graph)?);
/// let visits = rooted_traversal(&tree, 0);
/// assert_eq!(visits, [
///     Visit { node: 0, parent: None },
///     Visit { node: 1, parent: Some(0) },
///     Visit { node: 2, parent: Some(1) },
/// ]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn rooted_traversal(tree: &SpanningTree, root: NodeIndex) -> Vec<Visit> {
    if root >= tree.node_count() {
        return Vec::new();
    }

    let mut visited = vec![false; tree.node_count()];
    let mut visits = Vec::new();
    let mut stack = vec![Visit {
        node: root,
        parent: None,
    }];

    while let Some(visit) = stack.pop() {
        if visited[visit.node] {
            continue;
        }
        visited[visit.node] = true;
        visits.push(visit);
        for neighbour in tree.neighbours(visit.node).iter().rev() {
            if !visited[neighbour.node] {
                stack.push(Visit {
                    node: neighbour.node,
                    parent: Some(visit.node),
                });
            }
        }
    }
    visits
}
