//! Weakly connected components of a pruned forest.
//!
//! Components are ordered by the traversal position of their first edge and
//! keep traversal order internally, so numbering is stable across runs on the
//! same input.

use std::collections::HashMap;

use crate::{
    cases::CaseCounts,
    id::NodeIndex,
    prune::{DirectedEdge, PrunedForest},
    union_find::DisjointSet,
};

/// A weakly connected piece of a [`PrunedForest`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Component {
    nodes: Vec<NodeIndex>,
    edges: Vec<DirectedEdge>,
}

impl Component {
    /// Member nodes in order of first appearance.
    #[must_use]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Member edges in traversal order.
    #[must_use]
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    /// Total cases over the member nodes.
    #[must_use]
    pub fn case_total(&self, counts: &CaseCounts) -> usize {
        self.nodes.iter().map(|&node| counts.count(node)).sum()
    }

    /// `placed` marks nodes already assigned; a node lives in one component only.
    fn push(&mut self, edge: DirectedEdge, placed: &mut [bool]) {
        for node in [edge.parent, edge.child] {
            if let Some(flag) = placed.get_mut(node)
                && !*flag
            {
                *flag = true;
                self.nodes.push(node);
            }
        }
        self.edges.push(edge);
    }
}

/// Splits `forest` into weakly connected components.
///
/// `node_count` bounds the node indices used by the forest.
///
/// # Examples
/// ```
/// use arbor_core::{
///     DegreeThreshold, DistanceGraph, DistanceRow, SpanningTree, kruskal, prune,
///     rooted_traversal, weakly_connected_components,
/// };
///
/// let graph = DistanceGraph::from_rows([
///     DistanceRow::new("root", "hub", 0.1),
///     DistanceRow::new("hub", "a", 0.2),
///     DistanceRow::new("hub", "b", 0.3),
///     DistanceRow::new("a", "c", 0.4),
/// ])?;
/// let tree = SpanningTree::from_forest(&kruskal(&graph)?);
/// let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::Max(2));
/// let components = weakly_connected_components(&forest, graph.node_count());
/// assert_eq!(components.len(), 1);
/// assert_eq!(components[0].nodes(), [1, 2, 4, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn weakly_connected_components(forest: &PrunedForest, node_count: usize) -> Vec<Component> {
    let mut sets = DisjointSet::new(node_count);
    for edge in forest.edges() {
        if edge.parent < node_count && edge.child < node_count {
            sets.union(edge.parent, edge.child);
        }
    }

    let mut slots: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Component> = Vec::new();
    let mut placed = vec![false; node_count];
    for edge in forest.edges() {
        if edge.parent >= node_count || edge.child >= node_count {
            continue;
        }
        let root = sets.find(edge.parent);
        let slot = *slots.entry(root).or_insert_with(|| {
            components.push(Component::default());
            components.len() - 1
        });
        if let Some(component) = components.get_mut(slot) {
            component.push(*edge, &mut placed);
        }
    }
    components
}
