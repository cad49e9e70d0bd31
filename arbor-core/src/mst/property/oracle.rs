//! Brute-force spanning tree oracle.
//!
//! Enumerates every `(n - 1)`-edge subset of a small graph, keeps the ones
//! that form a spanning tree and returns the minimum total weight. Only
//! usable for graphs with a handful of nodes.

use crate::graph::GraphEdge;

/// Returns the minimum spanning tree weight, or `None` when no spanning tree
/// exists (the graph is disconnected).
pub(super) fn brute_force_mst_weight(node_count: usize, edges: &[GraphEdge]) -> Option<f64> {
    let wanted = node_count.saturating_sub(1);
    if wanted == 0 {
        return Some(0.0);
    }
    let mut best: Option<f64> = None;
    let mut chosen = Vec::with_capacity(wanted);
    visit_subsets(edges, 0, wanted, &mut chosen, &mut |subset| {
        if spans(node_count, subset) {
            let weight: f64 = subset.iter().map(|edge| edge.weight).sum();
            best = Some(best.map_or(weight, |current| current.min(weight)));
        }
    });
    best
}

fn visit_subsets<'a>(
    edges: &'a [GraphEdge],
    start: usize,
    wanted: usize,
    chosen: &mut Vec<&'a GraphEdge>,
    on_subset: &mut dyn FnMut(&[&'a GraphEdge]),
) {
    if chosen.len() == wanted {
        on_subset(chosen);
        return;
    }
    for index in start..edges.len() {
        chosen.push(&edges[index]);
        visit_subsets(edges, index + 1, wanted, chosen, on_subset);
        chosen.pop();
    }
}

/// `n - 1` edges span `n` nodes exactly when they contain no cycle.
fn spans(node_count: usize, subset: &[&GraphEdge]) -> bool {
    let mut parent: Vec<usize> = (0..node_count).collect();
    for edge in subset {
        let left = find_root(&mut parent, edge.source);
        let right = find_root(&mut parent, edge.target);
        if left == right {
            return false;
        }
        parent[right] = left;
    }
    true
}

/// Path-compressing find for union-find verification.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}
