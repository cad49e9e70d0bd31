//! Structural invariant verification.
//!
//! For any spanning forest produced by [`kruskal`], verifies:
//!
//! - **Acyclicity**: no cycles (union-find based detection).
//! - **Edge count**: `V - C` edges for `C` connected components.
//! - **Canonical form**: `source < target` for all edges.
//! - **Component agreement**: `C` matches an independent reachability count.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::mst::kruskal;

use super::oracle::find_root;
use super::strategies::MstFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &MstFixture) -> TestCaseResult {
    let graph = &fixture.graph;
    let forest = kruskal(graph).map_err(|err| {
        TestCaseError::fail(format!(
            "kruskal failed: {err} (distribution={:?}, nodes={})",
            fixture.distribution,
            graph.node_count(),
        ))
    })?;

    let node_count = graph.node_count();
    let mut parent: Vec<usize> = (0..node_count).collect();
    for (i, edge) in forest.edges().iter().enumerate() {
        if edge.source() >= edge.target() {
            return Err(TestCaseError::fail(format!(
                "edge {i}: not canonical ({} >= {})",
                edge.source(),
                edge.target(),
            )));
        }
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left == right {
            return Err(TestCaseError::fail(format!("edge {i} closes a cycle")));
        }
        parent[right] = left;
    }

    let expected_edges = node_count - forest.component_count();
    if forest.edges().len() != expected_edges {
        return Err(TestCaseError::fail(format!(
            "edge count mismatch: got {}, expected {expected_edges} ({} components)",
            forest.edges().len(),
            forest.component_count(),
        )));
    }

    let graph_components = count_graph_components(fixture);
    if forest.component_count() != graph_components {
        return Err(TestCaseError::fail(format!(
            "component count mismatch: forest={}, graph={graph_components}",
            forest.component_count(),
        )));
    }
    Ok(())
}

fn count_graph_components(fixture: &MstFixture) -> usize {
    let node_count = fixture.graph.node_count();
    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut components = node_count;
    for edge in fixture.graph.edges() {
        let left = find_root(&mut parent, edge.source);
        let right = find_root(&mut parent, edge.target);
        if left != right {
            parent[right] = left;
            components -= 1;
        }
    }
    components
}
