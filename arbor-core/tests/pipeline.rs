//! Property and scenario tests for the transmission-tree pipeline.

use std::collections::HashSet;

use arbor_core::{
    ArborBuilder, CaseRecord, DegreeThreshold, DisconnectedPolicy, DistanceGraph, DistanceRow,
    NodeIndex, SpanningTree, kruskal, prune, rooted_traversal, weakly_connected_components,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rstest::rstest;

/// Random complete graph over `nodes` clusters plus `cases` metadata rows.
fn random_input(seed: u64, nodes: usize, cases: usize) -> (DistanceGraph, Vec<CaseRecord>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = Vec::new();
    for left in 0..nodes {
        for right in (left + 1)..nodes {
            let distance = f64::from(rng.gen_range(1_u32..500)) / 10_000.0;
            rows.push(DistanceRow::new(format!("c{left}"), format!("c{right}"), distance));
        }
    }
    let graph = DistanceGraph::from_rows(rows).expect("generated rows are valid");
    let records = (0..cases)
        .map(|line| CaseRecord::new(line + 2, format!("c{}", rng.gen_range(0..nodes))))
        .collect();
    (graph, records)
}

/// Star-heavy graph: a few hubs each linked cheaply to many satellites.
fn hubby_input(seed: u64, hubs: usize, satellites: usize) -> DistanceGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = Vec::new();
    for hub in 1..hubs {
        rows.push(DistanceRow::new("h0", format!("h{hub}"), 0.05));
    }
    for hub in 0..hubs {
        for satellite in 0..satellites {
            let distance = f64::from(rng.gen_range(1_u32..100)) / 10_000.0;
            rows.push(DistanceRow::new(
                format!("h{hub}"),
                format!("s{hub}_{satellite}"),
                distance,
            ));
        }
    }
    DistanceGraph::from_rows(rows).expect("generated rows are valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn traversal_visits_every_node_once(seed in any::<u64>(), nodes in 2_usize..40) {
        let (graph, _) = random_input(seed, nodes, 0);
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let visits = rooted_traversal(&tree, seed as usize % nodes);

        let unique: HashSet<NodeIndex> = visits.iter().map(|visit| visit.node).collect();
        prop_assert_eq!(visits.len(), nodes);
        prop_assert_eq!(unique.len(), nodes);
        prop_assert_eq!(visits.iter().filter(|visit| visit.parent.is_none()).count(), 1);

        // Without pruning the directed edges are exactly the spanning tree.
        let forest = prune(&tree, &visits, DegreeThreshold::Unbounded);
        prop_assert_eq!(forest.edges().len(), tree.edge_count());
        for edge in forest.edges() {
            prop_assert_eq!(tree.weight(edge.parent, edge.child), Some(edge.distance));
        }
    }

    #[test]
    fn lowering_the_threshold_never_adds_edges(
        seed in any::<u64>(),
        hubs in 1_usize..5,
        satellites in 1_usize..24,
    ) {
        let graph = hubby_input(seed, hubs, satellites);
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let visits = rooted_traversal(&tree, 0);
        let mut previous = prune(&tree, &visits, DegreeThreshold::Unbounded).edges().len();
        for max in (0..=satellites + hubs).rev() {
            let surviving = prune(&tree, &visits, DegreeThreshold::Max(max)).edges().len();
            prop_assert!(surviving <= previous, "threshold {max}: {surviving} > {previous}");
            previous = surviving;
        }
    }

    #[test]
    fn components_partition_the_pruned_forest(
        seed in any::<u64>(),
        hubs in 1_usize..5,
        satellites in 1_usize..24,
        max in 0_usize..8,
    ) {
        let graph = hubby_input(seed, hubs, satellites);
        let tree = SpanningTree::from_forest(&kruskal(&graph).expect("MST must succeed"));
        let forest = prune(&tree, &rooted_traversal(&tree, 0), DegreeThreshold::Max(max));
        let components = weakly_connected_components(&forest, graph.node_count());

        let mut owner = vec![None; graph.node_count()];
        for (index, component) in components.iter().enumerate() {
            for &node in component.nodes() {
                prop_assert_eq!(owner[node], None, "node {} placed twice", node);
                owner[node] = Some(index);
            }
            for edge in component.edges() {
                prop_assert_eq!(owner[edge.parent], Some(index));
                prop_assert_eq!(owner[edge.child], Some(index));
            }
        }
        let placed: HashSet<NodeIndex> =
            components.iter().flat_map(|c| c.nodes().iter().copied()).collect();
        let expected: HashSet<NodeIndex> = forest.nodes().into_iter().collect();
        prop_assert_eq!(placed, expected);
        let edges: usize = components.iter().map(|c| c.edges().len()).sum();
        prop_assert_eq!(edges, forest.edges().len());
    }

    #[test]
    fn case_totals_round_trip(
        seed in any::<u64>(),
        nodes in 2_usize..30,
        cases in 0_usize..200,
        max in 0_usize..6,
    ) {
        let (graph, records) = random_input(seed, nodes, cases);
        let arbor = ArborBuilder::new()
            .with_degree_threshold(DegreeThreshold::Max(max))
            .build()
            .expect("configuration is valid");
        let summary = arbor.run(&graph, records).expect("run succeeds").summary(&graph);
        prop_assert_eq!(summary.counted_cases, cases);
        prop_assert_eq!(summary.component_cases() + summary.detached_cases, cases);
        prop_assert_eq!(summary.surviving_edges + summary.pruned_edges, nodes - 1);
    }
}

#[test]
fn reference_scenario() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let graph = DistanceGraph::from_rows([
        DistanceRow::new("A", "B", 1.0),
        DistanceRow::new("B", "C", 2.0),
        DistanceRow::new("A", "C", 5.0),
    ])
    .expect("rows are valid");
    let mut records: Vec<CaseRecord> = (0..10).map(|line| CaseRecord::new(line + 2, "A")).collect();
    records.push(CaseRecord::new(12, "B"));
    records.push(CaseRecord::new(13, "C"));

    let arbor = ArborBuilder::new().build().expect("defaults are valid");
    let result = arbor.run(&graph, records).expect("run succeeds");
    assert_eq!(result.spanning_forest().total_weight(), 3.0);
    assert_eq!(result.roots(), [0]);

    let mut dot = Vec::new();
    result.write_dot(&mut dot, &graph).expect("write succeeds");
    let dot = String::from_utf8(dot).expect("dot output is UTF-8");
    assert!(dot.contains("\"A\"->\"B\" [len=10000.0];"));
    assert!(dot.contains("\"B\"->\"C\" [len=20000.0];"));

    let mut list = Vec::new();
    arbor_core::write_edge_list(&mut list, &graph, &result.components()[0])
        .expect("write succeeds");
    assert_eq!(
        String::from_utf8(list).expect("edge list is UTF-8"),
        "parent,child,dist\nA,B,1.0\nB,C,2.0\n"
    );
}

#[rstest]
#[case::connected(1)]
#[case::three_islands(3)]
fn per_component_policy_matches_tree_count(#[case] islands: usize) {
    let mut rows = Vec::new();
    for island in 0..islands {
        rows.push(DistanceRow::new(format!("i{island}a"), format!("i{island}b"), 0.01));
        rows.push(DistanceRow::new(format!("i{island}b"), format!("i{island}c"), 0.02));
    }
    let graph = DistanceGraph::from_rows(rows).expect("rows are valid");
    let arbor = ArborBuilder::new()
        .with_disconnected_policy(DisconnectedPolicy::PerComponent)
        .build()
        .expect("configuration is valid");
    let summary = arbor.run(&graph, Vec::new()).expect("run succeeds").summary(&graph);
    assert_eq!(summary.trees, islands);
    assert_eq!(summary.components.len(), islands);
    assert_eq!(summary.mst_edges, 2 * islands);
}
