//! Strategy builders for MST property-based tests.
//!
//! Each generator produces a [`DistanceGraph`] over synthetic cluster names
//! so the fixtures travel through the same construction path as real input.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use test_strategy::Arbitrary;

use crate::graph::{DistanceGraph, DistanceRow};

/// Largest graph the brute-force oracle is asked to enumerate.
pub(super) const ORACLE_MAX_NODES: usize = 6;

/// Weight patterns that stress different parts of Kruskal's algorithm.
#[derive(Arbitrary, Clone, Copy, Debug)]
pub(super) enum WeightDistribution {
    /// Continuous weights; ties are practically impossible.
    Unique,
    /// Weights drawn from a tiny set so ties dominate.
    ManyIdentical,
    /// Each pair is present with probability one half.
    Sparse,
}

/// A generated graph together with the distribution that produced it.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    pub(super) distribution: WeightDistribution,
    pub(super) graph: DistanceGraph,
}

/// Generates small fixtures suitable for the brute-force oracle.
pub(super) fn oracle_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (any::<WeightDistribution>(), any::<u64>(), 2..=ORACLE_MAX_NODES).prop_map(
        |(distribution, seed, node_count)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(distribution, node_count, &mut rng)
        },
    )
}

/// Generates larger fixtures for structural checks.
pub(super) fn structural_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (any::<WeightDistribution>(), any::<u64>(), 2_usize..48).prop_map(
        |(distribution, seed, node_count)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(distribution, node_count, &mut rng)
        },
    )
}

/// Generates a fixture for a specific weight distribution.
pub(super) fn generate_fixture(
    distribution: WeightDistribution,
    node_count: usize,
    rng: &mut SmallRng,
) -> MstFixture {
    let mut rows = Vec::new();
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            let distance = match distribution {
                WeightDistribution::Unique => rng.gen_range(0.0..1.0),
                WeightDistribution::ManyIdentical => f64::from(rng.gen_range(1_u8..=3)) * 0.01,
                WeightDistribution::Sparse => {
                    if !rng.gen_bool(0.5) {
                        continue;
                    }
                    rng.gen_range(0.0..0.1)
                }
            };
            rows.push(DistanceRow::new(
                format!("c{left}"),
                format!("c{right}"),
                distance,
            ));
        }
    }
    let mut graph = DistanceGraph::from_rows(rows).unwrap_or_default();
    // Sparse draws can leave a node without any pair; keep it in the graph.
    for node in 0..node_count {
        graph.add_node(format!("c{node}").into());
    }
    MstFixture {
        distribution,
        graph,
    }
}
