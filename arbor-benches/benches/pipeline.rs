//! End-to-end transmission forest benchmarks.
//!
//! Runs spanning tree, rooting, pruning and component extraction over a
//! synthetic graph and then renders the dot output into memory.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use std::fmt;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use arbor_benches::{
    params::PipelineBenchParams,
    source::{SyntheticConfig, SyntheticError, SyntheticInput},
};
use arbor_core::{ArborBuilder, ArborError};

const SEED: u64 = 42;

const CLUSTER_COUNTS: &[usize] = &[100, 400];

/// Cases per cluster on average.
const CASES_PER_CLUSTER: usize = 8;

#[derive(Debug)]
enum SetupError {
    Synthetic(SyntheticError),
    Arbor(ArborError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthetic(err) => write!(f, "synthetic input: {err}"),
            Self::Arbor(err) => write!(f, "arbor configuration: {err}"),
        }
    }
}

fn pipeline_impl(c: &mut Criterion) -> Result<(), SetupError> {
    let arbor = ArborBuilder::new().build().map_err(SetupError::Arbor)?;
    let mut group = c.benchmark_group("arbor_run");
    group.sample_size(20);

    for &cluster_count in CLUSTER_COUNTS {
        let input = SyntheticInput::generate(&SyntheticConfig {
            cluster_count,
            case_count: cluster_count * CASES_PER_CLUSTER,
            seed: SEED,
        })
        .map_err(SetupError::Synthetic)?;
        let params = PipelineBenchParams { cluster_count };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &input,
            |b, input| {
                b.iter(|| {
                    let Ok(forest) = arbor.run(input.graph(), input.records().iter().cloned())
                    else {
                        return;
                    };
                    let mut dot = Vec::new();
                    let _written = forest.write_dot(&mut dot, input.graph());
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn pipeline(c: &mut Criterion) {
    if let Err(err) = pipeline_impl(c) {
        panic!("pipeline benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pipeline);
criterion_main!(benches);
