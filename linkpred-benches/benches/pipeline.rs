//! End-to-end ranking benchmarks.
//!
//! Runs the full load, enumerate, score and rank pipeline over synthetic
//! graphs, in static and temporal mode.
#![expect(missing_docs, reason = "Criterion macros generate undocumented items")]
#![expect(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use linkpred_benches::{
    params::GraphBenchParams,
    source::{SyntheticGraph, SyntheticGraphConfig},
};
use linkpred_core::{LinkPredictorBuilder, TemporalConfig};

const SEED: u64 = 11;
const LINKS_PER_NODE: usize = 3;
const NODE_COUNTS: &[usize] = &[500, 2_000];
const TOP_K: usize = 20;

fn ranking_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_predictor_run");
    group.sample_size(10);

    let static_predictor = LinkPredictorBuilder::new()
        .with_top_k(TOP_K)
        .build()
        .expect("static configuration must be valid");

    for &node_count in NODE_COUNTS {
        let source = SyntheticGraph::generate(&SyntheticGraphConfig {
            node_count,
            links_per_node: LINKS_PER_NODE,
            seed: SEED,
        })
        .expect("synthetic graph generation must succeed");
        let params = GraphBenchParams {
            node_count,
            links_per_node: LINKS_PER_NODE,
        };

        let midpoint = u32::try_from(node_count.div_euclid(2)).expect("node count fits u32");
        let cutoff = f64::from(midpoint);
        let temporal_predictor = LinkPredictorBuilder::new()
            .with_top_k(TOP_K)
            .with_temporal(TemporalConfig::at(cutoff))
            .build()
            .expect("temporal configuration must be valid");

        group.bench_with_input(BenchmarkId::new("static", params), &source, |b, source| {
            b.iter(|| static_predictor.run(source).expect("pipeline must succeed"));
        });
        group.bench_with_input(BenchmarkId::new("temporal", params), &source, |b, source| {
            b.iter(|| temporal_predictor.run(source).expect("pipeline must succeed"));
        });
    }

    group.finish();
}

criterion_group!(benches, ranking_pipeline);
criterion_main!(benches);
