use ggl_core::rng::RngHandle;
use ggl_core::LabeledGraph;
use ggl_graph::{gen_random_labeled, invariant_hash, ArenaGraph};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn queries_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let graph = gen_random_labeled(2_000, 4_000, &["C", "N", "O"], &["-", "="], true, &mut rng)
        .unwrap();

    c.bench_function("degree_queries", |b| {
        b.iter(|| {
            for node in 0..graph.node_count() {
                black_box(graph.degree(node));
                black_box(graph.self_loop_count(node));
            }
        });
    });

    c.bench_function("arena_copy_compact", |b| {
        b.iter(|| black_box(ArenaGraph::from_graph(&graph).compact()));
    });

    c.bench_function("invariant_hash", |b| {
        b.iter(|| black_box(invariant_hash(&graph)));
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
