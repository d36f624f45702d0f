use ggl_core::rng::RngHandle;
use ggl_graph::{gen_grid, gen_random_labeled, Graph};
use ggl_match::{AutomorphismOrder, GraphPattern, MatchConfig, MatchCounter, SubgraphMatcher};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn match_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(11);
    let molecule =
        gen_random_labeled(300, 450, &["C", "N", "O"], &["-", "="], false, &mut rng).unwrap();
    let path = GraphPattern::new(
        Graph::from_parts(
            ["C", "*", "O"],
            vec![(0, 1, "-".to_string()), (1, 2, "*".to_string())],
        )
        .unwrap(),
    )
    .with_wildcard("*");
    let matcher = SubgraphMatcher::new(MatchConfig::default());

    c.bench_function("match_path_random", |b| {
        b.iter(|| {
            let mut counter = MatchCounter::new();
            black_box(matcher.find_matches(&path, &molecule, &mut counter))
        });
    });

    let grid = gen_grid(9, 9, 3, "0", "-").unwrap();
    let triangle = GraphPattern::new(
        Graph::from_parts(
            ["0", "0", "0"],
            vec![
                (0, 1, "-".to_string()),
                (1, 2, "-".to_string()),
                (2, 0, "-".to_string()),
            ],
        )
        .unwrap(),
    );
    let rotations = AutomorphismOrder::new(
        3,
        vec![
            vec![1, 2, 0],
            vec![2, 0, 1],
            vec![0, 2, 1],
            vec![2, 1, 0],
            vec![1, 0, 2],
        ],
    );

    c.bench_function("match_triangles_sudoku", |b| {
        b.iter(|| {
            let mut counter = MatchCounter::new();
            black_box(matcher.find_matches_with_order(&triangle, Some(&rotations), &grid, &mut counter))
        });
    });
}

criterion_group!(benches, match_bench);
criterion_main!(benches);
