use std::collections::BTreeSet;

use ggl_graph::Graph;
use ggl_match::{AutomorphismOrder, GraphPattern, MatchConfig, MatchStore, SubgraphMatcher};

fn triangle() -> Graph {
    Graph::from_parts(
        ["A", "B", "C"],
        vec![
            (0, 1, "-".to_string()),
            (1, 2, "-".to_string()),
            (2, 0, "-".to_string()),
        ],
    )
    .unwrap()
}

fn edge_pattern() -> GraphPattern<Graph> {
    GraphPattern::new(Graph::from_parts(["*", "*"], vec![(0, 1, "-".to_string())]).unwrap())
        .with_wildcard("*")
}

#[test]
fn single_edge_hits_every_triangle_edge_once() {
    let _ = env_logger::builder().is_test(true).try_init();
    let matcher = SubgraphMatcher::new(MatchConfig::default());
    let order = AutomorphismOrder::new(2, vec![vec![0, 1], vec![1, 0]]);
    let mut store = MatchStore::new();
    let hits = matcher.find_matches_with_order(&edge_pattern(), Some(&order), &triangle(), &mut store);
    assert_eq!(hits, 3);

    let edges: BTreeSet<(usize, usize)> = store
        .hits()
        .iter()
        .map(|(_, m)| {
            let (a, b) = (m.as_slice()[0], m.as_slice()[1]);
            (a.min(b), a.max(b))
        })
        .collect();
    assert_eq!(edges, BTreeSet::from([(0, 1), (1, 2), (0, 2)]));
}

#[test]
fn without_order_both_orientations_are_reported() {
    let matcher = SubgraphMatcher::new(MatchConfig::default());
    let mut store = MatchStore::new();
    assert_eq!(matcher.find_matches(&edge_pattern(), &triangle(), &mut store), 6);
    assert!(store.hits().iter().all(|(id, m)| *id == 0 && m.is_injective()));
}

#[test]
fn exact_labels_pin_the_orientation() {
    let matcher = SubgraphMatcher::new(MatchConfig::default());
    let pattern =
        GraphPattern::new(Graph::from_parts(["B", "A"], vec![(0, 1, "-".to_string())]).unwrap());
    let mut store = MatchStore::new();
    assert_eq!(matcher.find_matches(&pattern, &triangle(), &mut store), 1);
    assert_eq!(store.hits()[0].1.as_slice(), &[1, 0]);
}

#[test]
fn paths_are_matched_non_induced() {
    let matcher = SubgraphMatcher::new(MatchConfig::default());
    let path = GraphPattern::new(
        Graph::from_parts(
            ["*", "*", "*"],
            vec![(0, 1, "-".to_string()), (1, 2, "-".to_string())],
        )
        .unwrap(),
    )
    .with_wildcard("*");
    let mut store = MatchStore::new();
    assert_eq!(matcher.find_matches(&path, &triangle(), &mut store), 6);
}
