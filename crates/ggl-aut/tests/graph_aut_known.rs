use std::collections::BTreeSet;

use ggl_aut::{find_automorphisms, AutomorphismReport};
use ggl_graph::{gen_cycle, Graph};
use ggl_match::{GraphPattern, LabelMode, MatchConstraint};

fn plain(graph: Graph) -> GraphPattern<Graph> {
    GraphPattern::new(graph)
}

fn star() -> Graph {
    Graph::from_parts(
        ["C", "*", "*"],
        vec![(0, 1, "-".to_string()), (0, 2, "-".to_string())],
    )
    .unwrap()
}

#[test]
fn triangle_has_full_symmetric_group() {
    let set = find_automorphisms(&plain(gen_cycle(3, "C", "-").unwrap()), 100);
    assert_eq!(set.len(), 6);
    assert_eq!(set.permutations()[0], vec![0, 1, 2]);
    assert!(!set.is_truncated());
    let report = set.report();
    assert_eq!(report.order, 6);
    assert_eq!(report.orbit_hist, vec![3]);
}

#[test]
fn labels_and_parallel_edges_are_respected() {
    let path = Graph::from_parts(
        ["C", "C", "C"],
        vec![(0, 1, "-".to_string()), (1, 2, "-".to_string())],
    )
    .unwrap();
    let set = find_automorphisms(&plain(path), 100);
    assert_eq!(set.permutations(), &[vec![0, 1, 2], vec![2, 1, 0]]);
    assert_eq!(set.report().orbit_hist, vec![1, 2]);

    let hetero = Graph::from_parts(
        ["C", "C", "N"],
        vec![(0, 1, "-".to_string()), (1, 2, "-".to_string())],
    )
    .unwrap();
    assert_eq!(find_automorphisms(&plain(hetero), 100).len(), 1);

    let double = Graph::from_parts(
        ["C", "C"],
        vec![(0, 1, "-".to_string()), (0, 1, "=".to_string())],
    )
    .unwrap();
    assert_eq!(find_automorphisms(&plain(double), 100).len(), 2);

    let lopsided = Graph::from_parts(
        ["C", "C"],
        vec![(0, 1, "-".to_string()), (0, 0, "o".to_string())],
    )
    .unwrap();
    assert_eq!(find_automorphisms(&plain(lopsided), 100).len(), 1);
}

#[test]
fn wildcard_is_compared_literally() {
    let pattern = GraphPattern::new(star()).with_wildcard("*");
    assert_eq!(find_automorphisms(&pattern, 100).len(), 2);
}

#[test]
fn constraints_must_be_invariant() {
    let on_one = GraphPattern::new(star())
        .with_constraint(MatchConstraint::NodeLabel {
            node: 1,
            labels: BTreeSet::from(["O".to_string()]),
            mode: LabelMode::Allowed,
        })
        .unwrap();
    assert_eq!(find_automorphisms(&on_one, 100).len(), 1);

    let on_both = (1..=2)
        .try_fold(GraphPattern::new(star()), |pattern, node| {
            pattern.with_constraint(MatchConstraint::NodeLabel {
                node,
                labels: BTreeSet::from(["O".to_string()]),
                mode: LabelMode::Allowed,
            })
        })
        .unwrap();
    assert_eq!(find_automorphisms(&on_both, 100).len(), 2);
}

#[test]
fn enumeration_is_truncated_at_limit() {
    let hexagon = plain(gen_cycle(6, "C", "-").unwrap());
    let full = find_automorphisms(&hexagon, 12);
    assert_eq!(full.len(), 12);
    assert!(!full.is_truncated());

    let cut = find_automorphisms(&hexagon, 5);
    assert_eq!(cut.len(), 5);
    assert!(cut.is_truncated());
    assert!(cut.report().truncated);
    assert_eq!(cut.permutations()[0], (0..6).collect::<Vec<_>>());
}

#[test]
fn empty_pattern_has_only_identity() {
    let set = find_automorphisms(&plain(Graph::new()), 10);
    assert_eq!(set.len(), 1);
    assert!(set.order().is_trivial());
    assert_eq!(set.report(), AutomorphismReport::default());
}

#[test]
fn report_serializes() {
    let report = find_automorphisms(&plain(gen_cycle(4, "C", "-").unwrap()), 100).report();
    let json = serde_json::to_string(&report).unwrap();
    let back: AutomorphismReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
    assert_eq!(report.order, 8);
}
