use ggl_graph::Graph;
use ggl_match::{AutomorphismOrder, GraphPattern, MatchConfig, MatchStore, SubgraphMatcher};

fn branches() -> GraphPattern<Graph> {
    GraphPattern::new(
        Graph::from_parts(
            ["C", "*", "*"],
            vec![(0, 1, "-".to_string()), (0, 2, "-".to_string())],
        )
        .unwrap(),
    )
    .with_wildcard("*")
}

fn carbonyl_pair() -> Graph {
    Graph::from_parts(
        ["C", "O", "O"],
        vec![(0, 1, "-".to_string()), (0, 2, "-".to_string())],
    )
    .unwrap()
}

#[test]
fn order_keeps_one_of_two_symmetric_embeddings() {
    let matcher = SubgraphMatcher::new(MatchConfig::default());
    let order = AutomorphismOrder::new(3, vec![vec![0, 2, 1]]);

    let mut plain = MatchStore::new();
    assert_eq!(matcher.find_matches(&branches(), &carbonyl_pair(), &mut plain), 2);

    let mut ordered = MatchStore::new();
    assert_eq!(
        matcher.find_matches_with_order(&branches(), Some(&order), &carbonyl_pair(), &mut ordered),
        1
    );
    assert_eq!(ordered.hits()[0].1.as_slice(), &[0, 1, 2]);
}

#[test]
fn partial_mappings_stay_undecided_until_both_sides_are_known() {
    let order = AutomorphismOrder::new(3, vec![vec![0, 1, 2], vec![0, 2, 1], vec![1, 0]]);
    assert_eq!(order.permutations().len(), 1);
    assert!(!order.is_trivial());

    assert!(order.admits(&[Some(5), None, Some(3)]));
    assert!(!order.admits(&[Some(0), Some(4), Some(3)]));
    assert!(order.is_canonical(&[0, 3, 4]));
    assert!(!order.is_canonical(&[0, 4, 3]));
}

#[test]
fn mismatched_orders_are_ignored() {
    let matcher = SubgraphMatcher::new(MatchConfig::default());
    let wrong = AutomorphismOrder::new(2, vec![vec![1, 0]]);
    let mut store = MatchStore::new();
    assert_eq!(
        matcher.find_matches_with_order(&branches(), Some(&wrong), &carbonyl_pair(), &mut store),
        2
    );
    assert!(AutomorphismOrder::trivial(3).admits(&[Some(2), Some(1), Some(0)]));
}
