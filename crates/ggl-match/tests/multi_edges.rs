use ggl_graph::Graph;
use ggl_match::{GraphPattern, MatchConfig, MatchCounter, SubgraphMatcher};

fn count(pattern: &GraphPattern<Graph>, target: &Graph) -> usize {
    let mut counter = MatchCounter::new();
    SubgraphMatcher::new(MatchConfig::default()).find_matches(pattern, target, &mut counter)
}

fn pair(edges: &[&str]) -> Graph {
    Graph::from_parts(
        ["C", "O"],
        edges.iter().map(|label| (0, 1, label.to_string())),
    )
    .unwrap()
}

#[test]
fn parallel_edges_need_distinct_target_edges() {
    let pattern = GraphPattern::new(pair(&["-", "="]));
    assert_eq!(count(&pattern, &pair(&["-", "=", "-"])), 1);
    assert_eq!(count(&pattern, &pair(&["-", "-"])), 0);
    assert_eq!(count(&pattern, &pair(&["="])), 0);

    let doubled = GraphPattern::new(pair(&["-", "-"]));
    assert_eq!(count(&doubled, &pair(&["-", "=", "-"])), 1);
    assert_eq!(count(&doubled, &pair(&["-", "="])), 0);
}

#[test]
fn wildcard_edges_take_remaining_target_edges() {
    let pattern = GraphPattern::new(pair(&["*", "-"])).with_wildcard("*");
    assert_eq!(count(&pattern, &pair(&["=", "-"])), 1);
    assert_eq!(count(&pattern, &pair(&["-", "-"])), 1);
    assert_eq!(count(&pattern, &pair(&["-"])), 0);
    assert_eq!(count(&pattern, &pair(&["=", "="])), 0);
}

#[test]
fn self_loops_map_to_self_loops() {
    let looped = GraphPattern::new(Graph::from_parts(["C"], vec![(0, 0, "o".to_string())]).unwrap());
    let bare = Graph::from_parts(["C", "C"], vec![(0, 1, "o".to_string())]).unwrap();
    assert_eq!(count(&looped, &bare), 0);

    let with_loop = Graph::from_parts(
        ["C", "C"],
        vec![(0, 1, "o".to_string()), (1, 1, "o".to_string())],
    )
    .unwrap();
    assert_eq!(count(&looped, &with_loop), 1);

    let wrong_label = Graph::from_parts(["C"], vec![(0, 0, "x".to_string())]).unwrap();
    assert_eq!(count(&looped, &wrong_label), 0);
}

#[test]
fn node_wildcard_matches_any_label() {
    let pattern = GraphPattern::new(
        Graph::from_parts(["C", "*"], vec![(0, 1, "-".to_string())]).unwrap(),
    )
    .with_wildcard("*");
    let target = Graph::from_parts(
        ["C", "N", "O"],
        vec![(0, 1, "-".to_string()), (0, 2, "-".to_string()), (1, 2, "-".to_string())],
    )
    .unwrap();
    assert_eq!(count(&pattern, &target), 2);
}
