use ggl_core::LabeledGraph;
use ggl_match::{GraphPattern, MatchConfig, MatchCounter, SubgraphMatcher};

/// Exact isomorphism test for labeled multigraphs.
///
/// Equal node and edge counts plus one covering embedding of `a` into `b`
/// imply a bijection on both nodes and edges.
pub fn are_isomorphic(a: &dyn LabeledGraph, b: &dyn LabeledGraph) -> bool {
    if a.node_count() != b.node_count() || a.edge_count() != b.edge_count() {
        return false;
    }
    if profile(a) != profile(b) {
        return false;
    }
    let mut counter = MatchCounter::new();
    SubgraphMatcher::new(MatchConfig::default().with_max_hits(1)).find_matches(
        &GraphPattern::new(a),
        b,
        &mut counter,
    );
    counter.hits() == 1
}

/// Sorted `(label, degree, self-loops)` triples.
fn profile(graph: &dyn LabeledGraph) -> Vec<(&str, usize, usize)> {
    let mut profile: Vec<(&str, usize, usize)> = (0..graph.node_count())
        .map(|node| {
            (
                graph.node_label(node),
                graph.degree(node),
                graph.self_loop_count(node),
            )
        })
        .collect();
    profile.sort_unstable();
    profile
}
