use ggl_core::LabeledGraph;
use ggl_rule::{EdgeContext, NodeContext, Rule};
use proptest::prelude::*;

const NODE_CONTEXTS: [NodeContext; 4] = [
    NodeContext::Context,
    NodeContext::LeftOnly,
    NodeContext::RightOnly,
    NodeContext::LabelChange,
];
const EDGE_CONTEXTS: [EdgeContext; 3] = [EdgeContext::Context, EdgeContext::LeftOnly, EdgeContext::RightOnly];

/// Builds a rule whose edges only join endpoints their context admits.
fn build(nodes: &[usize], edges: &[(usize, usize, usize)]) -> Rule {
    let mut rule = Rule::new("random");
    for &kind in nodes {
        match NODE_CONTEXTS[kind] {
            NodeContext::Context => rule.add_context_node("C"),
            NodeContext::LeftOnly => rule.add_left_node("O"),
            NodeContext::RightOnly => rule.add_right_node("N"),
            NodeContext::LabelChange => rule.add_label_change("H", "D"),
        };
    }
    for &(a, b, kind) in edges {
        let (a, b) = (a % nodes.len(), b % nodes.len());
        let context = EDGE_CONTEXTS[kind];
        let ends = (rule.nodes()[a].context, rule.nodes()[b].context);
        if context.admits_endpoints(ends.0, ends.1) {
            rule.add_edge(a, b, context, "-");
        }
    }
    rule
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn admitted_rules_split_into_both_sides(
        nodes in prop::collection::vec(0usize..4, 1..8),
        edges in prop::collection::vec((0usize..8, 0usize..8, 0usize..3), 0..12),
    ) {
        let rule = build(&nodes, &edges);
        prop_assert!(rule.is_consistent().is_consistent());

        let left = rule.left_side();
        let right = rule.right_side();
        let on_left = rule.nodes().iter().filter(|node| node.context.on_left()).count();
        let on_right = rule.nodes().iter().filter(|node| node.context.on_right()).count();
        prop_assert_eq!(left.node_count(), on_left);
        prop_assert_eq!(right.node_count(), on_right);
        prop_assert_eq!(
            left.edge_count(),
            rule.edges().iter().filter(|edge| edge.context.on_left()).count()
        );
        prop_assert_eq!(
            right.edge_count(),
            rule.edges().iter().filter(|edge| edge.context.on_right()).count()
        );

        for local in 0..left.node_count() {
            prop_assert_eq!(left.from_core(left.to_core(local)), Some(local));
        }
        for local in 0..right.node_count() {
            prop_assert_eq!(right.from_core(right.to_core(local)), Some(local));
        }
        let components: usize = left.connected_components().iter().map(Vec::len).sum();
        prop_assert_eq!(components, on_left);
    }
}
