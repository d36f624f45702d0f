use ggl_aut::{are_isomorphic, find_automorphisms};
use ggl_core::rng::RngHandle;
use ggl_core::LabeledGraph;
use ggl_graph::{gen_cycle, gen_random_labeled, permute_nodes, Graph};
use ggl_match::GraphPattern;
use itertools::Itertools;
use proptest::prelude::*;

fn same_edges(graph: &Graph, perm: &[usize]) -> bool {
    let n = graph.node_count();
    (0..n).all(|node| graph.node_label(node) == graph.node_label(perm[node]))
        && (0..n).all(|a| {
            (a..n).all(|b| {
                let mut before = graph.edge_labels_between(a, b);
                let mut after = graph.edge_labels_between(perm[a], perm[b]);
                before.sort_unstable();
                after.sort_unstable();
                before == after
            })
        })
}

#[test]
fn hexagon_is_not_two_triangles() {
    let hexagon = gen_cycle(6, "C", "-").unwrap();
    let mut triangles = gen_cycle(3, "C", "-").unwrap();
    triangles.append(&gen_cycle(3, "C", "-").unwrap());
    assert!(!are_isomorphic(&hexagon, &triangles));
    assert!(are_isomorphic(&triangles, &triangles));
}

#[test]
fn labels_distinguish_graphs() {
    let a = Graph::from_parts(["C", "O"], vec![(0, 1, "=".to_string())]).unwrap();
    let b = Graph::from_parts(["C", "O"], vec![(0, 1, "-".to_string())]).unwrap();
    let c = Graph::from_parts(["O", "C"], vec![(1, 0, "=".to_string())]).unwrap();
    assert!(!are_isomorphic(&a, &b));
    assert!(are_isomorphic(&a, &c));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn permuted_graphs_are_isomorphic(seed in any::<u64>(), nodes in 1usize..8, edges in 0usize..12) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random_labeled(nodes, edges, &["C", "N"], &["-", "="], true, &mut rng).unwrap();
        let perm = rng.permutation(nodes);
        let permuted = permute_nodes(&graph, &perm).unwrap();
        prop_assert!(are_isomorphic(&graph, &permuted));
    }

    #[test]
    fn automorphisms_agree_with_brute_force(seed in any::<u64>(), nodes in 1usize..6, edges in 0usize..8) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random_labeled(nodes, edges, &["C", "N"], &["-"], true, &mut rng).unwrap();
        let expected = (0..nodes)
            .permutations(nodes)
            .filter(|perm| same_edges(&graph, perm))
            .count();
        let found = find_automorphisms(&GraphPattern::new(graph.clone()), 1_000);
        prop_assert_eq!(found.len(), expected);
        prop_assert!(found.permutations().iter().all(|perm| same_edges(&graph, perm)));
    }
}
