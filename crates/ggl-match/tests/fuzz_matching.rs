use std::collections::BTreeSet;

use ggl_core::rng::RngHandle;
use ggl_core::LabeledGraph;
use ggl_graph::{gen_random_labeled, permute_nodes, Graph};
use ggl_match::{GraphPattern, MatchConfig, MatchStore, SubgraphMatcher};
use proptest::prelude::*;

fn covered(required: Vec<&str>, mut pool: Vec<&str>) -> bool {
    for label in required {
        match pool.iter().position(|&candidate| candidate == label) {
            Some(idx) => {
                pool.swap_remove(idx);
            }
            None => return false,
        }
    }
    true
}

fn is_embedding(pattern: &Graph, target: &Graph, mapping: &[usize]) -> bool {
    let n = pattern.node_count();
    (0..n).all(|p| pattern.node_label(p) == target.node_label(mapping[p]))
        && (0..n).all(|a| {
            (a..n).all(|b| {
                covered(
                    pattern.edge_labels_between(a, b),
                    target.edge_labels_between(mapping[a], mapping[b]),
                )
            })
        })
}

fn brute_force(pattern: &Graph, target: &Graph) -> BTreeSet<Vec<usize>> {
    fn extend(pattern: &Graph, target: &Graph, prefix: &mut Vec<usize>, out: &mut BTreeSet<Vec<usize>>) {
        if prefix.len() == pattern.node_count() {
            if is_embedding(pattern, target, prefix) {
                out.insert(prefix.clone());
            }
            return;
        }
        for candidate in 0..target.node_count() {
            if !prefix.contains(&candidate) {
                prefix.push(candidate);
                extend(pattern, target, prefix, out);
                prefix.pop();
            }
        }
    }
    let mut out = BTreeSet::new();
    extend(pattern, target, &mut Vec::new(), &mut out);
    out
}

fn reported(pattern: &Graph, target: &Graph) -> Vec<Vec<usize>> {
    let mut store = MatchStore::new();
    SubgraphMatcher::new(MatchConfig::default()).find_matches(
        &GraphPattern::new(pattern.clone()),
        target,
        &mut store,
    );
    store.into_hits().into_iter().map(|(_, m)| m.into_vec()).collect()
}

fn random_pair(seed: u64, target_size: (usize, usize), pattern_size: (usize, usize)) -> (Graph, Graph, RngHandle) {
    let mut rng = RngHandle::from_seed(seed);
    let target = gen_random_labeled(target_size.0, target_size.1, &["C", "N"], &["-", "="], true, &mut rng)
        .unwrap();
    let pattern = gen_random_labeled(pattern_size.0, pattern_size.1, &["C", "N"], &["-", "="], true, &mut rng)
        .unwrap();
    (pattern, target, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matcher_agrees_with_brute_force(
        seed in any::<u64>(),
        target_nodes in 2usize..7,
        target_edges in 1usize..10,
        pattern_nodes in 1usize..4,
        pattern_edges in 0usize..4
    ) {
        let (pattern, target, _) = random_pair(seed, (target_nodes, target_edges), (pattern_nodes, pattern_edges));
        let hits = reported(&pattern, &target);
        for mapping in &hits {
            let distinct: BTreeSet<usize> = mapping.iter().copied().collect();
            prop_assert_eq!(distinct.len(), mapping.len());
            prop_assert!(is_embedding(&pattern, &target, mapping));
        }
        let unique: BTreeSet<Vec<usize>> = hits.iter().cloned().collect();
        prop_assert_eq!(unique.len(), hits.len());
        prop_assert_eq!(unique, brute_force(&pattern, &target));
    }

    #[test]
    fn matches_follow_target_permutations(
        seed in any::<u64>(),
        target_nodes in 2usize..8,
        target_edges in 1usize..12,
        pattern_nodes in 1usize..4,
        pattern_edges in 0usize..4
    ) {
        let (pattern, target, mut rng) = random_pair(seed, (target_nodes, target_edges), (pattern_nodes, pattern_edges));
        let perm = rng.permutation(target_nodes);
        let permuted = permute_nodes(&target, &perm).unwrap();

        let expected: BTreeSet<Vec<usize>> = reported(&pattern, &target)
            .into_iter()
            .map(|mapping| mapping.into_iter().map(|node| perm[node]).collect())
            .collect();
        let actual: BTreeSet<Vec<usize>> = reported(&pattern, &permuted).into_iter().collect();
        prop_assert_eq!(actual, expected);
    }
}
