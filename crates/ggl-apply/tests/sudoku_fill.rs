use ggl_apply::{EngineConfig, GraphStore, RuleApplier, RuleEngine, ApplyConfig};
use ggl_core::LabeledGraph;
use ggl_graph::{gen_grid, Graph};
use ggl_match::{AdjacencyOp, MatchConfig, MatchConstraint, SubgraphMatcher};
use ggl_rule::Rule;

fn solved_digit(cell: usize) -> usize {
    let (r, c) = (cell / 9, cell % 9);
    (r * 3 + r / 3 + c) % 9 + 1
}

/// Valid 9x9 solution with cell 4 (row 0, digit 5) left empty.
fn grid_with_hole() -> Graph {
    let mut grid = gen_grid(9, 9, 3, "0", "-").unwrap();
    for cell in 0..81 {
        if cell != 4 {
            grid.set_node_label(cell, solved_digit(cell).to_string()).unwrap();
        }
    }
    grid
}

fn fill_rule(digit: &str) -> Rule {
    let mut rule = Rule::new(format!("fill-{digit}"));
    let cell = rule.add_label_change("0", digit);
    rule.add_constraint(MatchConstraint::NodeAdjacency {
        node: cell,
        op: AdjacencyOp::Eq,
        count: 0,
        node_labels: [digit.to_string()].into(),
        edge_labels: Default::default(),
    });
    rule
}

#[test]
fn empty_cell_receives_the_only_free_digit() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(solved_digit(4), 5);
    let grid = grid_with_hole();
    let rule = fill_rule("5");
    let engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut store = GraphStore::new();
    let produced = engine.apply_rule(&rule, &grid, &mut store).unwrap();
    assert_eq!(produced, 1);
    assert_eq!(store.len(), 1);
    let filled = &store.graphs()[0];
    assert_eq!(filled.node_label(4), "5");
    assert_eq!(filled.node_count(), 81);
    assert_eq!(filled.edge_count(), grid.edge_count());
    assert!((0..81).all(|cell| filled.node_label(cell) == solved_digit(cell).to_string()));
}

#[test]
fn conflicting_digits_produce_nothing() {
    let grid = grid_with_hole();
    let rules: Vec<Rule> = (1..=9).map(|d| fill_rule(&d.to_string())).collect();
    let engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let mut store = GraphStore::new();
    engine.apply_rules(&rules, &grid, &mut store).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.graphs()[0].node_label(4), "5");
}

#[test]
fn applier_driven_directly_by_the_matcher() {
    let grid = grid_with_hole();
    let rule = fill_rule("5");
    let left = rule.left_side();
    let mut store = GraphStore::new();
    let mut applier = RuleApplier::new(&rule, &ApplyConfig::default(), &mut store).unwrap();
    let hits = SubgraphMatcher::new(MatchConfig::default()).find_matches(&left, &grid, &mut applier);
    assert_eq!(hits, 1);
    assert_eq!(applier.applied(), 1);
    applier.finish().unwrap();
    assert_eq!(store.graphs()[0].node_label(4), "5");
    // the target itself is untouched
    assert_eq!(grid.node_label(4), "0");
}
