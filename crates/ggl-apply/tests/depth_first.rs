use ggl_apply::{DepthFirstRewriter, EngineConfig, RuleEngine, SolverLimits};
use ggl_core::LabeledGraph;
use ggl_graph::{gen_grid, Graph};
use ggl_match::{AdjacencyOp, MatchConstraint};
use ggl_rule::Rule;

fn fill_rule(digit: usize) -> Rule {
    let digit = digit.to_string();
    let mut rule = Rule::new(format!("fill-{digit}"));
    let cell = rule.add_label_change("0", digit.as_str());
    rule.add_constraint(MatchConstraint::NodeAdjacency {
        node: cell,
        op: AdjacencyOp::Eq,
        count: 0,
        node_labels: [digit].into(),
        edge_labels: Default::default(),
    });
    rule
}

fn solved(cell: usize) -> usize {
    let (r, c) = (cell / 4, cell % 4);
    (r * 2 + r / 2 + c) % 4 + 1
}

/// 4x4 Sudoku with the diagonal cells (0,0), (1,1) and (2,2) empty.
fn puzzle() -> Graph {
    let mut grid = gen_grid(4, 4, 2, "0", "-").unwrap();
    for cell in 0..16 {
        if ![0, 5, 10].contains(&cell) {
            grid.set_node_label(cell, solved(cell).to_string()).unwrap();
        }
    }
    grid
}

fn is_complete(graph: &Graph) -> bool {
    (0..graph.node_count()).all(|node| graph.node_label(node) != "0")
}

#[test]
fn solver_fills_every_empty_cell() {
    let _ = env_logger::builder().is_test(true).try_init();
    let rules: Vec<Rule> = (1..=4).map(fill_rule).collect();
    let engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let solver = DepthFirstRewriter::new(&engine, &rules, SolverLimits::default()).unwrap();
    let outcome = solver.search(&puzzle(), is_complete).unwrap();

    let solution = outcome.solution.expect("puzzle is solvable");
    assert_eq!(outcome.path.len(), 3);
    assert!(!outcome.budget_exhausted);
    for cell in 0..16 {
        assert_eq!(solution.node_label(cell), solved(cell).to_string());
    }
    // no two linked cells share a digit
    for (_, edge) in solution.edges() {
        assert_ne!(solution.node_label(edge.source), solution.node_label(edge.target));
    }
}

#[test]
fn depth_bound_limits_the_search() {
    let rules: Vec<Rule> = (1..=4).map(fill_rule).collect();
    let engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let limits = SolverLimits {
        max_depth: 2,
        ..SolverLimits::default()
    };
    let solver = DepthFirstRewriter::new(&engine, &rules, limits).unwrap();
    let outcome = solver.search(&puzzle(), is_complete).unwrap();
    assert!(outcome.solution.is_none());
    assert!(outcome.path.is_empty());
    assert!(!outcome.budget_exhausted);
    // three single fills plus three pairs of fills
    assert_eq!(outcome.expansions, 6);
}

#[test]
fn expansion_budget_cancels_the_search() {
    let rules: Vec<Rule> = (1..=4).map(fill_rule).collect();
    let engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let limits = SolverLimits {
        max_expansions: 1,
        ..SolverLimits::default()
    };
    let solver = DepthFirstRewriter::new(&engine, &rules, limits).unwrap();
    let outcome = solver.search(&puzzle(), |_| false).unwrap();
    assert!(outcome.solution.is_none());
    assert!(outcome.budget_exhausted);
    assert_eq!(outcome.expansions, 1);
}

#[test]
fn start_graph_satisfying_the_goal_needs_no_step() {
    let rules = vec![fill_rule(1)];
    let engine = RuleEngine::new(EngineConfig::default()).unwrap();
    let solver = DepthFirstRewriter::new(&engine, &rules, SolverLimits::default()).unwrap();
    let start = puzzle();
    let outcome = solver.search(&start, |_| true).unwrap();
    assert_eq!(outcome.solution, Some(start));
    assert!(outcome.path.is_empty());
    assert_eq!(outcome.expansions, 0);
}
