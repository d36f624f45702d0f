use std::collections::BTreeSet;

use ggl_match::{AdjacencyOp, MatchConstraint};
use ggl_rule::{rule_from_json, rule_to_json, CopyAndPaste, EdgeContext, Rule, RuleConsistency};

fn sudoku_fill() -> Rule {
    let mut rule = Rule::new("fill-5");
    let cell = rule.add_label_change("0", "5");
    rule.add_constraint(MatchConstraint::NodeAdjacency {
        node: cell,
        op: AdjacencyOp::Eq,
        count: 0,
        node_labels: BTreeSet::from(["5".to_string()]),
        edge_labels: BTreeSet::new(),
    });
    rule
}

#[test]
fn rules_round_trip_through_json() {
    let mut rule = sudoku_fill().with_wildcard("*");
    let x = rule.add_left_node("X");
    let y = rule.add_right_node("Y");
    rule.add_edge(0, x, EdgeContext::LeftOnly, "-");
    rule.add_edge(0, y, EdgeContext::RightOnly, "=");
    rule.add_copy_and_paste(CopyAndPaste::new(x, y).with_edge_labels(["-"]));

    let json = rule_to_json(&rule).unwrap();
    assert!(json.contains("\"rule_id\": \"fill-5\""));
    assert!(json.contains("\"label_change\""));
    let back = rule_from_json(&json).unwrap();
    assert_eq!(back, rule);
}

#[test]
fn out_of_range_references_are_rejected() {
    let json = r#"{
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "rule_id": "broken",
        "nodes": [{"context": "context", "label": "C"}],
        "edges": [{"source": 0, "target": 4, "context": "context", "label": "-"}]
    }"#;
    let err = rule_from_json(json).unwrap_err();
    assert_eq!(err.code(), "invalid-rule");
    assert_eq!(err.info().context.get("field").map(String::as_str), Some("edge"));
}

#[test]
fn context_mismatches_survive_loading() {
    let json = r#"{
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "nodes": [
            {"context": "left_only", "label": "C"},
            {"context": "right_only", "label": "N"}
        ],
        "edges": [{"source": 0, "target": 1, "context": "context", "label": "-"}]
    }"#;
    let rule = rule_from_json(json).unwrap();
    let status = rule.is_consistent();
    assert!(status.contains(RuleConsistency::NO_RULE_ID));
    assert!(status.contains(RuleConsistency::WRONG_EDGE_CONTEXT));
}

#[test]
fn newer_major_schema_is_rejected() {
    let json = r#"{"schema_version": {"major": 2, "minor": 0, "patch": 0}, "nodes": []}"#;
    assert_eq!(rule_from_json(json).unwrap_err().code(), "schema-mismatch");
}
