use ggl_core::errors::{ErrorInfo, GglError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("node", 3)
        .with_context("reason", "example")
}

#[test]
fn graph_error_surface() {
    let err = GglError::Graph(sample_info("unknown-node", "node does not exist"));
    assert_eq!(err.info().code, "unknown-node");
    assert_eq!(err.info().context.get("node"), Some(&"3".to_string()));
}

#[test]
fn apply_error_surface() {
    let err = GglError::apply("missing-edge", "matched edge not found").with_context("rule", "r1");
    assert_eq!(err.code(), "missing-edge");
    assert!(matches!(err, GglError::Apply(_)));
    assert_eq!(err.info().context.get("rule"), Some(&"r1".to_string()));
}

#[test]
fn display_includes_context_and_hint() {
    let err = GglError::Rule(
        sample_info("index-out-of-range", "edge endpoint missing").with_hint("check node ids"),
    );
    let text = err.to_string();
    assert!(text.starts_with("rule error: edge endpoint missing (code: index-out-of-range)"));
    assert!(text.contains("node=3"));
    assert!(text.contains("hint: check node ids"));
}

#[test]
fn errors_round_trip_json() {
    let err = GglError::config("invalid-yaml", "unexpected key").with_context("line", 4);
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Config\""));
    let decoded: GglError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
