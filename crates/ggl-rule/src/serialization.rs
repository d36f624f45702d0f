use ggl_core::errors::GglError;
use ggl_core::provenance::SchemaVersion;
use ggl_match::MatchConstraint;
use serde::{Deserialize, Serialize};

use crate::rule::{CopyAndPaste, Rule, RuleEdge, RuleNode};

/// Schema version written into every serialized rule.
pub const RULE_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the rule to a JSON string.
pub fn rule_to_json(rule: &Rule) -> Result<String, GglError> {
    serde_json::to_string_pretty(&SerializableRule::from(rule))
        .map_err(|err| GglError::serde("serialize-json", err.to_string()))
}

/// Restores a rule from JSON, rejecting node references outside the core
/// graph. Context mismatches are kept and show up in
/// [`Rule::is_consistent`].
pub fn rule_from_json(json: &str) -> Result<Rule, GglError> {
    let serializable: SerializableRule = serde_json::from_str(json)
        .map_err(|err| GglError::serde("deserialize-json", err.to_string()))?;
    Rule::try_from(serializable)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableRule {
    schema_version: SchemaVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wildcard: Option<String>,
    nodes: Vec<RuleNode>,
    #[serde(default)]
    edges: Vec<RuleEdge>,
    #[serde(default)]
    constraints: Vec<MatchConstraint>,
    #[serde(default)]
    copy_and_paste: Vec<CopyAndPaste>,
}

impl From<&Rule> for SerializableRule {
    fn from(rule: &Rule) -> Self {
        Self {
            schema_version: RULE_SCHEMA,
            rule_id: rule.id.clone(),
            wildcard: rule.wildcard.clone(),
            nodes: rule.nodes.clone(),
            edges: rule.edges.clone(),
            constraints: rule.constraints.clone(),
            copy_and_paste: rule.copy_and_paste.clone(),
        }
    }
}

impl TryFrom<SerializableRule> for Rule {
    type Error = GglError;

    fn try_from(value: SerializableRule) -> Result<Self, Self::Error> {
        if !RULE_SCHEMA.is_compatible_with(&value.schema_version) {
            return Err(GglError::serde("schema-mismatch", "unsupported rule schema")
                .with_context("found", format!("{:?}", value.schema_version))
                .with_context("supported", format!("{RULE_SCHEMA:?}")));
        }
        let node_count = value.nodes.len();
        let check = |what: &str, node: usize| {
            if node < node_count {
                Ok(())
            } else {
                Err(GglError::serde("invalid-rule", "node reference out of range")
                    .with_context("field", what)
                    .with_context("node", node)
                    .with_context("nodes", node_count))
            }
        };
        for edge in &value.edges {
            check("edge", edge.source)?;
            check("edge", edge.target)?;
        }
        for constraint in &value.constraints {
            for node in constraint.nodes() {
                check("constraint", node)?;
            }
        }
        for directive in &value.copy_and_paste {
            check("copy_and_paste.source", directive.source)?;
            check("copy_and_paste.paste_target", directive.paste_target)?;
            for &node in directive.target_filter.iter().flatten() {
                check("copy_and_paste.target_filter", node)?;
            }
        }
        Ok(Rule {
            id: value.rule_id,
            nodes: value.nodes,
            edges: value.edges,
            constraints: value.constraints,
            copy_and_paste: value.copy_and_paste,
            wildcard: value.wildcard,
        })
    }
}
