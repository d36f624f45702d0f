use std::collections::BTreeSet;

use ggl_match::MatchConstraint;
use serde::{Deserialize, Serialize};

use crate::consistency::RuleConsistency;
use crate::context::{EdgeContext, NodeContext};
use crate::sides::{LeftSidePattern, RightSidePattern};

/// Node of the rule core graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleNode {
    /// Side membership.
    pub context: NodeContext,
    /// Label on the side(s) the node belongs to; the left label for
    /// [`NodeContext::LabelChange`].
    pub label: String,
    /// Right label of a [`NodeContext::LabelChange`] node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_label: Option<String>,
}

impl RuleNode {
    /// Returns the label on the left side, if the node is there.
    pub fn left_label(&self) -> Option<&str> {
        self.context.on_left().then_some(self.label.as_str())
    }

    /// Returns the label on the right side, if the node is there.
    pub fn right_label(&self) -> Option<&str> {
        match self.context {
            NodeContext::LeftOnly => None,
            NodeContext::LabelChange => self.right_label.as_deref(),
            NodeContext::Context | NodeContext::RightOnly => Some(self.label.as_str()),
        }
    }
}

/// Edge of the rule core graph (undirected).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleEdge {
    /// First endpoint (core index).
    pub source: usize,
    /// Second endpoint (core index).
    pub target: usize,
    /// Side membership.
    pub context: EdgeContext,
    /// Edge label.
    pub label: String,
}

impl RuleEdge {
    /// Returns whether both endpoints coincide.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns the endpoint opposite to `node`.
    pub fn other(&self, node: usize) -> usize {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// Reroutes edges left dangling by deleting `source` to `paste_target`.
///
/// A dangling edge is pasted when its surviving endpoint passes
/// `target_filter` and its label passes `edge_labels`; `None` admits all.
/// The target filter lists core nodes, so it can only select surviving
/// endpoints that are images of matched rule nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyAndPaste {
    /// Left-only core node whose dangling edges are rerouted.
    pub source: usize,
    /// Surviving core node receiving the copies.
    pub paste_target: usize,
    /// Core nodes admitted as surviving endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_filter: Option<BTreeSet<usize>>,
    /// Admitted edge labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_labels: Option<BTreeSet<String>>,
}

impl CopyAndPaste {
    /// Creates a directive without filters.
    pub fn new(source: usize, paste_target: usize) -> Self {
        Self {
            source,
            paste_target,
            target_filter: None,
            edge_labels: None,
        }
    }

    /// Restricts the surviving endpoints to the given core nodes.
    pub fn with_target_filter(mut self, nodes: impl IntoIterator<Item = usize>) -> Self {
        self.target_filter = Some(nodes.into_iter().collect());
        self
    }

    /// Restricts the rerouted edge labels.
    pub fn with_edge_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.edge_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Returns whether an edge with `label` whose surviving endpoint is the
    /// image of core node `other_core` (if any) passes both filters.
    pub fn admits(&self, other_core: Option<usize>, label: &str) -> bool {
        let target_ok = match &self.target_filter {
            None => true,
            Some(filter) => other_core.map_or(false, |core| filter.contains(&core)),
        };
        let label_ok = self
            .edge_labels
            .as_ref()
            .map_or(true, |labels| labels.contains(label));
        target_ok && label_ok
    }
}

/// Graph rewrite rule stored as one core graph.
///
/// Node and edge indices are assigned in insertion order. Constraints and
/// copy-and-paste directives use core node indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    pub(crate) id: Option<String>,
    pub(crate) nodes: Vec<RuleNode>,
    pub(crate) edges: Vec<RuleEdge>,
    pub(crate) constraints: Vec<MatchConstraint>,
    pub(crate) copy_and_paste: Vec<CopyAndPaste>,
    pub(crate) wildcard: Option<String>,
}

impl Rule {
    /// Creates an empty rule with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the wildcard label.
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = Some(wildcard.into());
        self
    }

    /// Replaces the rule id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    fn push_node(&mut self, context: NodeContext, label: String, right_label: Option<String>) -> usize {
        self.nodes.push(RuleNode {
            context,
            label,
            right_label,
        });
        self.nodes.len() - 1
    }

    /// Adds a node present unchanged on both sides.
    pub fn add_context_node(&mut self, label: impl Into<String>) -> usize {
        self.push_node(NodeContext::Context, label.into(), None)
    }

    /// Adds a node deleted by application.
    pub fn add_left_node(&mut self, label: impl Into<String>) -> usize {
        self.push_node(NodeContext::LeftOnly, label.into(), None)
    }

    /// Adds a node created by application.
    pub fn add_right_node(&mut self, label: impl Into<String>) -> usize {
        self.push_node(NodeContext::RightOnly, label.into(), None)
    }

    /// Adds a node relabelled from `left` to `right` by application.
    pub fn add_label_change(&mut self, left: impl Into<String>, right: impl Into<String>) -> usize {
        self.push_node(NodeContext::LabelChange, left.into(), Some(right.into()))
    }

    /// Adds an edge. Endpoints are not checked here; see
    /// [`Rule::is_consistent`].
    pub fn add_edge(
        &mut self,
        source: usize,
        target: usize,
        context: EdgeContext,
        label: impl Into<String>,
    ) -> usize {
        self.edges.push(RuleEdge {
            source,
            target,
            context,
            label: label.into(),
        });
        self.edges.len() - 1
    }

    /// Adds a match constraint in core node indices.
    pub fn add_constraint(&mut self, constraint: MatchConstraint) {
        self.constraints.push(constraint);
    }

    /// Adds a copy-and-paste directive.
    pub fn add_copy_and_paste(&mut self, directive: CopyAndPaste) {
        self.copy_and_paste.push(directive);
    }

    /// Returns the rule id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the wildcard label.
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }

    /// Returns the core nodes.
    pub fn nodes(&self) -> &[RuleNode] {
        &self.nodes
    }

    /// Returns the core node at `index`.
    pub fn node(&self, index: usize) -> Option<&RuleNode> {
        self.nodes.get(index)
    }

    /// Returns the core edges.
    pub fn edges(&self) -> &[RuleEdge] {
        &self.edges
    }

    /// Returns the constraints in core node indices.
    pub fn constraints(&self) -> &[MatchConstraint] {
        &self.constraints
    }

    /// Returns all copy-and-paste directives.
    pub fn copy_and_paste(&self) -> &[CopyAndPaste] {
        &self.copy_and_paste
    }

    /// Returns the directives keyed by the deleted core node `source`.
    pub fn copy_and_paste_for(&self, source: usize) -> impl Iterator<Item = &CopyAndPaste> + '_ {
        self.copy_and_paste
            .iter()
            .filter(move |directive| directive.source == source)
    }

    fn context_of(&self, node: usize) -> Option<NodeContext> {
        self.nodes.get(node).map(|node| node.context)
    }

    /// Checks the rule structure and returns every problem found.
    pub fn is_consistent(&self) -> RuleConsistency {
        let mut status = RuleConsistency::CONSISTENT;
        if self.id.as_deref().map_or(true, str::is_empty) {
            status |= RuleConsistency::NO_RULE_ID;
        }
        for node in &self.nodes {
            if node.context == NodeContext::LabelChange && node.right_label.is_none() {
                status |= RuleConsistency::LABEL_CHANGE_WITHOUT_RIGHT_LABEL;
            }
        }
        for edge in &self.edges {
            match (self.context_of(edge.source), self.context_of(edge.target)) {
                (Some(a), Some(b)) => {
                    if !edge.context.admits_endpoints(a, b) {
                        status |= RuleConsistency::WRONG_EDGE_CONTEXT;
                    }
                }
                _ => status |= RuleConsistency::EDGE_ENDPOINT_OUT_OF_RANGE,
            }
        }
        for directive in &self.copy_and_paste {
            if self.context_of(directive.source) != Some(NodeContext::LeftOnly) {
                status |= RuleConsistency::COPY_AND_PASTE_SOURCE_NOT_LEFT_ONLY;
            }
            if !self
                .context_of(directive.paste_target)
                .map_or(false, |context| context.on_right())
            {
                status |= RuleConsistency::COPY_AND_PASTE_TARGET_NOT_RIGHT;
            }
            if let Some(filter) = &directive.target_filter {
                if filter.iter().any(|&node| node >= self.nodes.len()) {
                    status |= RuleConsistency::COPY_AND_PASTE_FILTER_OUT_OF_RANGE;
                }
            }
        }
        for constraint in &self.constraints {
            let on_left = constraint
                .nodes()
                .into_iter()
                .all(|node| self.context_of(node).map_or(false, |context| context.on_left()));
            if !on_left {
                status |= RuleConsistency::CONSTRAINT_NODE_NOT_LEFT;
            }
        }
        status
    }

    /// Returns the left side as a searchable pattern.
    pub fn left_side(&self) -> LeftSidePattern<'_> {
        LeftSidePattern::new(self)
    }

    /// Returns the right side as a plain graph view.
    pub fn right_side(&self) -> RightSidePattern<'_> {
        RightSidePattern::new(self)
    }
}
