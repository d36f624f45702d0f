use std::collections::BTreeSet;

use ggl_core::LabeledGraph;
use serde::{Deserialize, Serialize};

/// Whether a label set lists the admitted or the rejected labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Only the listed labels are admitted.
    Allowed,
    /// Every label except the listed ones is admitted.
    Forbidden,
}

impl LabelMode {
    /// Returns whether `label` passes the set under this mode.
    pub fn admits(&self, labels: &BTreeSet<String>, label: &str) -> bool {
        match self {
            LabelMode::Allowed => labels.contains(label),
            LabelMode::Forbidden => !labels.contains(label),
        }
    }
}

/// Comparison operator of a [`MatchConstraint::NodeAdjacency`] constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AdjacencyOp {
    /// `==`
    #[serde(rename = "=")]
    Eq,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
}

impl AdjacencyOp {
    /// Applies the operator to `lhs op rhs`.
    pub fn compare(&self, lhs: usize, rhs: usize) -> bool {
        match self {
            AdjacencyOp::Eq => lhs == rhs,
            AdjacencyOp::Lt => lhs < rhs,
            AdjacencyOp::Le => lhs <= rhs,
            AdjacencyOp::Gt => lhs > rhs,
            AdjacencyOp::Ge => lhs >= rhs,
        }
    }
}

/// Additional requirement a match must satisfy beyond structure and labels.
///
/// Node references are pattern node indices. Labels inside constraints are
/// compared literally; the pattern wildcard does not apply to them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchConstraint {
    /// The image of `node` must carry an admitted label.
    NodeLabel {
        /// Constrained pattern node.
        node: usize,
        /// Label set interpreted through `mode`.
        labels: BTreeSet<String>,
        /// Allowed or forbidden semantics of `labels`.
        mode: LabelMode,
    },
    /// Every target edge between the images of `from` and `to` must carry an
    /// admitted label, and at least one such edge must exist.
    EdgeLabel {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// Label set interpreted through `mode`.
        labels: BTreeSet<String>,
        /// Allowed or forbidden semantics of `labels`.
        mode: LabelMode,
    },
    /// No target edge may connect the images of `from` and `to`.
    NoEdge {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
    },
    /// Bounds the number of filtered target edges around the image of `node`.
    ///
    /// An incident edge is counted when its label is in `edge_labels` and the
    /// label of its opposite endpoint is in `node_labels`; an empty set
    /// accepts everything. An ordinary edge counts as one occurrence, a
    /// self-loop as one half. The half-unit total is compared with
    /// `2 * count`, so a node with a single self-loop satisfies `> 0` and
    /// `< 1` but neither `= 0` nor `= 1`.
    NodeAdjacency {
        /// Constrained pattern node.
        node: usize,
        /// Comparison between the counted occurrences and `count`.
        op: AdjacencyOp,
        /// Right-hand side of the comparison.
        count: usize,
        /// Admitted labels of the opposite endpoint (empty = any).
        #[serde(default)]
        node_labels: BTreeSet<String>,
        /// Admitted labels of the counted edges (empty = any).
        #[serde(default)]
        edge_labels: BTreeSet<String>,
    },
}

impl MatchConstraint {
    /// Returns the pattern nodes referenced by the constraint.
    pub fn nodes(&self) -> Vec<usize> {
        match self {
            MatchConstraint::NodeLabel { node, .. } | MatchConstraint::NodeAdjacency { node, .. } => {
                vec![*node]
            }
            MatchConstraint::EdgeLabel { from, to, .. } | MatchConstraint::NoEdge { from, to } => {
                vec![*from, *to]
            }
        }
    }

    /// Rewrites every node reference through `map`; returns `None` as soon as
    /// one reference has no image.
    pub fn remapped(&self, map: impl Fn(usize) -> Option<usize>) -> Option<MatchConstraint> {
        let mut remapped = self.clone();
        match &mut remapped {
            MatchConstraint::NodeLabel { node, .. } | MatchConstraint::NodeAdjacency { node, .. } => {
                *node = map(*node)?;
            }
            MatchConstraint::EdgeLabel { from, to, .. } | MatchConstraint::NoEdge { from, to } => {
                *from = map(*from)?;
                *to = map(*to)?;
            }
        }
        Some(remapped)
    }

    /// Relabels node references through a permutation of the pattern nodes.
    ///
    /// References outside `perm` are kept as they are.
    pub fn permuted(&self, perm: &[usize]) -> MatchConstraint {
        self.remapped(|node| Some(perm.get(node).copied().unwrap_or(node)))
            .unwrap_or_else(|| self.clone())
    }

    /// Evaluates the constraint against a partial mapping
    /// (`mapping[pattern_node] = Some(target_node)`).
    ///
    /// A constraint whose nodes are not all mapped yet is satisfied.
    pub fn is_valid_match(&self, target: &dyn LabeledGraph, mapping: &[Option<usize>]) -> bool {
        let image = |node: usize| mapping.get(node).copied().flatten();
        match self {
            MatchConstraint::NodeLabel { node, labels, mode } => match image(*node) {
                Some(t) => mode.admits(labels, target.node_label(t)),
                None => true,
            },
            MatchConstraint::EdgeLabel {
                from,
                to,
                labels,
                mode,
            } => match (image(*from), image(*to)) {
                (Some(a), Some(b)) => {
                    let between = target.edge_labels_between(a, b);
                    !between.is_empty() && between.iter().all(|label| mode.admits(labels, label))
                }
                _ => true,
            },
            MatchConstraint::NoEdge { from, to } => match (image(*from), image(*to)) {
                (Some(a), Some(b)) => !target.has_edge(a, b),
                _ => true,
            },
            MatchConstraint::NodeAdjacency {
                node,
                op,
                count,
                node_labels,
                edge_labels,
            } => match image(*node) {
                Some(t) => {
                    let halves = adjacency_halves(target, t, node_labels, edge_labels);
                    op.compare(halves, count.saturating_mul(2))
                }
                None => true,
            },
        }
    }
}

/// Counts filtered incident edges of `node` in half units: two per ordinary
/// edge, one per self-loop.
fn adjacency_halves(
    target: &dyn LabeledGraph,
    node: usize,
    node_labels: &BTreeSet<String>,
    edge_labels: &BTreeSet<String>,
) -> usize {
    target
        .incident_edges(node)
        .filter(|edge| edge_labels.is_empty() || edge_labels.contains(edge.label))
        .filter(|edge| node_labels.is_empty() || node_labels.contains(target.node_label(edge.to)))
        .map(|edge| if edge.is_self_loop() { 1 } else { 2 })
        .sum()
}
