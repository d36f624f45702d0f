use std::collections::VecDeque;

use ggl_core::errors::GglError;
use ggl_core::{EdgeView, LabeledGraph};
use ggl_graph::Graph;
use ggl_match::{MatchConstraint, Pattern};
use log::debug;

use crate::context::{EdgeContext, NodeContext};
use crate::rule::Rule;

/// Local numbering of one side of a rule.
#[derive(Debug, Clone)]
struct SideIndex {
    to_core: Vec<usize>,
    from_core: Vec<Option<usize>>,
    /// Rule edge indices per local node; self-loops listed once.
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl SideIndex {
    fn build(
        rule: &Rule,
        node_on_side: impl Fn(NodeContext) -> bool,
        edge_on_side: impl Fn(EdgeContext) -> bool,
    ) -> Self {
        let mut to_core = Vec::new();
        let mut from_core = vec![None; rule.nodes.len()];
        for (core, node) in rule.nodes.iter().enumerate() {
            if node_on_side(node.context) {
                from_core[core] = Some(to_core.len());
                to_core.push(core);
            }
        }
        let mut adjacency = vec![Vec::new(); to_core.len()];
        let mut edge_count = 0;
        for (edge_idx, edge) in rule.edges.iter().enumerate() {
            if !edge_on_side(edge.context) {
                continue;
            }
            let endpoints = (
                from_core.get(edge.source).copied().flatten(),
                from_core.get(edge.target).copied().flatten(),
            );
            let (Some(a), Some(b)) = endpoints else {
                debug!("edge {edge_idx} of rule {:?} skipped: endpoint not on this side", rule.id);
                continue;
            };
            adjacency[a].push(edge_idx);
            if a != b {
                adjacency[b].push(edge_idx);
            }
            edge_count += 1;
        }
        Self {
            to_core,
            from_core,
            adjacency,
            edge_count,
        }
    }

    fn incident<'a>(&'a self, rule: &'a Rule, node: usize) -> Box<dyn Iterator<Item = EdgeView<'a>> + 'a> {
        let core = self.to_core[node];
        Box::new(self.adjacency[node].iter().filter_map(move |&edge_idx| {
            let edge = &rule.edges[edge_idx];
            let other = self.from_core[edge.other(core)]?;
            Some(EdgeView {
                from: node,
                to: other,
                label: edge.label.as_str(),
            })
        }))
    }

    fn components(&self, rule: &Rule) -> Vec<Vec<usize>> {
        let node_count = self.to_core.len();
        let mut seen = vec![false; node_count];
        let mut components = Vec::new();
        for start in 0..node_count {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                for edge in self.incident(rule, node) {
                    if !seen[edge.to] {
                        seen[edge.to] = true;
                        component.push(edge.to);
                        queue.push_back(edge.to);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }
}

/// Left side of a rule as a searchable [`Pattern`].
///
/// Contains the context, label-change and left-only nodes with their left
/// labels, the context and left-only edges, and the rule constraints
/// translated to local indices.
#[derive(Debug, Clone)]
pub struct LeftSidePattern<'r> {
    rule: &'r Rule,
    index: SideIndex,
    constraints: Vec<MatchConstraint>,
}

impl<'r> LeftSidePattern<'r> {
    /// Builds the left side view of `rule`.
    pub fn new(rule: &'r Rule) -> Self {
        let index = SideIndex::build(rule, |context| context.on_left(), |context| context.on_left());
        let constraints = rule
            .constraints
            .iter()
            .filter_map(|constraint| {
                let local =
                    constraint.remapped(|core| index.from_core.get(core).copied().flatten());
                if local.is_none() {
                    debug!("constraint {constraint:?} dropped: node not on the left side");
                }
                local
            })
            .collect();
        Self {
            rule,
            index,
            constraints,
        }
    }

    /// Returns the rule the view borrows.
    pub fn rule(&self) -> &'r Rule {
        self.rule
    }

    /// Maps a local node index to its core index.
    pub fn to_core(&self, local: usize) -> usize {
        self.index.to_core[local]
    }

    /// Maps a core node index to its local index, if on this side.
    pub fn from_core(&self, core: usize) -> Option<usize> {
        self.index.from_core.get(core).copied().flatten()
    }

    /// Returns the connected components in local indices, ordered by their
    /// smallest node.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        self.index.components(self.rule)
    }
}

impl LabeledGraph for LeftSidePattern<'_> {
    fn node_count(&self) -> usize {
        self.index.to_core.len()
    }

    fn edge_count(&self) -> usize {
        self.index.edge_count
    }

    fn node_label(&self, node: usize) -> &str {
        &self.rule.nodes[self.index.to_core[node]].label
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        self.index.incident(self.rule, node)
    }

    fn degree(&self, node: usize) -> usize {
        self.index.adjacency[node].len()
    }
}

impl Pattern for LeftSidePattern<'_> {
    fn constraints(&self) -> &[MatchConstraint] {
        &self.constraints
    }

    fn wildcard(&self) -> Option<&str> {
        self.rule.wildcard()
    }
}

/// Right side of a rule as a plain labeled graph.
///
/// Contains the context, label-change and right-only nodes with their right
/// labels and the context and right-only edges.
#[derive(Debug, Clone)]
pub struct RightSidePattern<'r> {
    rule: &'r Rule,
    index: SideIndex,
}

impl<'r> RightSidePattern<'r> {
    /// Builds the right side view of `rule`.
    pub fn new(rule: &'r Rule) -> Self {
        let index = SideIndex::build(rule, |context| context.on_right(), |context| context.on_right());
        Self { rule, index }
    }

    /// Returns the rule the view borrows.
    pub fn rule(&self) -> &'r Rule {
        self.rule
    }

    /// Maps a local node index to its core index.
    pub fn to_core(&self, local: usize) -> usize {
        self.index.to_core[local]
    }

    /// Maps a core node index to its local index, if on this side.
    pub fn from_core(&self, core: usize) -> Option<usize> {
        self.index.from_core.get(core).copied().flatten()
    }

    /// Copies the view into an owned [`Graph`] with the same numbering.
    pub fn to_graph(&self) -> Result<Graph, GglError> {
        let mut graph = Graph::with_capacity(self.node_count(), self.edge_count());
        for node in 0..self.node_count() {
            graph.add_node(self.node_label(node));
        }
        for node in 0..self.node_count() {
            for edge in self.incident_edges(node) {
                if edge.from <= edge.to {
                    graph.add_edge(edge.from, edge.to, edge.label)?;
                }
            }
        }
        Ok(graph)
    }
}

impl LabeledGraph for RightSidePattern<'_> {
    fn node_count(&self) -> usize {
        self.index.to_core.len()
    }

    fn edge_count(&self) -> usize {
        self.index.edge_count
    }

    fn node_label(&self, node: usize) -> &str {
        let rule_node = &self.rule.nodes[self.index.to_core[node]];
        rule_node.right_label().unwrap_or(&rule_node.label)
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        self.index.incident(self.rule, node)
    }

    fn degree(&self, node: usize) -> usize {
        self.index.adjacency[node].len()
    }
}
