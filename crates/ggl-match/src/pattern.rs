use ggl_core::errors::GglError;
use ggl_core::{EdgeView, LabeledGraph};

use crate::constraints::MatchConstraint;

/// A searchable query: a labeled graph plus constraints and wildcard.
pub trait Pattern: LabeledGraph {
    /// Returns the constraints in pattern node indices.
    fn constraints(&self) -> &[MatchConstraint];

    /// Returns the label that matches any target label, if configured.
    fn wildcard(&self) -> Option<&str>;
}

impl<P: Pattern + ?Sized> Pattern for &P {
    fn constraints(&self) -> &[MatchConstraint] {
        (**self).constraints()
    }

    fn wildcard(&self) -> Option<&str> {
        (**self).wildcard()
    }
}

/// Wraps any [`LabeledGraph`] as a [`Pattern`].
#[derive(Debug, Clone)]
pub struct GraphPattern<G> {
    graph: G,
    constraints: Vec<MatchConstraint>,
    wildcard: Option<String>,
}

impl<G: LabeledGraph> GraphPattern<G> {
    /// Creates a pattern without constraints or wildcard.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            constraints: Vec::new(),
            wildcard: None,
        }
    }

    /// Sets the wildcard label.
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = Some(wildcard.into());
        self
    }

    /// Adds a constraint after checking its node references.
    pub fn with_constraint(mut self, constraint: MatchConstraint) -> Result<Self, GglError> {
        let node_count = self.graph.node_count();
        if let Some(node) = constraint.nodes().into_iter().find(|&node| node >= node_count) {
            return Err(GglError::matching(
                "constraint-node-out-of-range",
                "constraint references a node outside the pattern",
            )
            .with_context("node", node)
            .with_context("nodes", node_count));
        }
        self.constraints.push(constraint);
        Ok(self)
    }

    /// Returns the wrapped graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Consumes the wrapper and returns the graph.
    pub fn into_inner(self) -> G {
        self.graph
    }
}

impl<G: LabeledGraph> LabeledGraph for GraphPattern<G> {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_label(&self, node: usize) -> &str {
        self.graph.node_label(node)
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        self.graph.incident_edges(node)
    }

    fn degree(&self, node: usize) -> usize {
        self.graph.degree(node)
    }
}

impl<G: LabeledGraph> Pattern for GraphPattern<G> {
    fn constraints(&self) -> &[MatchConstraint] {
        &self.constraints
    }

    fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }
}
