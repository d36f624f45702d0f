#![deny(missing_docs)]
#![doc = "Core traits and data types shared by the GGL graph-grammar engine crates."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod ring;
pub mod rng;

pub use errors::{ErrorInfo, GglError};
pub use provenance::SchemaVersion;
pub use ring::{RingReporter, RingStore};
pub use rng::RngHandle;

/// Identifier for an edge within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Creates a new identifier from its raw slot index.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw slot index of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// One incident edge as seen from the node it was requested for.
///
/// `from` is always the queried node; for a self-loop `to == from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView<'a> {
    /// The node whose incidence list produced this view.
    pub from: usize,
    /// The opposite endpoint.
    pub to: usize,
    /// Edge label.
    pub label: &'a str,
}

impl EdgeView<'_> {
    /// Returns whether both endpoints coincide.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Read-only contract of an undirected labeled multigraph with contiguous
/// node indices `0..node_count()`.
///
/// A self-loop is listed once in the incidence list of its node, so it adds
/// one to [`LabeledGraph::degree`]. Parallel edges are listed individually.
pub trait LabeledGraph {
    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the number of edges (self-loops and parallel edges included).
    fn edge_count(&self) -> usize;

    /// Returns the label of `node`. Panics if `node >= node_count()`.
    fn node_label(&self, node: usize) -> &str;

    /// Returns the edges incident to `node`.
    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_>;

    /// Returns the number of incident edge entries of `node`.
    fn degree(&self, node: usize) -> usize {
        self.incident_edges(node).count()
    }

    /// Returns the number of self-loops attached to `node`.
    fn self_loop_count(&self, node: usize) -> usize {
        self.incident_edges(node)
            .filter(|edge| edge.is_self_loop())
            .count()
    }

    /// Returns the labels of all edges connecting `a` and `b` (with multiplicity).
    fn edge_labels_between(&self, a: usize, b: usize) -> Vec<&str> {
        self.incident_edges(a)
            .filter(|edge| edge.to == b)
            .map(|edge| edge.label)
            .collect()
    }

    /// Returns whether at least one edge connects `a` and `b`.
    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.incident_edges(a).any(|edge| edge.to == b)
    }
}

impl<G: LabeledGraph + ?Sized> LabeledGraph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn node_label(&self, node: usize) -> &str {
        (**self).node_label(node)
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        (**self).incident_edges(node)
    }

    fn degree(&self, node: usize) -> usize {
        (**self).degree(node)
    }

    fn self_loop_count(&self, node: usize) -> usize {
        (**self).self_loop_count(node)
    }
}

/// Decision returned by reporters after each reported result.
///
/// Search drivers thread this value back through their recursion instead of
/// unwinding, so an early exit never leaves partial state behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Decision {
    /// Keep searching.
    #[default]
    Continue,
    /// Abandon the remaining results of the current pattern and continue
    /// with the next one.
    Backtrack,
    /// End the whole search call.
    Stop,
}

impl Decision {
    /// Returns whether the decision ends the whole search call.
    pub fn is_stop(&self) -> bool {
        matches!(self, Decision::Stop)
    }
}
