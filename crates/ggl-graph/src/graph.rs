use ggl_core::errors::GglError;
use ggl_core::{EdgeId, EdgeView, LabeledGraph};
use serde::{Deserialize, Serialize};

use crate::serialization::SerializableGraph;

/// Stored edge with its (unordered) endpoints and label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// First endpoint as given on insertion.
    pub source: usize,
    /// Second endpoint as given on insertion.
    pub target: usize,
    /// Edge label.
    pub label: String,
}

impl EdgeRecord {
    /// Returns the endpoint opposite to `node`.
    pub fn other(&self, node: usize) -> usize {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }

    /// Returns whether both endpoints coincide.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns whether the edge connects `a` and `b` (in either direction).
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Compact labeled undirected multigraph with contiguous node indices.
///
/// Nodes and edges can only be appended; indices are stable for the
/// lifetime of the value. Edit episodes go through [`crate::ArenaGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SerializableGraph", into = "SerializableGraph")]
pub struct Graph {
    labels: Vec<String>,
    edges: Vec<EdgeRecord>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with preallocated storage.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            labels: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            adjacency: Vec::with_capacity(nodes),
        }
    }

    /// Builds a graph from node labels and `(source, target, label)` triples.
    pub fn from_parts<L, E>(labels: L, edges: E) -> Result<Self, GglError>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        E: IntoIterator<Item = (usize, usize, String)>,
    {
        let mut graph = Graph::new();
        for label in labels {
            graph.add_node(label);
        }
        for (source, target, label) in edges {
            graph.add_edge(source, target, label)?;
        }
        Ok(graph)
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, label: impl Into<String>) -> usize {
        let index = self.labels.len();
        self.labels.push(label.into());
        self.adjacency.push(Vec::new());
        index
    }

    /// Appends an edge between two existing nodes.
    ///
    /// Self-loops and parallel edges are kept as distinct edges.
    pub fn add_edge(
        &mut self,
        source: usize,
        target: usize,
        label: impl Into<String>,
    ) -> Result<EdgeId, GglError> {
        self.ensure_node(source)?;
        self.ensure_node(target)?;
        let id = EdgeId::from_raw(self.edges.len());
        self.edges.push(EdgeRecord {
            source,
            target,
            label: label.into(),
        });
        self.adjacency[source].push(id);
        if source != target {
            self.adjacency[target].push(id);
        }
        Ok(id)
    }

    /// Replaces the label of an existing node.
    pub fn set_node_label(&mut self, node: usize, label: impl Into<String>) -> Result<(), GglError> {
        self.ensure_node(node)?;
        self.labels[node] = label.into();
        Ok(())
    }

    /// Returns the node labels in index order.
    pub fn node_labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns `(index, label)` for every node.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx, label.as_str()))
    }

    /// Returns the edge stored under `id`, if any.
    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRecord> {
        self.edges.get(id.as_raw())
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeRecord)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| (EdgeId::from_raw(idx), edge))
    }

    /// Returns the identifiers of the edges incident to `node`.
    pub fn incident(&self, node: usize) -> Result<&[EdgeId], GglError> {
        self.ensure_node(node)?;
        Ok(&self.adjacency[node])
    }

    /// Returns whether the graph contains neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Assigns every node the index of its connected component.
    ///
    /// Components are numbered in order of their smallest node index.
    /// Returns the per-node component ids and the number of components.
    pub fn component_ids(&self) -> (Vec<usize>, usize) {
        component_ids(self)
    }

    /// Returns the node sets of all connected components.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let (ids, count) = self.component_ids();
        let mut components = vec![Vec::new(); count];
        for (node, component) in ids.into_iter().enumerate() {
            components[component].push(node);
        }
        components
    }

    /// Appends a disjoint copy of `other` and returns the index offset of its nodes.
    pub fn append(&mut self, other: &Graph) -> usize {
        let offset = self.labels.len();
        for label in &other.labels {
            self.add_node(label.clone());
        }
        for edge in &other.edges {
            let id = EdgeId::from_raw(self.edges.len());
            let source = edge.source + offset;
            let target = edge.target + offset;
            self.edges.push(EdgeRecord {
                source,
                target,
                label: edge.label.clone(),
            });
            self.adjacency[source].push(id);
            if source != target {
                self.adjacency[target].push(id);
            }
        }
        offset
    }

    fn ensure_node(&self, node: usize) -> Result<(), GglError> {
        if node < self.labels.len() {
            Ok(())
        } else {
            Err(GglError::graph("unknown-node", "node does not exist")
                .with_context("node", node)
                .with_context("nodes", self.labels.len()))
        }
    }
}

impl LabeledGraph for Graph {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        Box::new(self.adjacency[node].iter().map(move |id| {
            let edge = &self.edges[id.as_raw()];
            EdgeView {
                from: node,
                to: edge.other(node),
                label: edge.label.as_str(),
            }
        }))
    }

    fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }
}

/// Assigns every node of `graph` the index of its connected component,
/// numbering components in order of their smallest node.
pub fn component_ids(graph: &dyn LabeledGraph) -> (Vec<usize>, usize) {
    let node_count = graph.node_count();
    let mut parent: Vec<usize> = (0..node_count).collect();
    for node in 0..node_count {
        for edge in graph.incident_edges(node) {
            union(&mut parent, edge.from, edge.to);
        }
    }
    let mut ids = vec![usize::MAX; node_count];
    let mut root_ids = vec![usize::MAX; node_count];
    let mut count = 0;
    for node in 0..node_count {
        let root = find(&mut parent, node);
        if root_ids[root] == usize::MAX {
            root_ids[root] = count;
            count += 1;
        }
        ids[node] = root_ids[root];
    }
    (ids, count)
}

pub(crate) fn find(parent: &mut [usize], idx: usize) -> usize {
    if parent[idx] != idx {
        let root = find(parent, parent[idx]);
        parent[idx] = root;
    }
    parent[idx]
}

pub(crate) fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        parent[rb] = ra;
    }
}
