use ggl_core::{EdgeView, LabeledGraph};

use crate::graph::Graph;

/// Several independent host graphs exposed as one logical target.
///
/// Global indices enumerate the nodes of the first graph, then those of the
/// second, and so on. No edge ever connects two different hosts.
pub struct GraphOfGraphs<'g> {
    graphs: Vec<&'g dyn LabeledGraph>,
    offsets: Vec<usize>,
    node_total: usize,
    edge_total: usize,
}

impl<'g> GraphOfGraphs<'g> {
    /// Creates an empty composition.
    pub fn new() -> Self {
        Self {
            graphs: Vec::new(),
            offsets: Vec::new(),
            node_total: 0,
            edge_total: 0,
        }
    }

    /// Composes the provided graphs in order.
    pub fn from_graphs(graphs: impl IntoIterator<Item = &'g dyn LabeledGraph>) -> Self {
        let mut composite = Self::new();
        for graph in graphs {
            composite.push(graph);
        }
        composite
    }

    /// Appends a host graph and returns its graph id.
    pub fn push(&mut self, graph: &'g dyn LabeledGraph) -> usize {
        self.offsets.push(self.node_total);
        self.node_total += graph.node_count();
        self.edge_total += graph.edge_count();
        self.graphs.push(graph);
        self.graphs.len() - 1
    }

    /// Returns the number of composed host graphs.
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Returns the host graph with the given id.
    pub fn graph(&self, graph_id: usize) -> Option<&'g dyn LabeledGraph> {
        self.graphs.get(graph_id).copied()
    }

    /// Maps a global node index to `(graph id, local index)`.
    pub fn to_local(&self, global: usize) -> Option<(usize, usize)> {
        if global >= self.node_total {
            return None;
        }
        // offsets are non-decreasing; empty hosts share an offset with their successor
        let graph_id = self.offsets.partition_point(|&offset| offset <= global) - 1;
        Some((graph_id, global - self.offsets[graph_id]))
    }

    /// Maps `(graph id, local index)` to the global node index.
    pub fn to_global(&self, graph_id: usize, local: usize) -> Option<usize> {
        let graph = self.graphs.get(graph_id)?;
        (local < graph.node_count()).then(|| self.offsets[graph_id] + local)
    }

    /// Flattens the composition into a single owned [`Graph`] with the same
    /// global numbering.
    pub fn to_graph(&self) -> Graph {
        let mut graph = Graph::with_capacity(self.node_total, self.edge_total);
        for node in 0..self.node_total {
            graph.add_node(self.node_label(node));
        }
        for node in 0..self.node_total {
            for edge in self.incident_edges(node) {
                if edge.from <= edge.to {
                    // endpoints come from this composition and are in range
                    let _ = graph.add_edge(edge.from, edge.to, edge.label);
                }
            }
        }
        graph
    }
}

impl Default for GraphOfGraphs<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl LabeledGraph for GraphOfGraphs<'_> {
    fn node_count(&self) -> usize {
        self.node_total
    }

    fn edge_count(&self) -> usize {
        self.edge_total
    }

    fn node_label(&self, node: usize) -> &str {
        let (graph_id, local) = self
            .to_local(node)
            .unwrap_or_else(|| panic!("node {node} out of range"));
        self.graphs[graph_id].node_label(local)
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        let Some((graph_id, local)) = self.to_local(node) else {
            return Box::new(std::iter::empty());
        };
        let offset = self.offsets[graph_id];
        Box::new(
            self.graphs[graph_id]
                .incident_edges(local)
                .map(move |edge| EdgeView {
                    from: node,
                    to: edge.to + offset,
                    label: edge.label,
                }),
        )
    }

    fn degree(&self, node: usize) -> usize {
        match self.to_local(node) {
            Some((graph_id, local)) => self.graphs[graph_id].degree(local),
            None => 0,
        }
    }
}
