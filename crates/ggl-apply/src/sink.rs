use ggl_aut::are_isomorphic;
use ggl_core::LabeledGraph;
use ggl_graph::{invariant_hash, Graph};
use indexmap::IndexMap;
use log::trace;

/// Receiver of result graphs. Called once per produced graph; the same
/// structure may arrive several times unless the sink deduplicates.
pub trait GraphSink {
    /// Takes ownership of one result graph.
    fn add(&mut self, graph: Graph);
}

impl<S: GraphSink + ?Sized> GraphSink for &mut S {
    fn add(&mut self, graph: Graph) {
        (**self).add(graph);
    }
}

impl GraphSink for Vec<Graph> {
    fn add(&mut self, graph: Graph) {
        self.push(graph);
    }
}

/// Keeps every graph in arrival order.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    graphs: Vec<Graph>,
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored graphs.
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// Number of stored graphs.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns whether nothing was stored.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Consumes the store.
    pub fn into_graphs(self) -> Vec<Graph> {
        self.graphs
    }
}

impl GraphSink for GraphStore {
    fn add(&mut self, graph: Graph) {
        self.graphs.push(graph);
    }
}

/// Counts graphs and drops them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounter {
    count: usize,
}

impl GraphCounter {
    /// Creates a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of graphs received.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl GraphSink for GraphCounter {
    fn add(&mut self, _graph: Graph) {
        self.count += 1;
    }
}

/// Keeps one representative per isomorphism class.
///
/// Graphs are bucketed by [`invariant_hash`]; within a bucket an exact
/// isomorphism test decides, so hash collisions never merge distinct graphs.
#[derive(Debug, Clone, Default)]
pub struct UniqueGraphSink {
    buckets: IndexMap<String, Vec<usize>>,
    graphs: Vec<Graph>,
    duplicates: usize,
}

impl UniqueGraphSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `graph` unless an isomorphic graph is already present.
    /// Returns whether it was new.
    pub fn insert(&mut self, graph: Graph) -> bool {
        let bucket = self.buckets.entry(invariant_hash(&graph)).or_default();
        if bucket
            .iter()
            .any(|&idx| are_isomorphic(&self.graphs[idx], &graph))
        {
            self.duplicates += 1;
            trace!("duplicate graph with {} nodes", graph.node_count());
            return false;
        }
        bucket.push(self.graphs.len());
        self.graphs.push(graph);
        true
    }

    /// Returns whether an isomorphic copy of `graph` is stored.
    pub fn contains(&self, graph: &Graph) -> bool {
        self.buckets
            .get(&invariant_hash(graph))
            .map_or(false, |bucket| {
                bucket
                    .iter()
                    .any(|&idx| are_isomorphic(&self.graphs[idx], graph))
            })
    }

    /// Returns the representatives in first-seen order.
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// Number of distinct graphs.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns whether nothing was stored.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Number of distinct hash buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of rejected duplicates.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Consumes the sink.
    pub fn into_graphs(self) -> Vec<Graph> {
        self.graphs
    }
}

impl GraphSink for UniqueGraphSink {
    fn add(&mut self, graph: Graph) {
        self.insert(graph);
    }
}
