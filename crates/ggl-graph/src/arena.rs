use std::collections::BTreeSet;

use ggl_core::errors::GglError;
use ggl_core::{EdgeId, LabeledGraph};
use log::trace;

use crate::graph::{EdgeRecord, Graph};

#[derive(Debug, Clone)]
struct NodeSlot {
    alive: bool,
    label: String,
    incident: BTreeSet<EdgeId>,
}

impl NodeSlot {
    fn new(label: String) -> Self {
        Self {
            alive: true,
            label,
            incident: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct EdgeSlot {
    alive: bool,
    record: EdgeRecord,
}

/// Editable slot arena over a labeled multigraph.
///
/// Removed nodes and edges become tombstones: their slot indices stay
/// reserved until [`ArenaGraph::compact`] renumbers the survivors. A node can
/// only be removed once it has no incident edges left.
#[derive(Debug, Clone, Default)]
pub struct ArenaGraph {
    nodes: Vec<NodeSlot>,
    edges: Vec<EdgeSlot>,
}

impl ArenaGraph {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena holding a copy of `graph` with identical indices.
    pub fn from_graph(graph: &dyn LabeledGraph) -> Self {
        let mut arena = ArenaGraph::new();
        let keep = vec![true; graph.node_count()];
        arena.extend_from(graph, &keep);
        arena
    }

    /// Copies the nodes of `graph` flagged in `keep`, plus every edge whose
    /// endpoints are both kept. Returns the slot assigned to each source node.
    pub fn extend_from(&mut self, graph: &dyn LabeledGraph, keep: &[bool]) -> Vec<Option<usize>> {
        let mut slots = vec![None; graph.node_count()];
        for (node, slot) in slots.iter_mut().enumerate() {
            if keep.get(node).copied().unwrap_or(false) {
                *slot = Some(self.add_node(graph.node_label(node)));
            }
        }
        for node in 0..graph.node_count() {
            let Some(source) = slots[node] else {
                continue;
            };
            for edge in graph.incident_edges(node) {
                if edge.to < node {
                    continue;
                }
                if let Some(target) = slots[edge.to] {
                    self.push_edge(source, target, edge.label.to_owned());
                }
            }
        }
        slots
    }

    /// Adds a node and returns its slot.
    pub fn add_node(&mut self, label: impl Into<String>) -> usize {
        self.nodes.push(NodeSlot::new(label.into()));
        self.nodes.len() - 1
    }

    /// Adds an edge between two alive nodes.
    pub fn add_edge(
        &mut self,
        source: usize,
        target: usize,
        label: impl Into<String>,
    ) -> Result<EdgeId, GglError> {
        self.node(source)?;
        self.node(target)?;
        Ok(self.push_edge(source, target, label.into()))
    }

    fn push_edge(&mut self, source: usize, target: usize, label: String) -> EdgeId {
        let id = EdgeId::from_raw(self.edges.len());
        self.edges.push(EdgeSlot {
            alive: true,
            record: EdgeRecord {
                source,
                target,
                label,
            },
        });
        self.nodes[source].incident.insert(id);
        self.nodes[target].incident.insert(id);
        id
    }

    /// Returns whether `node` refers to an alive slot.
    pub fn is_alive(&self, node: usize) -> bool {
        self.nodes.get(node).map(|slot| slot.alive).unwrap_or(false)
    }

    /// Returns the number of alive nodes.
    pub fn alive_node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.alive).count()
    }

    /// Returns the number of alive edges.
    pub fn alive_edge_count(&self) -> usize {
        self.edges.iter().filter(|slot| slot.alive).count()
    }

    /// Returns the label of an alive node.
    pub fn node_label(&self, node: usize) -> Result<&str, GglError> {
        Ok(self.node(node)?.label.as_str())
    }

    /// Replaces the label of an alive node.
    pub fn set_label(&mut self, node: usize, label: impl Into<String>) -> Result<(), GglError> {
        self.node_mut(node)?.label = label.into();
        Ok(())
    }

    /// Returns the alive edge stored under `id`.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeRecord, GglError> {
        self.edges
            .get(id.as_raw())
            .filter(|slot| slot.alive)
            .map(|slot| &slot.record)
            .ok_or_else(|| {
                GglError::graph("unknown-edge", "edge does not exist").with_context("edge", id.as_raw())
            })
    }

    /// Returns the edges incident to `node`, self-loops included once.
    pub fn incident(&self, node: usize) -> Result<Vec<EdgeId>, GglError> {
        Ok(self.node(node)?.incident.iter().copied().collect())
    }

    /// Returns the self-loops attached to `node`.
    pub fn self_loops(&self, node: usize) -> Result<Vec<EdgeId>, GglError> {
        let slot = self.node(node)?;
        Ok(slot
            .incident
            .iter()
            .copied()
            .filter(|id| self.edges[id.as_raw()].record.is_self_loop())
            .collect())
    }

    /// Returns the alive edges connecting `a` and `b`.
    pub fn edges_between(&self, a: usize, b: usize) -> Result<Vec<EdgeId>, GglError> {
        self.node(b)?;
        let slot = self.node(a)?;
        Ok(slot
            .incident
            .iter()
            .copied()
            .filter(|id| self.edges[id.as_raw()].record.connects(a, b))
            .collect())
    }

    /// Returns an alive edge between `a` and `b` carrying `label`, if any.
    pub fn find_edge(&self, a: usize, b: usize, label: &str) -> Result<Option<EdgeId>, GglError> {
        Ok(self
            .edges_between(a, b)?
            .into_iter()
            .find(|id| self.edges[id.as_raw()].record.label == label))
    }

    /// Removes an alive edge and returns its record.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeRecord, GglError> {
        let record = self.edge(id)?.clone();
        self.edges[id.as_raw()].alive = false;
        self.nodes[record.source].incident.remove(&id);
        self.nodes[record.target].incident.remove(&id);
        trace!(
            "removed edge {} ({}-{} '{}')",
            id.as_raw(),
            record.source,
            record.target,
            record.label
        );
        Ok(record)
    }

    /// Removes an isolated alive node.
    pub fn remove_node(&mut self, node: usize) -> Result<(), GglError> {
        let slot = self.node(node)?;
        if !slot.incident.is_empty() {
            return Err(
                GglError::graph("node-not-isolated", "cannot remove node with incident edges")
                    .with_context("node", node)
                    .with_context("incident", slot.incident.len()),
            );
        }
        self.nodes[node].alive = false;
        Ok(())
    }

    /// Renumbers the alive slots into a contiguous [`Graph`].
    ///
    /// Returns the graph and, per arena slot, its new index (`None` for tombstones).
    pub fn compact(&self) -> (Graph, Vec<Option<usize>>) {
        let mut graph = Graph::with_capacity(self.alive_node_count(), self.alive_edge_count());
        let mut remap = vec![None; self.nodes.len()];
        for (slot, node) in self.nodes.iter().enumerate() {
            if node.alive {
                remap[slot] = Some(graph.add_node(node.label.clone()));
            }
        }
        for edge in self.edges.iter().filter(|edge| edge.alive) {
            if let (Some(source), Some(target)) =
                (remap[edge.record.source], remap[edge.record.target])
            {
                // alive edges only ever connect alive nodes
                let _ = graph.add_edge(source, target, edge.record.label.clone());
            }
        }
        (graph, remap)
    }

    fn node(&self, node: usize) -> Result<&NodeSlot, GglError> {
        self.nodes
            .get(node)
            .filter(|slot| slot.alive)
            .ok_or_else(|| GglError::graph("unknown-node", "node does not exist").with_context("node", node))
    }

    fn node_mut(&mut self, node: usize) -> Result<&mut NodeSlot, GglError> {
        self.nodes
            .get_mut(node)
            .filter(|slot| slot.alive)
            .ok_or_else(|| GglError::graph("unknown-node", "node does not exist").with_context("node", node))
    }
}
