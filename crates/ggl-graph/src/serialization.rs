use ggl_core::errors::GglError;
use ggl_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Schema version written into every serialized graph.
pub const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, GglError> {
    let serializable = SerializableGraph::from(graph.clone());
    bincode::serialize(&serializable)
        .map_err(|err| GglError::serde("serialize-bytes", err.to_string()))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, GglError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| GglError::serde("deserialize-bytes", err.to_string()))?;
    Graph::try_from(serializable)
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, GglError> {
    serde_json::to_string_pretty(graph)
        .map_err(|err| GglError::serde("serialize-json", err.to_string()))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<Graph, GglError> {
    serde_json::from_str(json).map_err(|err| GglError::serde("deserialize-json", err.to_string()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SerializableGraph {
    schema_version: SchemaVersion,
    nodes: Vec<String>,
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableEdge {
    source: usize,
    target: usize,
    label: String,
}

impl From<Graph> for SerializableGraph {
    fn from(graph: Graph) -> Self {
        let edges = graph
            .edges()
            .map(|(_, edge)| SerializableEdge {
                source: edge.source,
                target: edge.target,
                label: edge.label.clone(),
            })
            .collect();
        Self {
            schema_version: GRAPH_SCHEMA,
            nodes: graph.node_labels().to_vec(),
            edges,
        }
    }
}

impl TryFrom<SerializableGraph> for Graph {
    type Error = GglError;

    fn try_from(value: SerializableGraph) -> Result<Self, Self::Error> {
        if !GRAPH_SCHEMA.is_compatible_with(&value.schema_version) {
            return Err(GglError::serde("schema-mismatch", "unsupported graph schema")
                .with_context("found", format!("{:?}", value.schema_version))
                .with_context("supported", format!("{GRAPH_SCHEMA:?}")));
        }
        Graph::from_parts(
            value.nodes,
            value
                .edges
                .into_iter()
                .map(|edge| (edge.source, edge.target, edge.label)),
        )
    }
}
