#![deny(missing_docs)]

//! Labeled undirected multigraphs for the GGL graph-grammar engine.
//!
//! [`Graph`] is the compact, contiguous representation every search runs
//! on. [`ArenaGraph`] is its editable counterpart: node and edge slots are
//! tombstoned on removal and never recycled, and [`ArenaGraph::compact`]
//! turns the result of an edit episode back into a [`Graph`].
//! [`GraphOfGraphs`] joins several hosts into one logical target.

mod arena;
mod composite;
mod generators;
mod graph;
mod hash;
mod serialization;

pub use arena::ArenaGraph;
pub use composite::GraphOfGraphs;
pub use generators::{gen_cycle, gen_grid, gen_random_labeled, permute_nodes};
pub use graph::{component_ids, EdgeRecord, Graph};
pub use hash::invariant_hash;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, GRAPH_SCHEMA};
