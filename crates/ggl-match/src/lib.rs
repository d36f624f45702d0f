#![deny(missing_docs)]

//! Subgraph matching for the GGL graph-grammar engine.
//!
//! A [`Pattern`] is a labeled graph with an optional wildcard label and a
//! list of [`MatchConstraint`]s. [`SubgraphMatcher`] enumerates injective
//! embeddings of patterns into a target with a frontier-first, VF2-style
//! backtracking search and hands each one to a [`MatchReporter`]. Reporters
//! steer the search through [`Decision`](ggl_core::Decision) values.

mod config;
mod constraints;
mod matcher;
mod order;
mod pattern;
mod reporter;

pub use config::MatchConfig;
pub use constraints::{AdjacencyOp, LabelMode, MatchConstraint};
pub use matcher::SubgraphMatcher;
pub use order::AutomorphismOrder;
pub use pattern::{GraphPattern, Pattern};
pub use reporter::{Match, MatchCounter, MatchReporter, MatchStore};

/// Returns whether a pattern label accepts a target label under `wildcard`.
pub fn label_matches(wildcard: Option<&str>, pattern_label: &str, target_label: &str) -> bool {
    pattern_label == target_label || wildcard == Some(pattern_label)
}
