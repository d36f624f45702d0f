#![deny(missing_docs)]

//! Rule application for the GGL graph-grammar engine.
//!
//! [`apply_rule`] turns one match of a rule's left side into a fresh result
//! graph; the target is never modified. [`RuleApplier`] plugs application
//! into the matcher as a [`MatchReporter`](ggl_match::MatchReporter) and
//! pushes every result into a [`GraphSink`]. [`RuleEngine`] bundles rule
//! validation, symmetry breaking and matching behind one [`EngineConfig`],
//! and [`DepthFirstRewriter`] repeats match and apply until a goal graph
//! shows up.

mod applier;
mod apply;
mod config;
mod engine;
mod rewrite;
mod sink;
mod solver;

pub use applier::RuleApplier;
pub use apply::apply_rule;
pub use config::{ApplyConfig, EngineConfig};
pub use engine::{PreparedRule, RuleEngine};
pub use rewrite::{LabelRewrite, LabelRewriteMode, PreserveSuffix, ReplaceLabel};
pub use sink::{GraphCounter, GraphSink, GraphStore, UniqueGraphSink};
pub use solver::{DepthFirstRewriter, RewriteOutcome, SolverLimits};
