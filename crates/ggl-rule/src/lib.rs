#![deny(missing_docs)]

//! Rewrite rules for the GGL graph-grammar engine.
//!
//! A [`Rule`] superimposes its left and right sides in one core graph whose
//! nodes and edges carry a context tag. [`LeftSidePattern`] and
//! [`RightSidePattern`] borrow the rule and expose one side with local node
//! numbering. Structural problems are reported as [`RuleConsistency`] flags
//! rather than errors.

mod consistency;
mod context;
mod rule;
mod serialization;
mod sides;

pub use consistency::RuleConsistency;
pub use context::{EdgeContext, NodeContext};
pub use rule::{CopyAndPaste, Rule, RuleEdge, RuleNode};
pub use serialization::{rule_from_json, rule_to_json, RULE_SCHEMA};
pub use sides::{LeftSidePattern, RightSidePattern};
