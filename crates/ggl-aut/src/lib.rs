#![deny(missing_docs)]

//! Automorphism analysis of match patterns.
//!
//! Automorphisms are found by matching a pattern against itself with the
//! regular [`ggl_match::SubgraphMatcher`]; only permutations that also map
//! the constraint set onto itself are kept. The resulting
//! [`AutomorphismOrder`](ggl_match::AutomorphismOrder) suppresses symmetric
//! duplicate matches during search.

mod automorphisms;
mod breaker;
mod isomorphism;

pub use automorphisms::{find_automorphisms, AutomorphismReport, AutomorphismSet};
pub use breaker::SymmetryBreaker;
pub use isomorphism::are_isomorphic;
