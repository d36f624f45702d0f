use ggl_match::{AutomorphismOrder, MatchConfig, Pattern};
use log::debug;

use crate::automorphisms::find_automorphisms;

/// Derives [`AutomorphismOrder`]s for patterns according to a
/// [`MatchConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetryBreaker {
    enabled: bool,
    limit: usize,
}

impl SymmetryBreaker {
    /// Creates a breaker honouring `symmetry_breaking` and
    /// `max_automorphisms` of the configuration.
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            enabled: config.symmetry_breaking,
            limit: config.max_automorphisms,
        }
    }

    /// Returns whether orders are derived at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the order constraint for `pattern`; trivial when disabled or
    /// when the pattern has no symmetry.
    pub fn order_for(&self, pattern: &dyn Pattern) -> AutomorphismOrder {
        if !self.enabled {
            return AutomorphismOrder::trivial(pattern.node_count());
        }
        let automorphisms = find_automorphisms(pattern, self.limit);
        let order = automorphisms.order();
        debug!(
            "symmetry order with {} permutations (truncated: {})",
            order.permutations().len(),
            automorphisms.is_truncated()
        );
        order
    }

    /// Shorthand for `SymmetryBreaker::new(config).order_for(pattern)`.
    pub fn for_pattern(pattern: &dyn Pattern, config: &MatchConfig) -> AutomorphismOrder {
        Self::new(config).order_for(pattern)
    }
}
