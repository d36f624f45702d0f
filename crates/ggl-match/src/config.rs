use ggl_core::errors::GglError;
use serde::{Deserialize, Serialize};

/// Knobs controlling a matching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Global cap on reported hits per call. `usize::MAX` means unbounded
    /// and `0` reports nothing.
    pub max_hits: usize,
    /// Whether callers should derive an automorphism order for each pattern
    /// so that symmetric duplicates are reported once.
    pub symmetry_breaking: bool,
    /// Upper bound on enumerated pattern automorphisms.
    pub max_automorphisms: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_hits: usize::MAX,
            symmetry_breaking: true,
            max_automorphisms: 4096,
        }
    }
}

impl MatchConfig {
    /// Returns a copy with the given hit cap.
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    /// Returns a copy with symmetry breaking switched on or off.
    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Checks the configuration for values the matcher cannot honour.
    pub fn validate(&self) -> Result<(), GglError> {
        if self.max_automorphisms == 0 {
            return Err(GglError::config(
                "invalid-max-automorphisms",
                "max_automorphisms must be at least 1 (the identity)",
            )
            .with_context("max_automorphisms", self.max_automorphisms));
        }
        Ok(())
    }
}
