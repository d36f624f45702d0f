use serde::{Deserialize, Serialize};

/// Ordering constraint derived from pattern automorphisms.
///
/// For every stored automorphism `s`, a match `m` is only accepted when the
/// tuple `(m[0], m[1], ..)` is lexicographically no larger than
/// `(m[s[0]], m[s[1]], ..)`. With the complete automorphism group exactly
/// one member of each class of symmetric matches survives; with a subset at
/// least one does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomorphismOrder {
    pattern_size: usize,
    permutations: Vec<Vec<usize>>,
}

impl AutomorphismOrder {
    /// Creates an order without automorphisms (accepts everything).
    pub fn trivial(pattern_size: usize) -> Self {
        Self {
            pattern_size,
            permutations: Vec::new(),
        }
    }

    /// Builds an order from automorphisms of a pattern with `pattern_size`
    /// nodes. Identities and permutations of the wrong length are dropped.
    pub fn new(pattern_size: usize, automorphisms: impl IntoIterator<Item = Vec<usize>>) -> Self {
        let permutations = automorphisms
            .into_iter()
            .filter(|perm| perm.len() == pattern_size)
            .filter(|perm| perm.iter().enumerate().any(|(idx, &image)| idx != image))
            .collect();
        Self {
            pattern_size,
            permutations,
        }
    }

    /// Number of pattern nodes the permutations act on.
    pub fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Returns the non-identity automorphisms.
    pub fn permutations(&self) -> &[Vec<usize>] {
        &self.permutations
    }

    /// Returns whether the order filters nothing.
    pub fn is_trivial(&self) -> bool {
        self.permutations.is_empty()
    }

    /// Checks a partial mapping. Each comparison runs over pattern positions
    /// in index order and stops undecided at the first position where either
    /// side is still unmapped.
    pub fn admits(&self, mapping: &[Option<usize>]) -> bool {
        self.permutations.iter().all(|perm| {
            for (idx, &image) in perm.iter().enumerate() {
                match (mapping.get(idx).copied().flatten(), mapping.get(image).copied().flatten()) {
                    (Some(own), Some(permuted)) if own < permuted => return true,
                    (Some(own), Some(permuted)) if own > permuted => return false,
                    (Some(_), Some(_)) => {}
                    _ => return true,
                }
            }
            true
        })
    }

    /// Checks a complete mapping.
    pub fn is_canonical(&self, mapping: &[usize]) -> bool {
        let partial: Vec<Option<usize>> = mapping.iter().copied().map(Some).collect();
        self.admits(&partial)
    }
}
