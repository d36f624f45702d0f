use std::collections::BTreeSet;

use ggl_core::{Decision, LabeledGraph};
use ggl_match::{
    AutomorphismOrder, GraphPattern, MatchConfig, MatchConstraint, MatchReporter, Pattern,
    SubgraphMatcher,
};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Automorphism statistics for a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomorphismReport {
    /// Number of automorphisms found (a lower bound when truncated).
    pub order: u64,
    /// Whether enumeration stopped at the configured limit.
    pub truncated: bool,
    /// Sorted histogram of orbit sizes.
    pub orbit_hist: Vec<u32>,
}

impl Default for AutomorphismReport {
    fn default() -> Self {
        Self {
            order: 1,
            truncated: false,
            orbit_hist: Vec::new(),
        }
    }
}

/// Automorphisms of one pattern, identity first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomorphismSet {
    pattern_size: usize,
    permutations: Vec<Vec<usize>>,
    truncated: bool,
}

impl AutomorphismSet {
    /// Number of pattern nodes the permutations act on.
    pub fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Returns the automorphisms; entry `i` of a permutation is the image of
    /// pattern node `i`.
    pub fn permutations(&self) -> &[Vec<usize>] {
        &self.permutations
    }

    /// Returns the number of automorphisms found.
    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    /// Returns whether no automorphism was found (never the case for a
    /// well-formed pattern, which always has the identity).
    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    /// Returns whether enumeration stopped early.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Derives the lexicographic order constraint for the matcher.
    pub fn order(&self) -> AutomorphismOrder {
        AutomorphismOrder::new(self.pattern_size, self.permutations.iter().cloned())
    }

    /// Summarises group order and orbit structure.
    pub fn report(&self) -> AutomorphismReport {
        let node_count = self.pattern_size;
        if node_count == 0 {
            return AutomorphismReport {
                truncated: self.truncated,
                ..AutomorphismReport::default()
            };
        }
        let mut parent: Vec<usize> = (0..node_count).collect();
        for perm in &self.permutations {
            for (idx, &mapped) in perm.iter().enumerate() {
                union(&mut parent, idx, mapped);
            }
        }
        let roots: Vec<usize> = (0..node_count).map(|idx| find(&mut parent, idx)).collect();
        let orbit_hist = roots
            .into_iter()
            .counts()
            .into_values()
            .map(|size| size as u32)
            .sorted_unstable()
            .collect();
        AutomorphismReport {
            order: self.permutations.len() as u64,
            truncated: self.truncated,
            orbit_hist,
        }
    }
}

/// Enumerates up to `limit` automorphisms of `pattern`.
///
/// Labels are compared exactly, so the wildcard behaves like any other
/// label. A permutation is only kept when it maps the constraint set onto
/// itself.
pub fn find_automorphisms(pattern: &dyn Pattern, limit: usize) -> AutomorphismSet {
    let node_count = pattern.node_count();
    let limit = limit.max(1);
    let structure = GraphPattern::new(pattern);
    let mut collector = AutomorphismCollector {
        constraints: pattern.constraints().iter().cloned().collect(),
        limit,
        found: vec![(0..node_count).collect()],
    };
    SubgraphMatcher::new(MatchConfig::default()).find_matches(&structure, &pattern, &mut collector);

    let mut permutations = collector.found;
    let truncated = permutations.len() > limit;
    permutations.truncate(limit);
    permutations.sort_unstable();
    if truncated {
        warn!("automorphism enumeration truncated at {limit} for pattern with {node_count} nodes");
    }
    debug!("pattern with {node_count} nodes: {} automorphisms", permutations.len());
    AutomorphismSet {
        pattern_size: node_count,
        permutations,
        truncated,
    }
}

struct AutomorphismCollector {
    constraints: BTreeSet<MatchConstraint>,
    limit: usize,
    found: Vec<Vec<usize>>,
}

impl AutomorphismCollector {
    fn preserves_constraints(&self, perm: &[usize]) -> bool {
        self.constraints
            .iter()
            .all(|constraint| self.constraints.contains(&constraint.permuted(perm)))
    }
}

impl MatchReporter for AutomorphismCollector {
    fn report_hit(
        &mut self,
        _pattern_id: usize,
        _pattern: &dyn Pattern,
        _target: &dyn LabeledGraph,
        mapping: &[usize],
    ) -> Decision {
        let identity = mapping.iter().enumerate().all(|(idx, &image)| idx == image);
        if identity || !self.preserves_constraints(mapping) {
            return Decision::Continue;
        }
        self.found.push(mapping.to_vec());
        // one past the limit tells a complete enumeration from a cut one
        if self.found.len() > self.limit {
            Decision::Stop
        } else {
            Decision::Continue
        }
    }
}

fn find(parent: &mut [usize], idx: usize) -> usize {
    if parent[idx] != idx {
        let root = find(parent, parent[idx]);
        parent[idx] = root;
    }
    parent[idx]
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        parent[rb] = ra;
    }
}
